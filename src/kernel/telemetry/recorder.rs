use std::collections::VecDeque;
use super::event::TelemetryEvent;
use super::metrics::{TelemetrySnapshot, compute_snapshot};

const MAX_EVENTS: usize = 10_000;

#[derive(Debug)]
pub struct TelemetryRecorder {
    buffer: VecDeque<TelemetryEvent>,
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        compute_snapshot(&self.buffer)
    }

    /// One-line session summary, logged on shutdown.
    pub fn summary(&self, ticks: u64) -> String {
        let snap = self.snapshot();
        let stats = &snap.delivery_stats;
        format!(
            "ticks={} delivered={} failed={} backoffs={} faults={} success_ratio={:.2}",
            ticks,
            stats.delivered,
            stats.failed(),
            snap.backoffs,
            snap.faults,
            stats.success_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::telemetry::event::DeliveryOutcome;
    use crate::kernel::time::Tick;

    fn delivery(index: u64, outcome: DeliveryOutcome) -> TelemetryEvent {
        TelemetryEvent::Delivery { tick: Tick { index }, outcome }
    }

    #[test]
    fn snapshot_counts_outcomes() {
        let mut recorder = TelemetryRecorder::new();
        recorder.record(delivery(0, DeliveryOutcome::Delivered));
        recorder.record(delivery(1, DeliveryOutcome::Rejected { status: 503 }));
        recorder.record(delivery(2, DeliveryOutcome::Timeout));
        recorder.record(delivery(3, DeliveryOutcome::ConnectError));
        recorder.record(TelemetryEvent::Backoff { tick: Tick { index: 3 }, failures: 5 });
        recorder.record(TelemetryEvent::Fault { tick: Tick { index: 4 } });

        let snap = recorder.snapshot();
        assert_eq!(snap.delivery_stats.attempts, 4);
        assert_eq!(snap.delivery_stats.delivered, 1);
        assert_eq!(snap.delivery_stats.failed(), 3);
        assert_eq!(snap.delivery_stats.last_rejected_status, Some(503));
        assert_eq!(snap.delivery_stats.success_ratio, 0.25);
        assert_eq!(snap.backoffs, 1);
        assert_eq!(snap.faults, 1);
        assert_eq!(
            recorder.summary(5),
            "ticks=5 delivered=1 failed=3 backoffs=1 faults=1 success_ratio=0.25"
        );
    }

    #[test]
    fn buffer_is_bounded() {
        let mut recorder = TelemetryRecorder::new();
        for i in 0..(MAX_EVENTS as u64 + 10) {
            recorder.record(delivery(i, DeliveryOutcome::Delivered));
        }
        assert_eq!(recorder.len(), MAX_EVENTS);
    }
}
