use std::collections::VecDeque;
use super::event::{TelemetryEvent, DeliveryOutcome};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub delivery_stats: DeliveryStats,
    pub backoffs: u64,
    pub faults: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryStats {
    pub attempts: u64,
    pub delivered: u64,
    pub rejected: u64,
    pub connect_errors: u64,
    pub timeouts: u64,
    pub transport_errors: u64,
    pub last_rejected_status: Option<u16>,
    pub success_ratio: f64,
}

impl DeliveryStats {
    pub fn failed(&self) -> u64 {
        self.rejected + self.connect_errors + self.timeouts + self.transport_errors
    }
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::Delivery { outcome, .. } => {
                let stats = &mut snap.delivery_stats;
                stats.attempts += 1;
                match outcome {
                    DeliveryOutcome::Delivered => stats.delivered += 1,
                    DeliveryOutcome::Rejected { status } => {
                        stats.rejected += 1;
                        stats.last_rejected_status = Some(*status);
                    }
                    DeliveryOutcome::ConnectError => stats.connect_errors += 1,
                    DeliveryOutcome::Timeout => stats.timeouts += 1,
                    DeliveryOutcome::TransportError => stats.transport_errors += 1,
                }
            }
            TelemetryEvent::Backoff { .. } => snap.backoffs += 1,
            TelemetryEvent::Fault { .. } => snap.faults += 1,
        }
    }

    if snap.delivery_stats.attempts > 0 {
        snap.delivery_stats.success_ratio =
            snap.delivery_stats.delivered as f64 / snap.delivery_stats.attempts as f64;
    }

    snap
}
