use crate::kernel::time::Tick;
use crate::services::ingest::DeliveryError;

#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    Delivery {
        tick: Tick,
        outcome: DeliveryOutcome,
    },

    /// Consecutive-failure limit hit; the pause was doubled.
    Backoff {
        tick: Tick,
        failures: u32,
    },

    /// Tick aborted before delivery (encoding or generation defect).
    Fault {
        tick: Tick,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Rejected { status: u16 },
    ConnectError,
    Timeout,
    TransportError,
}

impl From<&DeliveryError> for DeliveryOutcome {
    fn from(err: &DeliveryError) -> Self {
        match err {
            DeliveryError::Rejected { status, .. } => DeliveryOutcome::Rejected { status: *status }, // body STRIPPED
            DeliveryError::Connect { .. } => DeliveryOutcome::ConnectError,
            DeliveryError::Timeout => DeliveryOutcome::Timeout,
            DeliveryError::Transport(_) => DeliveryOutcome::TransportError,
        }
    }
}
