#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use wearsim::kernel::time::Clock;
use wearsim::services::ingest::{DeliveryError, Transport};
use wearsim::SimulatorConfig;

pub const ENDPOINT: &str = "http://test.invalid/api/HealthMetric/iot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Status(u16),
    Refused,
    Timeout,
}

/// In-process transport. Replays scripted replies (the last one repeats)
/// and keeps every body it was handed, decoded as JSON.
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    sent: Mutex<Vec<Value>>,
    stop_after: Option<(usize, CancellationToken)>,
}

impl MockTransport {
    pub fn always(reply: Reply) -> Self {
        Self::scripted(Vec::new(), reply)
    }

    pub fn scripted(replies: Vec<Reply>, fallback: Reply) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback,
            sent: Mutex::new(Vec::new()),
            stop_after: None,
        }
    }

    /// Cancels `token` once `count` bodies have been received.
    pub fn stop_after(mut self, count: usize, token: CancellationToken) -> Self {
        self.stop_after = Some((count, token));
        self
    }

    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    async fn deliver(&self, body: Vec<u8>) -> Result<(), DeliveryError> {
        let count = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(serde_json::from_slice(&body).expect("body is JSON"));
            sent.len()
        };
        if let Some((limit, token)) = &self.stop_after {
            if count >= *limit {
                token.cancel();
            }
        }

        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(self.fallback);
        match reply {
            Reply::Ok => Ok(()),
            Reply::Status(status) => Err(DeliveryError::Rejected { status, body: "stub failure".into() }),
            Reply::Refused => Err(DeliveryError::Connect { endpoint: ENDPOINT.into() }),
            Reply::Timeout => Err(DeliveryError::Timeout),
        }
    }
}

pub fn config(interval_secs: u64, simulate_stress: bool) -> SimulatorConfig {
    SimulatorConfig {
        api_base_url: "http://test.invalid".into(),
        user_id: 7,
        device_id: "iot-device-1001".into(),
        device_type: "fitness_tracker".into(),
        interval: Duration::from_secs(interval_secs),
        simulate_stress,
    }
}

/// Clock whose hour lookup panics, to exercise the faulted-tick path.
pub struct BrokenClock;

impl Clock for BrokenClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        panic!("clock unavailable")
    }
}
