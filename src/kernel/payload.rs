use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Who the readings belong to. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub user_id: u32,
    pub device_id: String,
    pub device_type: String,
}

/// Body of one `POST /api/HealthMetric/iot`. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPayload {
    pub user_id: u32,
    pub timestamp: String,
    pub device_id: String,
    pub device_type: String,
    pub heart_rate: u32,
    pub steps: u64,
    pub heart_rate_variability: u32,
    pub body_temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
}

impl HealthPayload {
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// RFC 3339 with microseconds and a `Z` suffix, e.g. `2024-03-01T14:05:09.120331Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
