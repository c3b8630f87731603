use std::time::Duration;
use rand::Rng;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://api:8080";
pub const DEFAULT_DEVICE_TYPE: &str = "fitness_tracker";
pub const DEFAULT_INTERVAL_SECONDS: u64 = 300;
pub const INGEST_PATH: &str = "/api/HealthMetric/iot";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidInteger { var: &'static str, value: String },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Everything the simulator needs, resolved once at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub api_base_url: String,
    pub user_id: u32,
    pub device_id: String,
    pub device_type: String,
    pub interval: Duration,
    pub simulate_stress: bool,
}

impl SimulatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let user_id = positive_int("USER_ID", lookup("USER_ID"), 1)?;
        let device_id = lookup("DEVICE_ID").unwrap_or_else(random_device_id);
        let device_type = lookup("DEVICE_TYPE").unwrap_or_else(|| DEFAULT_DEVICE_TYPE.to_string());
        let interval_secs = positive_int("INTERVAL_SECONDS", lookup("INTERVAL_SECONDS"), DEFAULT_INTERVAL_SECONDS)?;
        let simulate_stress = lookup("SIMULATE_STRESS")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            api_base_url,
            user_id,
            device_id,
            device_type,
            interval: Duration::from_secs(interval_secs),
            simulate_stress,
        })
    }

    /// Full ingestion URL: base with the fixed IoT path appended.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), INGEST_PATH)
    }
}

fn positive_int<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: T = raw.trim().parse().map_err(|_| ConfigError::InvalidInteger {
        var,
        value: raw.clone(),
    })?;
    if value == T::default() {
        return Err(ConfigError::Zero { var });
    }
    Ok(value)
}

pub fn random_device_id() -> String {
    format!("iot-device-{}", rand::thread_rng().gen_range(1000..=9999))
}
