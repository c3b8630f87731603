use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::generator::HealthDataGenerator;
use super::payload::{DeviceIdentity, HealthPayload};
use super::random::{RandomSource, ThreadRandom};
use super::telemetry::event::{DeliveryOutcome, TelemetryEvent};
use super::telemetry::recorder::TelemetryRecorder;
use super::time::{Clock, SystemClock, Tick};
use crate::config::SimulatorConfig;
use crate::services::ingest::{DeliveryError, Transport};

/// Failures in a row before the pause is doubled.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Delivered,
    Failed { consecutive: u32 },
    BackedOff,
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,
    pub outcome: TickOutcome,
    /// How long the driver sleeps before the next tick.
    pub pause: Duration,
}

#[derive(Debug, Error)]
pub enum TickError {
    #[error("payload generation failed: {0}")]
    Generation(String),

    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub struct Simulator<T: Transport> {
    generator: HealthDataGenerator,
    transport: T,
    interval: Duration,
    simulate_stress: bool,
    consecutive_failures: u32,
    state: RunState,
    pub tick: Tick,
    pub telemetry: TelemetryRecorder,
}

impl<T: Transport> Simulator<T> {
    pub fn new(config: &SimulatorConfig, transport: T) -> Self {
        Self::with_sources(config, transport, Box::new(ThreadRandom), Box::new(SystemClock))
    }

    pub fn with_sources(
        config: &SimulatorConfig,
        transport: T,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let identity = DeviceIdentity {
            user_id: config.user_id,
            device_id: config.device_id.clone(),
            device_type: config.device_type.clone(),
        };
        Self {
            generator: HealthDataGenerator::new(identity, config.simulate_stress, rng, clock),
            transport,
            interval: config.interval,
            simulate_stress: config.simulate_stress,
            consecutive_failures: 0,
            state: RunState::Running,
            tick: Tick::new(),
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn generator(&self) -> &HealthDataGenerator {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut HealthDataGenerator {
        &mut self.generator
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Generation is synchronous; a panic inside it becomes a faulted tick
    /// instead of taking the process down.
    fn generate(&mut self) -> Result<HealthPayload, TickError> {
        let generator = &mut self.generator;
        panic::catch_unwind(AssertUnwindSafe(|| generator.generate())).map_err(|cause| {
            let message = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            TickError::Generation(message)
        })
    }

    /// Encodes and sends one payload. Logs the outcome.
    pub async fn deliver(&self, payload: &HealthPayload) -> Result<(), TickError> {
        let body = payload.to_json()?;
        match self.transport.deliver(body).await {
            Ok(()) => {
                info!(
                    "Health data sent successfully: HR={}, Steps={}, HRV={}",
                    payload.heart_rate, payload.steps, payload.heart_rate_variability
                );
                Ok(())
            }
            Err(e) => {
                match &e {
                    DeliveryError::Rejected { .. } => warn!("{}", e),
                    DeliveryError::Connect { .. } => error!("Connection error: {}", e),
                    DeliveryError::Timeout => error!("Timeout: {}", e),
                    DeliveryError::Transport(_) => error!("{}", e),
                }
                Err(e.into())
            }
        }
    }

    /// Core step: generate, deliver, and decide the pause. Awaits the
    /// delivery but never the pause itself; that belongs to the driver.
    pub async fn tick_step(&mut self) -> TickReport {
        self.tick = self.tick.next();
        let tick = self.tick;

        let result = match self.generate() {
            Ok(payload) => self.deliver(&payload).await,
            Err(e) => Err(e),
        };

        let (outcome, pause) = match result {
            Ok(()) => {
                self.telemetry.record(TelemetryEvent::Delivery { tick, outcome: DeliveryOutcome::Delivered });
                self.consecutive_failures = 0;
                (TickOutcome::Delivered, self.interval)
            }
            Err(TickError::Delivery(e)) => {
                self.telemetry.record(TelemetryEvent::Delivery { tick, outcome: DeliveryOutcome::from(&e) });
                self.consecutive_failures += 1;
                if self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    warn!(
                        "Too many consecutive failures ({}). Waiting longer before retry...",
                        MAX_CONSECUTIVE_FAILURES
                    );
                    self.telemetry.record(TelemetryEvent::Backoff { tick, failures: self.consecutive_failures });
                    self.consecutive_failures = 0;
                    (TickOutcome::BackedOff, self.interval.saturating_mul(2))
                } else {
                    (TickOutcome::Failed { consecutive: self.consecutive_failures }, self.interval)
                }
            }
            Err(e) => {
                error!("Unexpected error: {}", e);
                self.telemetry.record(TelemetryEvent::Fault { tick });
                (TickOutcome::Faulted, self.interval)
            }
        };

        TickReport { tick, outcome, pause }
    }

    fn log_banner(&self) {
        let identity = self.generator.identity();
        info!("Starting IoT Health Data Simulator");
        info!("  Device ID: {}", identity.device_id);
        info!("  Device Type: {}", identity.device_type);
        info!("  User ID: {}", identity.user_id);
        info!("  API Endpoint: {}", self.transport.endpoint());
        info!("  Interval: {} seconds", self.interval.as_secs());
        info!("  Stress Simulation: {}", self.simulate_stress);
    }

    /// Async driver loop. Runs until `shutdown` fires. Cancellation is only
    /// observed between ticks and during the pause; an in-flight POST is
    /// left to finish or time out.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        self.log_banner();
        self.state = RunState::Running;

        while !shutdown.is_cancelled() {
            let report = self.tick_step().await;

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(report.pause) => {}
            }
        }

        self.state = RunState::Stopped;
        info!("Simulator stopped by user");
        info!("Session summary: {}", self.telemetry.summary(self.tick.index));
    }
}
