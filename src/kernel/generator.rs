use super::payload::{format_timestamp, round1, DeviceIdentity, HealthPayload};
use super::random::RandomSource;
use super::stress::StressLevel;
use super::time::{Clock, Reading};

pub const ACTIVITY_PROBABILITY: f64 = 0.3;
pub const BASE_BODY_TEMPERATURE: f64 = 36.6;

/// Step increment bands by local hour: `[start, end)` -> inclusive increment range.
const STEP_BANDS: [(u32, u32, i64, i64); 5] = [
    (0, 6, 0, 50),
    (6, 12, 100, 500),
    (12, 18, 200, 800),
    (18, 22, 100, 400),
    (22, 24, 0, 100),
];

/// Derives a full reading set per tick from the clock and its own state.
pub struct HealthDataGenerator {
    identity: DeviceIdentity,
    simulate_stress: bool,
    steps: u64,
    stress: StressLevel,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl HealthDataGenerator {
    pub fn new(
        identity: DeviceIdentity,
        simulate_stress: bool,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            identity,
            simulate_stress,
            steps: 0,
            stress: StressLevel::default(),
            rng,
            clock,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn stress(&self) -> StressLevel {
        self.stress
    }

    pub fn total_steps(&self) -> u64 {
        self.steps
    }

    /// Seeds the stress level, e.g. to resume a scenario mid-afternoon.
    pub fn with_stress(mut self, stress: StressLevel) -> Self {
        self.stress = stress;
        self
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    fn stressed(&self) -> bool {
        self.simulate_stress && self.stress.is_elevated()
    }

    pub fn update_stress(&mut self, reading: &Reading) {
        self.stress.update(reading, self.rng.as_mut());
    }

    pub fn heart_rate(&mut self) -> u32 {
        let bpm = if self.stressed() {
            self.rng.int_in(95, 120)
        } else if self.rng.chance() < ACTIVITY_PROBABILITY {
            self.rng.int_in(100, 140)
        } else {
            self.rng.int_in(60, 90)
        };
        bpm as u32
    }

    pub fn steps(&mut self, reading: &Reading) -> u64 {
        let (lo, hi) = STEP_BANDS
            .iter()
            .find(|(start, end, _, _)| (*start..*end).contains(&reading.hour))
            .map(|&(_, _, lo, hi)| (lo, hi))
            .unwrap_or((0, 0));
        let increment = self.rng.int_in(lo, hi).max(0) as u64;
        self.steps = self.steps.saturating_add(increment);
        self.steps
    }

    /// `None` outside the night window.
    pub fn sleep_hours(&mut self, reading: &Reading) -> Option<f64> {
        if !reading.is_night() {
            return None;
        }
        let hours = if self.stressed() {
            self.rng.real_in(4.5, 6.5)
        } else {
            self.rng.real_in(7.0, 9.0)
        };
        Some(round1(hours))
    }

    pub fn heart_rate_variability(&mut self) -> u32 {
        let ms = if self.simulate_stress && self.stress.is_severe() {
            self.rng.int_in(15, 25)
        } else if self.simulate_stress && self.stress.is_elevated() {
            self.rng.int_in(25, 35)
        } else {
            self.rng.int_in(40, 60)
        };
        ms as u32
    }

    pub fn body_temperature(&mut self) -> f64 {
        round1(BASE_BODY_TEMPERATURE + self.rng.real_in(-0.3, 0.5))
    }

    /// One tick's payload. Stress moves first so every reading sees the new level.
    pub fn generate(&mut self) -> HealthPayload {
        let reading = Reading::take(self.clock.as_ref());
        self.update_stress(&reading);

        let heart_rate = self.heart_rate();
        let steps = self.steps(&reading);
        let heart_rate_variability = self.heart_rate_variability();
        let body_temperature = self.body_temperature();
        let sleep_hours = self.sleep_hours(&reading);

        HealthPayload {
            user_id: self.identity.user_id,
            timestamp: format_timestamp(reading.utc),
            device_id: self.identity.device_id.clone(),
            device_type: self.identity.device_type.clone(),
            heart_rate,
            steps,
            heart_rate_variability,
            body_temperature,
            sleep_hours,
        }
    }
}
