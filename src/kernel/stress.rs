use super::random::RandomSource;
use super::time::Reading;

pub const MAX_STRESS: u8 = 100;
/// Above this, stress mode skews heart rate, sleep and HRV.
pub const ELEVATED: u8 = 50;
/// Above this, HRV drops into the lowest band.
pub const SEVERE: u8 = 70;

/// Synthetic 0-100 stress scalar. Climbs during the afternoon window and
/// relaxes otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct StressLevel(u8);

impl StressLevel {
    pub fn new(level: u8) -> Self {
        Self(level.min(MAX_STRESS))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_elevated(&self) -> bool {
        self.0 > ELEVATED
    }

    pub fn is_severe(&self) -> bool {
        self.0 > SEVERE
    }

    /// The only mutator. Must run exactly once per tick, before generation.
    pub fn update(&mut self, reading: &Reading, rng: &mut dyn RandomSource) {
        let current = i64::from(self.0);
        let next = if reading.is_stress_window() {
            (current + rng.int_in(1, 5)).min(i64::from(MAX_STRESS))
        } else {
            (current - rng.int_in(1, 3)).max(0)
        };
        self.0 = next as u8;
    }
}
