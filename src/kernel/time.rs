use chrono::{DateTime, Local, Timelike, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick {
    pub index: u64,
}

impl Tick {
    pub fn new() -> Self {
        Tick { index: 0 }
    }

    pub fn next(&self) -> Self {
        Tick { index: self.index + 1 }
    }
}

/// Wall-clock source. Generators branch on the local hour; the payload
/// timestamp is always UTC.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
    fn local_hour(&self) -> u32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Pinned clock for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub instant: DateTime<Utc>,
    pub hour: u32,
}

impl FixedClock {
    /// `hour` is taken modulo 24.
    pub fn at_hour(hour: u32) -> Self {
        Self {
            instant: Utc::now(),
            hour: hour % 24,
        }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }

    fn local_hour(&self) -> u32 {
        self.hour
    }
}

/// One clock reading shared by every generator within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub utc: DateTime<Utc>,
    pub hour: u32,
}

impl Reading {
    pub fn take(clock: &dyn Clock) -> Self {
        Self {
            utc: clock.now_utc(),
            hour: clock.local_hour(),
        }
    }

    /// Local hour >= 22 or < 8.
    pub fn is_night(&self) -> bool {
        self.hour >= 22 || self.hour < 8
    }

    /// 14:00 through 18:59 local.
    pub fn is_stress_window(&self) -> bool {
        (14..=18).contains(&self.hour)
    }
}
