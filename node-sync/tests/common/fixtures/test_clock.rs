//! Clocks for driving the scheduler without waiting for real checkpoints

use chrono::{NaiveDate, NaiveDateTime};
use node_sync::Clock;
use tokio::time::Instant;

/// Build a local datetime on an arbitrary fixed day
pub fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 25)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Starts at `start` and advances with tokio time, so paused-time tests see
/// the wall clock move exactly as far as the scheduler has slept
#[derive(Debug, Clone, Copy)]
pub struct TickingClock {
    start: NaiveDateTime,
    origin: Instant,
}

impl TickingClock {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            origin: Instant::now(),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed()).unwrap();
        self.start + elapsed
    }
}
