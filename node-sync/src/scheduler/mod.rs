//! Wall-clock polling scheduler for the daily handoff checkpoints
//!
//! The clock is read every 30 seconds. A checkpoint fires only when the
//! reading falls on the exact minute:
//!
//! - **Noon** (12:00): hand off, then shut down if the handoff succeeded
//! - **Midnight** (00:00): wait for the peer to boot, then hand off
//!
//! "Hand off" means push on the primary and receive on the secondary.
//!
//! # Missed and repeated checkpoints
//!
//! Matching is by minute, not by range. A poll that does not land inside the
//! checkpoint minute (the loop was busy in a handler, or the host was
//! asleep) skips that checkpoint for the day. A handler that returns within
//! the same minute can be triggered again by the next poll.

pub mod operations;
pub use operations::SyncScheduler;

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

use crate::config::Role;
use crate::constants::schedule::{MIDNIGHT_HOUR, NOON_HOUR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Checkpoint {
    Noon,
    Midnight,
}

impl Checkpoint {
    /// The checkpoint whose minute `time` falls in, if any.
    pub fn at(time: NaiveTime) -> Option<Self> {
        match (time.hour(), time.minute()) {
            (NOON_HOUR, 0) => Some(Checkpoint::Noon),
            (MIDNIGHT_HOUR, 0) => Some(Checkpoint::Midnight),
            _ => None,
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checkpoint::Noon => write!(f, "noon"),
            Checkpoint::Midnight => write!(f, "midnight"),
        }
    }
}

/// Source of local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// What a checkpoint handler did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointReport {
    pub checkpoint: Checkpoint,
    pub role: Role,
    pub handoff_succeeded: bool,
    pub shutdown_attempted: bool,
}
