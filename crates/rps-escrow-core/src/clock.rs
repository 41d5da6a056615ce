//! Time sources.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Follows wall-clock time until advanced, then holds a simulated instant.
///
/// Clones share the same simulated time.
#[derive(Clone, Debug, Default)]
pub struct SimulatedClock {
    current_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(time: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Some(time))),
        }
    }

    /// Advance simulated time, returning the new instant. Leaves the clock
    /// untouched and returns `None` if the result is out of range.
    pub fn advance(&self, by: Duration) -> Option<DateTime<Utc>> {
        let mut current_time = self
            .current_time
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = current_time
            .unwrap_or_else(Utc::now)
            .checked_add_signed(by)?;
        *current_time = Some(next);
        Some(next)
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        self.current_time
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .unwrap_or_else(Utc::now)
    }
}
