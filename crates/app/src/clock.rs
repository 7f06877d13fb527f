//! In-process [`Clock`] implementations.

use std::sync::{Mutex, PoisonError};

use chrono::{Duration, FixedOffset, Offset, Utc};

use pumpctl_domain::time::{Now, Timestamp};

use crate::ports::Clock;

/// Reads the system clock; time of day is taken in a fixed local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// A clock whose time of day is UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::with_offset(Utc.fix())
    }

    #[must_use]
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Now {
        Now::at(pumpctl_domain::time::now(), self.offset)
    }
}

/// A clock that only moves when told to.
///
/// Used by tests to simulate time passing between calls.
#[derive(Debug)]
pub struct ManualClock {
    at: Mutex<Timestamp>,
    offset: FixedOffset,
}

impl ManualClock {
    /// A clock frozen at `at`, reporting UTC time of day.
    #[must_use]
    pub fn new(at: Timestamp) -> Self {
        Self {
            at: Mutex::new(at),
            offset: Utc.fix(),
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Jump to `at`.
    pub fn set(&self, at: Timestamp) {
        *self.at.lock().unwrap_or_else(PoisonError::into_inner) = at;
    }

    /// Move forward (or backward, for a negative delta) by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut at = self.at.lock().unwrap_or_else(PoisonError::into_inner);
        *at += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Now {
        let at = *self.at.lock().unwrap_or_else(PoisonError::into_inner);
        Now::at(at, self.offset)
    }
}
