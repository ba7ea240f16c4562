//! Injectable time source.
//!
//! Expiry decisions compare record timestamps against `now()`, so the clock
//! is behind a trait: production uses [`SystemClock`], tests drive a
//! [`ManualClock`] to cross expiry boundaries without sleeping.

use std::sync::Mutex;

use crate::types::{truncate_to_millis, Timestamp};

/// Source of the current UTC time, truncated to millisecond precision.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time via `chrono::Utc::now()`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        truncate_to_millis(chrono::Utc::now())
    }
}

/// Test clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(truncate_to_millis(start)),
        }
    }

    pub fn set(&self, to: Timestamp) {
        *self.now.lock().expect("clock lock poisoned") = truncate_to_millis(to);
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = truncate_to_millis(*now + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("clock lock poisoned")
    }
}
