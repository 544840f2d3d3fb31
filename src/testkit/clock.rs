//! Settable clock for deterministic time in tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::port::Clock;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().expect("lock clock") = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("lock clock");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("lock clock")
    }
}
