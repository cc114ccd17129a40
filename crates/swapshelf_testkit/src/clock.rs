//! A settable clock for deterministic tests.

use chrono::Duration;
use parking_lot::RwLock;
use swapshelf_core::{Clock, Timestamp};

/// A clock pinned to an explicit instant.
///
/// Tests move time with [`FixedClock::set`] or [`FixedClock::advance`]
/// to exercise the calendar-month ranking window without racing the
/// wall clock.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    /// Creates a clock pinned to `now`.
    #[must_use]
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Pins the clock to a new instant.
    pub fn set(&self, now: Timestamp) {
        *self.now.write() = now;
    }

    /// Moves the clock forward (or back) by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write();
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read()
    }
}
