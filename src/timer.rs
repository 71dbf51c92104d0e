//! Non-blocking interval timers
//!
//! Nothing in the engine sleeps. Every periodic job keeps the instant it last
//! fired and compares it against the injected `now` on each tick.

use embassy_time::{Duration, Instant};

/// Returns `true` when at least `interval` has passed since `last`
///
/// A clock that went backwards counts as no time elapsed.
#[inline]
pub fn due_since(last: Instant, interval: Duration, now: Instant) -> bool {
    now.saturating_duration_since(last) >= interval
}

/// Periodic gate that fires at most once per interval.
///
/// A fresh timer is due immediately.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    last: Option<Instant>,
    interval: Duration,
}

impl IntervalTimer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            last: None,
            interval,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Check without consuming the period
    pub fn is_due(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| due_since(last, self.interval, now))
    }

    /// Returns `true` and restarts the period when the timer is due
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.last = Some(now);
            true
        } else {
            false
        }
    }

    /// Start a new period at `now` regardless of state
    pub const fn restart(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Forget the last firing so the next poll fires
    pub const fn clear(&mut self) {
        self.last = None;
    }
}
