//! Monotonic time sources.
//!
//! [`BudgetCache`](crate::BudgetCache) reads "now" exactly once per lookup
//! from a [`Clock`]. The default [`TokioClock`] follows tokio's clock, so
//! tests running with paused time (`start_paused = true`) see sleeps and
//! `tokio::time::advance` reflected in TTL and cooldown checks.
//! [`ManualClock`] only moves when told to.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by [`tokio::time::Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only advances through [`ManualClock::advance`].
///
/// ```rust
/// # use litellm_budget::clock::{Clock, ManualClock};
/// # use std::time::Duration;
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(31));
/// assert_eq!(clock.now() - start, Duration::from_secs(31));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Start at the current tokio instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
