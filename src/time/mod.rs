//! Time management helper for Scacchiera
//!
//! The search owns a `TimeBudget` and polls it between nodes. Nothing here
//! interrupts the search: expiry is only noticed when somebody asks.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    /// Budget starting now. `None` never expires.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// Milliseconds, with 0 meaning unlimited (as in `SearchParams`)
    pub fn from_millis(ms: u64) -> Self {
        Self::new((ms > 0).then(|| Duration::from_millis(ms)))
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn expired(&self) -> bool {
        match self.limit {
            Some(limit) => self.start.elapsed() > limit,
            None => false,
        }
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}
