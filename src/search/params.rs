//! Search parameters and configuration
//!
//! Controls search behavior: depth and time limits, quiescence extension,
//! and the optional ordering/pruning terms.

use std::time::Duration;

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum search depth in plies
    pub max_depth: u8,

    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,

    /// Maximum extension of quiescence search beyond the nominal depth, in plies
    pub qsearch_depth: u8,

    /// Add the "gives check" bonus when ordering moves
    pub check_ordering_bonus: bool,

    /// Enable delta pruning in quiescence
    pub enable_delta_pruning: bool,

    /// Delta pruning margin in centipawns
    pub delta_margin: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 5,
            time_limit_ms: 5000,
            qsearch_depth: 8,
            check_ordering_bonus: true,
            enable_delta_pruning: false,
            delta_margin: 200, // 2 pawns
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set time limit in milliseconds (0 = unlimited)
    pub fn time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Set quiescence extension cap
    pub fn qsearch_depth(mut self, depth: u8) -> Self {
        self.qsearch_depth = depth;
        self
    }

    /// Enable or disable the check bonus in move ordering
    pub fn check_ordering_bonus(mut self, enable: bool) -> Self {
        self.check_ordering_bonus = enable;
        self
    }

    /// Enable or disable delta pruning
    pub fn enable_delta_pruning(mut self, enable: bool) -> Self {
        self.enable_delta_pruning = enable;
        self
    }

    /// Set delta pruning margin
    pub fn delta_margin(mut self, margin: i32) -> Self {
        self.delta_margin = margin;
        self
    }

    /// Time limit as a `Duration`, `None` when unlimited
    pub fn time_limit_duration(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }
}
