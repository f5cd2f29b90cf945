//! Search statistics and performance metrics
//!
//! Counters are owned by the `Search` instance and reset at the start of
//! every `find_best_move` call. No global state.

use std::fmt;
use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes searched (main search + quiescence)
    pub nodes: u64,

    /// Quiescence nodes searched
    pub qsearch_nodes: u64,

    /// Beta cutoffs
    pub cutoffs: u64,

    /// Deepest fully completed iteration
    pub completed_depth: u8,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    #[inline]
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    #[inline]
    pub fn inc_qsearch_node(&mut self) {
        self.nodes += 1;
        self.qsearch_nodes += 1;
    }

    #[inline]
    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth {} | nodes {} (qsearch {}) | cutoffs {} | {} ms | {} nps",
            self.completed_depth,
            self.nodes,
            self.qsearch_nodes,
            self.cutoffs,
            self.search_time.as_millis(),
            self.nps
        )
    }
}
