//! Search engine for Scacchiera
//!
//! Single-threaded iterative deepening negamax with quiescence. No
//! transposition table: every call starts from scratch.

pub mod params;
pub mod search;
pub mod stats;

pub use self::params::SearchParams;
pub use self::search::{is_mate_score, Search, SearchResult, INFINITE, MATE, MATE_THRESHOLD};
pub use self::stats::SearchStats;
pub use crate::board::Move;
