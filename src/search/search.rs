//! Main search engine implementation for Scacchiera
//!
//! Iterative deepening over a negamax alpha-beta search, with a quiescence
//! extension at the leaves. The board is borrowed mutably for the duration of
//! a call and always handed back in the state it was received: every
//! `make_move` is paired with an `unmake_move`, also when a depth is abandoned
//! on timeout.

use std::time::Duration;

use tracing::{debug, info, trace};

use super::params::SearchParams;
use super::stats::SearchStats;
use crate::board::{Board, Move};
use crate::eval::evaluate;
use crate::movegen::{generate_legal_captures, generate_legal_moves, order_moves};
use crate::time::TimeBudget;

/// Score of a checkmate at the root; a mate found `ply` plies deep scores
/// `MATE - ply` for the winning side
pub const MATE: i32 = 32000;
/// Larger than any reachable score
pub const INFINITE: i32 = 1_000_000;
/// Scores beyond this are mate scores
pub const MATE_THRESHOLD: i32 = MATE - 1000;

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Outcome of `find_best_move`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score of the last completed depth, side-to-move relative
    pub score: i32,
    /// Last fully completed depth (0 when no search was needed)
    pub depth: u8,
    pub nodes: u64,
}

/// Main search engine
pub struct Search {
    params: SearchParams,
    stats: SearchStats,
    budget: TimeBudget,
    /// Deadline polling is disarmed during depth 1
    deadline_armed: bool,
    /// Set once the budget ran out; unwinds the current depth
    stopped: bool,
    /// Quiescence stops extending at this ply
    max_ply: u8,
}

impl Default for Search {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl Search {
    pub fn new(params: SearchParams) -> Self {
        let max_ply = params.max_depth.saturating_add(params.qsearch_depth);
        Self {
            params,
            stats: SearchStats::new(),
            budget: TimeBudget::unlimited(),
            deadline_armed: false,
            stopped: false,
            max_ply,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Get search statistics of the last call
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search with the configured depth and time limit
    pub fn search(&mut self, board: &mut Board) -> SearchResult {
        let max_depth = self.params.max_depth;
        let time_limit = self.params.time_limit_duration();
        self.find_best_move(board, max_depth, time_limit)
    }

    /// Iterative deepening from depth 1 to `max_depth`, bounded by
    /// `time_limit` (`None` = unlimited).
    ///
    /// The best move of each completed depth is moved to the front of the
    /// root list. A depth interrupted by the deadline is discarded and the
    /// previous depth's answer is returned. Depth 1 always completes.
    pub fn find_best_move(
        &mut self,
        board: &mut Board,
        max_depth: u8,
        time_limit: Option<Duration>,
    ) -> SearchResult {
        self.stats.reset();
        self.stats.start_timing();
        self.budget = TimeBudget::new(time_limit);
        self.deadline_armed = false;
        self.stopped = false;

        let mut root_moves = self.ordered_moves(board);

        if root_moves.is_empty() {
            let score = if board.in_check() { -MATE } else { 0 };
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
            };
        }

        if root_moves.len() == 1 {
            trace!(mv = %root_moves[0], "single legal move, skipping search");
            return SearchResult {
                best_move: Some(root_moves[0]),
                score: evaluate(board),
                depth: 0,
                nodes: 0,
            };
        }

        let mut result = SearchResult {
            best_move: Some(root_moves[0]),
            score: 0,
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=max_depth.max(1) {
            if depth > 1 && self.budget.expired() {
                break;
            }
            self.deadline_armed = depth > 1;
            self.max_ply = depth.saturating_add(self.params.qsearch_depth);

            let Some((best_index, score)) = self.search_root(board, &root_moves, depth) else {
                debug!(depth, nodes = self.stats.nodes, "depth abandoned on timeout");
                break;
            };

            // Best move first, the rest keeps its order
            root_moves[..=best_index].rotate_right(1);

            self.stats.completed_depth = depth;
            self.stats.update_timing();
            result = SearchResult {
                best_move: Some(root_moves[0]),
                score,
                depth,
                nodes: self.stats.nodes,
            };
            info!(
                depth,
                score,
                best = %root_moves[0],
                nodes = self.stats.nodes,
                elapsed_ms = self.stats.search_time.as_millis() as u64,
                "depth completed"
            );

            // A forced mate does not change with more depth, whichever side delivers it
            if is_mate_score(score) {
                break;
            }
        }

        self.stats.update_timing();
        result.nodes = self.stats.nodes;
        result
    }

    /// One full-window pass over the root moves. Returns the index of the
    /// best move and its score, or `None` if the deadline hit.
    fn search_root(&mut self, board: &mut Board, moves: &[Move], depth: u8) -> Option<(usize, i32)> {
        self.stats.inc_node();
        let mut alpha = -INFINITE;
        let beta = INFINITE;
        let mut best_index = 0;
        let mut best_score = -INFINITE;

        for (i, &mv) in moves.iter().enumerate() {
            board.make_move(mv);
            let score = -self.negamax_alpha_beta(board, depth - 1, -beta, -alpha, 1);
            board.unmake_move();

            if self.stopped {
                return None;
            }
            if score > best_score {
                best_score = score;
                best_index = i;
            }
            if score > alpha {
                alpha = score;
            }
        }
        Some((best_index, best_score))
    }

    /// Negamax with alpha-beta pruning. `ply` is the distance from the root
    /// and biases mate scores so that shorter mates are preferred.
    pub fn negamax_alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: u8,
    ) -> i32 {
        if self.poll_deadline() {
            return 0;
        }

        if depth == 0 {
            return self.quiescence(board, alpha, beta, ply);
        }

        self.stats.inc_node();

        let moves = self.ordered_moves(board);
        if moves.is_empty() {
            return if board.in_check() {
                -MATE + ply as i32
            } else {
                0 // stallo
            };
        }

        let mut best = -INFINITE;
        for mv in moves {
            board.make_move(mv);
            let score = -self.negamax_alpha_beta(board, depth - 1, -beta, -alpha, ply + 1);
            board.unmake_move();

            if self.stopped {
                return 0;
            }
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                self.stats.inc_cutoff();
                break;
            }
        }
        best
    }

    /// Quiescence search: stand pat when not in check, then captures only
    /// (every evasion when in check). Fail-hard.
    pub fn quiescence(&mut self, board: &mut Board, mut alpha: i32, beta: i32, ply: u8) -> i32 {
        self.stats.inc_qsearch_node();

        if ply >= self.max_ply {
            return evaluate(board);
        }

        let in_check = board.in_check();
        if !in_check {
            let stand_pat = evaluate(board);
            if stand_pat >= beta {
                self.stats.inc_cutoff();
                return beta;
            }
            if self.params.enable_delta_pruning && stand_pat < alpha - self.params.delta_margin {
                return alpha;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }

        let moves = if in_check {
            self.ordered_moves(board)
        } else {
            self.ordered_captures(board)
        };

        if moves.is_empty() {
            return if in_check { -MATE + ply as i32 } else { alpha };
        }

        for mv in moves {
            board.make_move(mv);
            let score = -self.quiescence(board, -beta, -alpha, ply + 1);
            board.unmake_move();

            if score >= beta {
                self.stats.inc_cutoff();
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    // Controlla il tempo; una volta scaduto resta fermo fino alla prossima ricerca
    #[inline]
    fn poll_deadline(&mut self) -> bool {
        if !self.stopped && self.deadline_armed && self.budget.expired() {
            self.stopped = true;
        }
        self.stopped
    }

    fn ordered_moves(&self, board: &mut Board) -> Vec<Move> {
        let legal = generate_legal_moves(board);
        order_moves(board, legal, self.params.check_ordering_bonus)
    }

    fn ordered_captures(&self, board: &mut Board) -> Vec<Move> {
        let captures = generate_legal_captures(board);
        order_moves(board, captures, self.params.check_ordering_bonus)
    }
}
