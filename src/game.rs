//! Game-over detection for the driver loop

use std::fmt;

use crate::board::{Board, Color};
use crate::movegen::generate_legal_moves;

/// Half-moves without a pawn move after which the game is drawn
pub const FIFTY_MOVE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "Checkmate, {:?} wins", winner),
            GameOutcome::Stalemate => write!(f, "Stalemate"),
            GameOutcome::FiftyMoveRule => write!(f, "Draw by the fifty-move rule"),
        }
    }
}

/// `None` while the game goes on
pub fn game_over(board: &mut Board) -> Option<GameOutcome> {
    if generate_legal_moves(board).is_empty() {
        return Some(if board.in_check() {
            GameOutcome::Checkmate {
                winner: board.side_to_move().opposite(),
            }
        } else {
            GameOutcome::Stalemate
        });
    }
    if board.halfmove_clock() >= FIFTY_MOVE_LIMIT {
        return Some(GameOutcome::FiftyMoveRule);
    }
    None
}
