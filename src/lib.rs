pub mod attacks;
pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod search;
pub mod time;
pub mod utils;

pub use board::{Board, Color, Move, MoveType, Piece, PieceKind, START_FEN};
pub use error::{FenError, NotationError};
