//! Error types for malformed external input
//!
//! Only the textual adapters (FEN loading and move notation) can fail with a
//! recoverable error. Broken board invariants inside the core panic instead.

use thiserror::Error;

/// Errors produced while loading a FEN string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing FEN field: {0}")]
    MissingField(&'static str),

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("piece placement must describe 8 ranks of 8 squares")]
    BadPlacement,

    #[error("invalid side to move '{0}'")]
    InvalidSide(String),

    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),

    #[error("invalid en-passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),

    #[error("position must contain exactly one {0} king")]
    KingCount(&'static str),
}

/// Errors produced while parsing a coordinate move such as "e2e4" or "e7e8q"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("move string must be 4 or 5 characters, got '{0}'")]
    BadLength(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    #[error("no piece of the side to move on {0}")]
    NoPiece(String),

    #[error("move {0} is not legal in this position")]
    IllegalMove(String),
}
