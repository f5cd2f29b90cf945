//! Coordinate move notation ("e2e4", "e7e8q", "e1g1")
//!
//! The text only carries the two squares and an optional promotion letter;
//! the move type is recovered by looking at the board.

use crate::board::{castle_geometry, Board, Move, MoveType, PieceKind};
use crate::error::NotationError;
use crate::movegen::generate_legal_moves;
use crate::utils::{file_of, parse_square, rank_of, square_name};

/// Build a `Move` from coordinate notation, classifying it by board
/// inspection. The result is not checked for legality.
///
/// A pawn reaching the last rank without a promotion letter promotes to a
/// queen.
pub fn parse_move(board: &Board, text: &str) -> Result<Move, NotationError> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(NotationError::BadLength(text.to_string()));
    }

    let from = parse_square(&text[0..2])
        .ok_or_else(|| NotationError::InvalidSquare(text[0..2].to_string()))?;
    let to = parse_square(&text[2..4])
        .ok_or_else(|| NotationError::InvalidSquare(text[2..4].to_string()))?;

    let letter = text[4..].chars().next();
    let promotion = match letter {
        None => None,
        Some(c) => match PieceKind::from_char(c.to_ascii_lowercase()) {
            Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
                Some(kind)
            }
            _ => return Err(NotationError::InvalidPromotion(c)),
        },
    };

    let piece = board
        .piece_at(from)
        .filter(|p| p.color == board.side_to_move())
        .ok_or_else(|| NotationError::NoPiece(square_name(from)))?;
    let target = board.piece_at(to);
    let is_capture = matches!(target, Some(t) if t.color != piece.color);
    let last_rank = rank_of(to) == 0 || rank_of(to) == 7;

    // Only a pawn landing on the last rank may carry a letter
    if let Some(c) = letter {
        if piece.kind != PieceKind::Pawn || !last_rank {
            return Err(NotationError::InvalidPromotion(c));
        }
    }

    let mv = match piece.kind {
        PieceKind::Pawn => {
            if last_rank {
                Move::promote(from, to, promotion.unwrap_or(PieceKind::Queen))
            } else if target.is_none()
                && file_of(from) != file_of(to)
                && board.en_passant_square() == Some(to)
            {
                Move::new(from, to, MoveType::EnPassant)
            } else if rank_of(from).abs_diff(rank_of(to)) == 2 {
                Move::new(from, to, MoveType::DoublePawnPush)
            } else if is_capture {
                Move::new(from, to, MoveType::Capture)
            } else {
                Move::new(from, to, MoveType::Standard)
            }
        }
        PieceKind::King if castle_target(board, from, to, true) => {
            Move::new(from, to, MoveType::KingCastle)
        }
        PieceKind::King if castle_target(board, from, to, false) => {
            Move::new(from, to, MoveType::QueenCastle)
        }
        _ if is_capture => Move::new(from, to, MoveType::Capture),
        _ => Move::new(from, to, MoveType::Standard),
    };
    Ok(mv)
}

fn castle_target(board: &Board, from: usize, to: usize, king_side: bool) -> bool {
    let (king_from, king_to, _, _) = castle_geometry(board.side_to_move(), king_side);
    from == king_from && to == king_to
}

/// Like `parse_move`, but the move must also be legal in the position
pub fn parse_legal_move(board: &mut Board, text: &str) -> Result<Move, NotationError> {
    let mv = parse_move(board, text)?;
    if generate_legal_moves(board).contains(&mv) {
        Ok(mv)
    } else {
        Err(NotationError::IllegalMove(text.trim().to_string()))
    }
}
