//! Attack detection: ray casting for sliders, fixed offsets for leapers.
//!
//! Used for check detection (legality filter) and castling safety. Every
//! step goes through `utils::step`, which rejects edge wraparound.

use crate::board::{Board, Color, PieceKind};
use crate::utils::{
    ray, step, Square, DIAGONAL_DIRS, KING_OFFSETS, KNIGHT_FILE_SHIFT, KNIGHT_OFFSETS,
    ORTHOGONAL_DIRS, SLIDER_FILE_SHIFT,
};

impl Board {
    /// True if any piece of color `by` attacks `sq`. Works on empty squares,
    /// which is what castling transit checks need.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        // Pawns: an attacker sits one rank "behind" sq from its own point of view
        let pawn_deltas: [i8; 2] = match by {
            Color::White => [-7, -9],
            Color::Black => [7, 9],
        };
        for delta in pawn_deltas {
            if let Some(from) = step(sq, delta, SLIDER_FILE_SHIFT) {
                if self.holds(from, PieceKind::Pawn, by) {
                    return true;
                }
            }
        }

        for delta in KNIGHT_OFFSETS {
            if let Some(from) = step(sq, delta, KNIGHT_FILE_SHIFT) {
                if self.holds(from, PieceKind::Knight, by) {
                    return true;
                }
            }
        }

        for delta in KING_OFFSETS {
            if let Some(from) = step(sq, delta, SLIDER_FILE_SHIFT) {
                if self.holds(from, PieceKind::King, by) {
                    return true;
                }
            }
        }

        // Rook/Queen (orthogonal sliding)
        for dir in ORTHOGONAL_DIRS {
            if self.first_blocker_is(sq, dir, by, PieceKind::Rook) {
                return true;
            }
        }
        // Bishop/Queen (diagonal sliding)
        for dir in DIAGONAL_DIRS {
            if self.first_blocker_is(sq, dir, by, PieceKind::Bishop) {
                return true;
            }
        }
        false
    }

    /// True if the piece on `sq` is attacked by the opposite color, including
    /// a pawn that can be taken en passant right now. An empty square is never
    /// considered attacked here; use `is_square_attacked` for those.
    pub fn is_piece_attacked(&self, sq: Square) -> bool {
        let Some(piece) = self.piece_at(sq) else {
            return false;
        };
        let enemy = piece.color.opposite();
        if self.is_square_attacked(sq, enemy) {
            return true;
        }

        if piece.kind == PieceKind::Pawn {
            // the square this pawn just passed over
            let behind = step(sq, -piece.color.forward(), SLIDER_FILE_SHIFT);
            if behind.is_some() && behind == self.en_passant_square() {
                for side in [-1i8, 1] {
                    if let Some(adjacent) = step(sq, side, SLIDER_FILE_SHIFT) {
                        if self.holds(adjacent, PieceKind::Pawn, enemy) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Square of the king of `color`.
    ///
    /// Panics if there is no such king: the board is corrupted.
    pub fn king_location(&self, color: Color) -> Square {
        (0..64)
            .find(|&sq| self.holds(sq, PieceKind::King, color))
            .unwrap_or_else(|| panic!("no {:?} king on board: {}", color, self.to_fen()))
    }

    pub fn king_in_check(&self, color: Color) -> bool {
        self.is_piece_attacked(self.king_location(color))
    }

    /// Is the side to move in check
    pub fn in_check(&self) -> bool {
        self.king_in_check(self.side_to_move())
    }

    #[inline]
    fn holds(&self, sq: Square, kind: PieceKind, color: Color) -> bool {
        matches!(self.piece_at(sq), Some(p) if p.kind == kind && p.color == color)
    }

    // Walk the ray until the first occupied square; true if it is a `slider`
    // or a queen of color `by`.
    fn first_blocker_is(&self, sq: Square, dir: i8, by: Color, slider: PieceKind) -> bool {
        for s in ray(sq, dir) {
            if let Some(p) = self.piece_at(s) {
                return p.color == by && (p.kind == slider || p.kind == PieceKind::Queen);
            }
        }
        false
    }
}
