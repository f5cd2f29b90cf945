//! Modulo di valutazione - materiale + Piece-Square Tables (PSQT)
//!
//! Ogni pezzo vale il suo materiale più un bonus posizionale letto dalla sua
//! tabella. Le tabelle sono scritte dal punto di vista del Bianco, in ordine
//! A1..H8; per il Nero si specchia verticalmente (sq XOR 56).
//!
//! `evaluate` restituisce il punteggio dal punto di vista del lato al tratto,
//! come richiesto dal negamax.

use crate::board::{Board, Color, PieceKind};
use crate::utils::{mirror, Square};

// ============================================================================
// VALORI MATERIALI (in centipawn)
// ============================================================================
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
// Il Re non ha valore materiale: non può essere catturato
pub const KING_VALUE: i32 = 0;

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

// ============================================================================
// PIECE-SQUARE TABLES (dal punto di vista del BIANCO)
// ============================================================================
// Indici: riga 0 = prima traversa (A1..H1), riga 7 = ottava traversa (A8..H8)

#[rustfmt::skip]
const PAWN_PSQT: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10, -20, -20,  10,  10,   5,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,   5,  10,  25,  25,  10,   5,   5,
    10,  10,  20,  30,  30,  20,  10,  10,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PSQT: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PSQT: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

/// Settima traversa premiata, colonne centrali in prima traversa
#[rustfmt::skip]
const ROOK_PSQT: [i32; 64] = [
     0,   0,   0,   5,   5,   0,   0,   0,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     5,  10,  10,  10,  10,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PSQT: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -10,   5,   5,   5,   5,   5,   0, -10,
     0,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// Mediogioco: il Re sta arroccato, lontano dal centro
#[rustfmt::skip]
const KING_PSQT: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

fn psqt(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_PSQT,
        PieceKind::Knight => &KNIGHT_PSQT,
        PieceKind::Bishop => &BISHOP_PSQT,
        PieceKind::Rook => &ROOK_PSQT,
        PieceKind::Queen => &QUEEN_PSQT,
        PieceKind::King => &KING_PSQT,
    }
}

/// Bonus posizionale di un pezzo su `sq`
#[inline]
pub fn psqt_bonus(kind: PieceKind, color: Color, sq: Square) -> i32 {
    let table_sq = match color {
        Color::White => sq,
        Color::Black => mirror(sq),
    };
    psqt(kind)[table_sq]
}

/// Valutazione dal punto di vista del Bianco (positivo = Bianco meglio)
pub fn evaluate_white(board: &Board) -> i32 {
    let mut score = 0;
    for (sq, piece) in board.squares().iter().enumerate() {
        let Some(piece) = piece else {
            continue;
        };
        let total = piece_value(piece.kind) + psqt_bonus(piece.kind, piece.color, sq);
        match piece.color {
            Color::White => score += total,
            Color::Black => score -= total,
        }
    }
    score
}

/// Valutazione statica dal punto di vista del lato al tratto
pub fn evaluate(board: &Board) -> i32 {
    let score = evaluate_white(board);
    match board.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}
