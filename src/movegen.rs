//! Move generation
//!
//! Pseudo-legal moves are generated per piece from direction/offset tables,
//! then filtered to legal moves by make / king-in-check / unmake. There is no
//! pin or check precomputation: the make/unmake loop is the only legality
//! filter.

use crate::board::{castle_geometry, Board, Color, Move, MoveType, PieceKind, PROMOTION_KINDS};
use crate::eval::piece_value;
use crate::utils::{
    rank_of, ray, step, Square, ALL_DIRS, DIAGONAL_DIRS, KING_OFFSETS, KNIGHT_FILE_SHIFT,
    KNIGHT_OFFSETS, ORTHOGONAL_DIRS, SLIDER_FILE_SHIFT,
};

/// Ordering bonus for any promotion
pub const PROMOTION_BONUS: i32 = 900;
/// Ordering bonus for a move that gives check
pub const CHECK_BONUS: i32 = 50;

/// Which moves a generator emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Every pseudo-legal move
    All,
    /// Captures, en passant and capturing promotions only (quiescence)
    Captures,
}

// Generate moves APIs -----------------------------------------

pub fn generate_pawn_moves(board: &Board, sq: Square, out: &mut Vec<Move>, mode: GenMode) {
    let Some(pawn) = board.piece_at(sq) else {
        return;
    };
    let color = pawn.color;
    let forward = color.forward();
    let (start_rank, promo_rank) = match color {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    // Pushes (never captures)
    if mode == GenMode::All {
        if let Some(one) = step(sq, forward, 0).filter(|&s| board.is_empty(s)) {
            if rank_of(one) == promo_rank {
                push_promotions(sq, one, out);
            } else {
                out.push(Move::new(sq, one, MoveType::Standard));
                if rank_of(sq) == start_rank {
                    if let Some(two) = step(one, forward, 0).filter(|&s| board.is_empty(s)) {
                        out.push(Move::new(sq, two, MoveType::DoublePawnPush));
                    }
                }
            }
        }
    }

    // Diagonal captures and en passant
    for delta in [forward - 1, forward + 1] {
        let Some(to) = step(sq, delta, SLIDER_FILE_SHIFT) else {
            continue;
        };
        if board.is_color(to, color.opposite()) {
            if rank_of(to) == promo_rank {
                push_promotions(sq, to, out);
            } else {
                out.push(Move::new(sq, to, MoveType::Capture));
            }
        } else if board.en_passant_square() == Some(to) && board.is_empty(to) {
            out.push(Move::new(sq, to, MoveType::EnPassant));
        }
    }
}

fn push_promotions(from: Square, to: Square, out: &mut Vec<Move>) {
    for kind in PROMOTION_KINDS {
        out.push(Move::promote(from, to, kind));
    }
}

pub fn generate_knight_moves(board: &Board, sq: Square, out: &mut Vec<Move>, mode: GenMode) {
    generate_leaper_moves(board, sq, &KNIGHT_OFFSETS, KNIGHT_FILE_SHIFT, out, mode);
}

pub fn generate_bishop_moves(board: &Board, sq: Square, out: &mut Vec<Move>, mode: GenMode) {
    generate_slider_moves(board, sq, &DIAGONAL_DIRS, out, mode);
}

pub fn generate_rook_moves(board: &Board, sq: Square, out: &mut Vec<Move>, mode: GenMode) {
    generate_slider_moves(board, sq, &ORTHOGONAL_DIRS, out, mode);
}

pub fn generate_queen_moves(board: &Board, sq: Square, out: &mut Vec<Move>, mode: GenMode) {
    generate_slider_moves(board, sq, &ALL_DIRS, out, mode);
}

pub fn generate_king_moves(board: &Board, sq: Square, out: &mut Vec<Move>, mode: GenMode) {
    generate_leaper_moves(board, sq, &KING_OFFSETS, SLIDER_FILE_SHIFT, out, mode);
    if mode == GenMode::All {
        generate_castling_moves(board, sq, out);
    }
}

fn generate_leaper_moves(
    board: &Board,
    sq: Square,
    offsets: &[i8],
    max_file_shift: usize,
    out: &mut Vec<Move>,
    mode: GenMode,
) {
    let Some(piece) = board.piece_at(sq) else {
        return;
    };
    for &delta in offsets {
        let Some(to) = step(sq, delta, max_file_shift) else {
            continue;
        };
        match board.piece_at(to) {
            None if mode == GenMode::All => out.push(Move::new(sq, to, MoveType::Standard)),
            Some(target) if target.color != piece.color => {
                out.push(Move::new(sq, to, MoveType::Capture))
            }
            _ => {}
        }
    }
}

fn generate_slider_moves(
    board: &Board,
    sq: Square,
    dirs: &[i8],
    out: &mut Vec<Move>,
    mode: GenMode,
) {
    let Some(piece) = board.piece_at(sq) else {
        return;
    };
    for &dir in dirs {
        for to in ray(sq, dir) {
            match board.piece_at(to) {
                None => {
                    if mode == GenMode::All {
                        out.push(Move::new(sq, to, MoveType::Standard));
                    }
                }
                Some(target) => {
                    if target.color != piece.color {
                        out.push(Move::new(sq, to, MoveType::Capture));
                    }
                    break; // Stop sliding when we hit any piece
                }
            }
        }
    }
}

fn generate_castling_moves(board: &Board, king_from: Square, out: &mut Vec<Move>) {
    let Some(king) = board.piece_at(king_from) else {
        return;
    };
    let color = king.color;
    let enemy = color.opposite();
    let rights = board.castling_rights();

    for king_side in [true, false] {
        let allowed = if king_side {
            rights.king_side(color)
        } else {
            rights.queen_side(color)
        };
        if !allowed {
            continue;
        }
        let (home, king_to, rook_from, rook_to) = castle_geometry(color, king_side);
        if king_from != home {
            continue;
        }
        let rook_in_place = matches!(
            board.piece_at(rook_from),
            Some(p) if p.kind == PieceKind::Rook && p.color == color
        );
        if !rook_in_place {
            continue;
        }
        let (lo, hi) = (home.min(rook_from), home.max(rook_from));
        if !(lo + 1..hi).all(|s| board.is_empty(s)) {
            continue;
        }
        // The king may not castle out of or through check. Landing in check
        // is rejected later by the legality filter. The rook's destination
        // is the square the king passes over.
        if board.is_square_attacked(home, enemy) || board.is_square_attacked(rook_to, enemy) {
            continue;
        }
        let kind = if king_side {
            MoveType::KingCastle
        } else {
            MoveType::QueenCastle
        };
        out.push(Move::new(home, king_to, kind));
    }
}

fn generate_for_side(board: &Board, mode: GenMode) -> Vec<Move> {
    let mut moves = Vec::with_capacity(if mode == GenMode::All { 64 } else { 16 });
    let side = board.side_to_move();
    for sq in 0..64 {
        let Some(piece) = board.piece_at(sq) else {
            continue;
        };
        if piece.color != side {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(board, sq, &mut moves, mode),
            PieceKind::Knight => generate_knight_moves(board, sq, &mut moves, mode),
            PieceKind::Bishop => generate_bishop_moves(board, sq, &mut moves, mode),
            PieceKind::Rook => generate_rook_moves(board, sq, &mut moves, mode),
            PieceKind::Queen => generate_queen_moves(board, sq, &mut moves, mode),
            PieceKind::King => generate_king_moves(board, sq, &mut moves, mode),
        }
    }
    moves
}

pub fn generate_pseudo_legal_moves(board: &Board) -> Vec<Move> {
    generate_for_side(board, GenMode::All)
}

pub fn generate_pseudo_legal_captures(board: &Board) -> Vec<Move> {
    generate_for_side(board, GenMode::Captures)
}

/// Keep only the moves that do not leave the mover's king in check
pub fn filter_legal(board: &mut Board, moves: Vec<Move>) -> Vec<Move> {
    let mover = board.side_to_move();
    moves
        .into_iter()
        .filter(|&mv| {
            board.make_move(mv);
            let legal = !board.king_in_check(mover);
            board.unmake_move();
            legal
        })
        .collect()
}

pub fn generate_legal_moves(board: &mut Board) -> Vec<Move> {
    let pseudo = generate_pseudo_legal_moves(board);
    filter_legal(board, pseudo)
}

pub fn generate_legal_captures(board: &mut Board) -> Vec<Move> {
    let pseudo = generate_pseudo_legal_captures(board);
    filter_legal(board, pseudo)
}

/// Kind of the piece `mv` removes from the board, if any
pub fn captured_kind(board: &Board, mv: Move) -> Option<PieceKind> {
    if mv.kind == MoveType::EnPassant {
        return Some(PieceKind::Pawn);
    }
    let mover = board.piece_at(mv.from)?;
    board
        .piece_at(mv.to)
        .filter(|target| target.color != mover.color)
        .map(|target| target.kind)
}

/// MVV-LVA ordering score: victim * 10 - attacker for captures, a promotion
/// bonus, and optionally a bonus for giving check (found by make/unmake).
pub fn score_move(board: &mut Board, mv: Move, check_bonus: bool) -> i32 {
    let mut score = 0;
    if let Some(victim) = captured_kind(board, mv) {
        let attacker = board.piece_at(mv.from).map_or(0, |p| piece_value(p.kind));
        score += piece_value(victim) * 10 - attacker;
    }
    if mv.kind == MoveType::Promotion {
        score += PROMOTION_BONUS;
    }
    if check_bonus {
        board.make_move(mv);
        if board.in_check() {
            score += CHECK_BONUS;
        }
        board.unmake_move();
    }
    score
}

/// Sort descending by `score_move`. The sort is stable, so ties keep
/// generation order.
pub fn order_moves(board: &mut Board, moves: Vec<Move>, check_bonus: bool) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| (score_move(board, mv, check_bonus), mv))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

pub fn generate_ordered_moves(board: &mut Board) -> Vec<Move> {
    let legal = generate_legal_moves(board);
    order_moves(board, legal, true)
}

pub fn generate_ordered_captures(board: &mut Board) -> Vec<Move> {
    let legal = generate_legal_captures(board);
    order_moves(board, legal, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    fn count_kind(moves: &[Move], kind: MoveType) -> usize {
        moves.iter().filter(|m| m.kind == kind).count()
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        let moves = generate_legal_moves(&mut board);
        assert_eq!(moves.len(), 20);
        assert_eq!(count_kind(&moves, MoveType::DoublePawnPush), 8);
        assert!(generate_legal_captures(&mut board).is_empty());
        assert_eq!(board.history_len(), 0);
    }

    #[test]
    fn corner_knight_has_two_moves() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        let mut out = Vec::new();
        generate_knight_moves(&board, 0, &mut out, GenMode::All);
        let targets: Vec<Square> = out.iter().map(|m| m.to).collect();
        assert_eq!(out.len(), 2);
        assert!(targets.contains(&17) && targets.contains(&10));
    }

    #[test]
    fn edge_rook_does_not_wrap() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/K6R w - - 0 1").unwrap();
        let mut out = Vec::new();
        generate_rook_moves(&board, 7, &mut out, GenMode::All);
        // 7 squares up the h-file, 6 along the first rank up to the king on a1
        assert_eq!(out.len(), 13);
        assert!(out.iter().all(|m| m.to != 8));
    }

    #[test]
    fn promotions_emit_four_variants() {
        let mut board = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = generate_legal_moves(&mut board);
        let promos: Vec<&Move> = moves.iter().filter(|m| m.kind == MoveType::Promotion).collect();
        // a8 push and axb8 capture, four pieces each
        assert_eq!(promos.len(), 8);
        let captures = generate_legal_captures(&mut board);
        assert_eq!(captures.len(), 4);
        assert!(captures.iter().all(|m| m.to == 57));
    }

    #[test]
    fn black_pawns_move_down() {
        let board = Board::from_fen("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let mut out = Vec::new();
        generate_pawn_moves(&board, 51, &mut out, GenMode::All);
        assert_eq!(out.len(), 2);
        assert!(out.contains(&Move::new(51, 43, MoveType::Standard)));
        assert!(out.contains(&Move::new(51, 35, MoveType::DoublePawnPush)));
    }

    #[test]
    fn blocked_double_push() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        let mut out = Vec::new();
        generate_pawn_moves(&board, 12, &mut out, GenMode::All);
        assert!(out.is_empty());
    }

    #[test]
    fn single_en_passant_move() {
        let mut board =
            Board::from_fen("rnbqkbnr/pppppppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2").unwrap();
        board.make_move(Move::new(51, 35, MoveType::DoublePawnPush)); // d7d5
        let moves = generate_legal_moves(&mut board);
        let ep: Vec<&Move> = moves.iter().filter(|m| m.kind == MoveType::EnPassant).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].from, 36);
        assert_eq!(ep[0].to, 43);
        assert!(generate_legal_captures(&mut board).contains(ep[0]));
    }

    #[test]
    fn castling_both_sides_when_clear() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = generate_legal_moves(&mut board);
        assert!(moves.contains(&Move::new(4, 6, MoveType::KingCastle)));
        assert!(moves.contains(&Move::new(4, 2, MoveType::QueenCastle)));
    }

    #[test]
    fn castling_rejected_when_blocked_attacked_or_without_rights() {
        // b1 occupied: queen side blocked even though the king never crosses b1
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
        let moves = generate_legal_moves(&mut board);
        assert_eq!(count_kind(&moves, MoveType::QueenCastle), 0);
        assert_eq!(count_kind(&moves, MoveType::KingCastle), 1);

        // f1 attacked by the rook on f8
        let mut board = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_legal_moves(&mut board);
        assert_eq!(count_kind(&moves, MoveType::KingCastle), 0);
        assert_eq!(count_kind(&moves, MoveType::QueenCastle), 1);

        // g1 attacked: the legality filter rejects landing in check
        let mut board = Board::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_legal_moves(&mut board);
        assert_eq!(count_kind(&moves, MoveType::KingCastle), 0);

        // in check: no castling at all
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1").unwrap();
        let moves = generate_legal_moves(&mut board);
        assert_eq!(count_kind(&moves, MoveType::QueenCastle), 0);

        // no rights
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").unwrap();
        let moves = generate_legal_moves(&mut board);
        assert!(!moves.iter().any(Move::is_castle));
    }

    #[test]
    fn legal_moves_never_leave_king_in_check() {
        // Pinned knight on e2 may not move
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let pseudo = generate_pseudo_legal_moves(&board);
        let legal = generate_legal_moves(&mut board);
        assert!(pseudo.iter().any(|m| m.from == 12));
        assert!(!legal.iter().any(|m| m.from == 12));
        for mv in pseudo {
            board.make_move(mv);
            let in_check = board.king_in_check(Color::White);
            board.unmake_move();
            assert_eq!(legal.contains(&mv), !in_check, "move {}", mv);
        }
    }

    #[test]
    fn mvv_lva_orders_best_capture_first() {
        // Pawn on d4 can take the queen on e5 or the knight on c5; the rook on a1
        // can take the pawn on a7
        let mut board = Board::from_fen("4k3/p7/8/2n1q3/3P4/8/8/R6K w - - 0 1").unwrap();
        let ordered = generate_ordered_moves(&mut board);
        assert_eq!(ordered[0], Move::new(27, 36, MoveType::Capture));
        assert_eq!(score_move(&mut board, ordered[0], false), 900 * 10 - 100);
        let captures = generate_ordered_captures(&mut board);
        assert_eq!(captures.len(), 3);
        assert_eq!(captures[0], ordered[0]);
    }

    #[test]
    fn check_bonus_and_promotion_bonus() {
        let mut board = Board::from_fen("k7/8/8/8/8/8/8/1R2K3 w - - 0 1").unwrap();
        // Ra1+ gives check along the a-file
        let check = Move::new(1, 0, MoveType::Standard);
        let quiet = Move::new(1, 9, MoveType::Standard);
        assert_eq!(score_move(&mut board, check, true), CHECK_BONUS);
        assert_eq!(score_move(&mut board, quiet, true), 0);
        assert_eq!(score_move(&mut board, check, false), 0);

        let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let promo = Move::promote(48, 56, PieceKind::Queen);
        assert_eq!(score_move(&mut board, promo, false), PROMOTION_BONUS);
    }
}
