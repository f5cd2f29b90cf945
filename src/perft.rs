//! Perft: count leaf nodes of the legal move tree. Used to validate move
//! generation against known counts.

use crate::board::{Board, Move};
use crate::movegen::generate_legal_moves;

pub fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.unmake_move();
    }
    nodes
}

/// Perft split by root move, in generation order
pub fn divide(board: &mut Board, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    generate_legal_moves(board)
        .into_iter()
        .map(|mv| {
            board.make_move(mv);
            let nodes = perft(board, depth - 1);
            board.unmake_move();
            (mv, nodes)
        })
        .collect()
}
