use scacchiera::board::{Board, CastlingRights, Color, MoveType};
use scacchiera::movegen::{generate_legal_moves, generate_pseudo_legal_moves};

const POSITIONS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

fn rights_subset(after: CastlingRights, before: CastlingRights) -> bool {
    (!after.white_king_side || before.white_king_side)
        && (!after.white_queen_side || before.white_queen_side)
        && (!after.black_king_side || before.black_king_side)
        && (!after.black_queen_side || before.black_queen_side)
}

// make followed by unmake restores squares and state exactly
#[test]
fn make_unmake_round_trip_two_plies() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        let squares = *board.squares();
        let state = *board.state();

        for mv in generate_legal_moves(&mut board) {
            board.make_move(mv);
            for reply in generate_legal_moves(&mut board) {
                let inner_squares = *board.squares();
                let inner_state = *board.state();
                board.make_move(reply);
                board.unmake_move();
                assert_eq!(*board.squares(), inner_squares, "{} {} in {}", mv, reply, fen);
                assert_eq!(*board.state(), inner_state, "{} {} in {}", mv, reply, fen);
            }
            board.unmake_move();
            assert_eq!(*board.squares(), squares, "{} in {}", mv, fen);
            assert_eq!(*board.state(), state, "{} in {}", mv, fen);
        }
        assert_eq!(board.history_len(), 0);
    }
}

// Legal moves are exactly the pseudo-legal moves that do not leave the king in check
#[test]
fn legality_closure() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        let mover = board.side_to_move();
        let legal = generate_legal_moves(&mut board);
        for mv in generate_pseudo_legal_moves(&board) {
            board.make_move(mv);
            let safe = !board.king_in_check(mover);
            board.unmake_move();
            assert_eq!(legal.contains(&mv), safe, "{} in {}", mv, fen);
        }
    }
}

#[test]
fn state_transitions_after_each_move() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        let before = *board.state();
        for mv in generate_legal_moves(&mut board) {
            let mover = board.piece_at(mv.from).unwrap();
            board.make_move(mv);
            let after = *board.state();

            assert_eq!(after.side_to_move, before.side_to_move.opposite());
            assert!(rights_subset(after.castling, before.castling), "{} in {}", mv, fen);

            let expected_fullmove = before.fullmove_number + (mover.color == Color::Black) as u32;
            assert_eq!(after.fullmove_number, expected_fullmove);

            if mv.kind == MoveType::DoublePawnPush {
                assert_eq!(after.en_passant, Some((mv.from + mv.to) / 2));
            } else {
                assert_eq!(after.en_passant, None, "{} in {}", mv, fen);
            }
            if mv.is_castle() {
                assert!(!after.castling.king_side(mover.color));
                assert!(!after.castling.queen_side(mover.color));
            }
            board.unmake_move();
        }
    }
}

#[test]
fn en_passant_survives_exactly_one_ply() {
    let mut board = Board::new();
    for text in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        let mv = scacchiera::notation::parse_legal_move(&mut board, text).unwrap();
        board.make_move(mv);
    }
    assert_eq!(board.en_passant_square(), Some(43)); // d6
    let ep: Vec<_> = generate_legal_moves(&mut board)
        .into_iter()
        .filter(|m| m.kind == MoveType::EnPassant)
        .collect();
    assert_eq!(ep.len(), 1);

    // A waiting move forfeits the capture
    let waiting = scacchiera::notation::parse_legal_move(&mut board, "a2a3").unwrap();
    board.make_move(waiting);
    assert_eq!(board.en_passant_square(), None);
    let reply = scacchiera::notation::parse_legal_move(&mut board, "a6a5").unwrap();
    board.make_move(reply);
    assert!(!generate_legal_moves(&mut board)
        .iter()
        .any(|m| m.kind == MoveType::EnPassant));
}

#[test]
fn fen_round_trip() {
    for fen in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }
}
