// Mailbox board: 64 squares, A1=0, B1=1, ..., H8=63
// Usiamo questo mapping coerente per tutte le operazioni (movegen, attacks, eval)

use crate::error::FenError;
use crate::utils::{make_square, mirror, parse_square, square_name, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Direction a pawn of this color advances in (+8 or -8)
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Lowercase letter used by FEN and coordinate notation
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Promotion choices, in the order the generator emits them
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

/// Four independent castling flags. They only ever go from true to false
/// during play; undo restores them wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    pub fn king_side(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side,
            Color::Black => self.black_king_side,
        }
    }

    pub fn queen_side(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_side,
            Color::Black => self.black_queen_side,
        }
    }

    pub fn clear(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_king_side = false;
                self.white_queen_side = false;
            }
            Color::Black => {
                self.black_king_side = false;
                self.black_queen_side = false;
            }
        }
    }

    // Perdita dei diritti quando si tocca una casa d'angolo o la casa del re
    fn clear_touching(&mut self, sq: Square) {
        match sq {
            0 => self.white_queen_side = false,
            7 => self.white_king_side = false,
            4 => self.clear(Color::White),
            56 => self.black_queen_side = false,
            63 => self.black_king_side = false,
            60 => self.clear(Color::Black),
            _ => {}
        }
    }

    /// FEN castling field ("KQkq", "-", ...)
    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        if self.white_king_side {
            s.push('K');
        }
        if self.white_queen_side {
            s.push('Q');
        }
        if self.black_king_side {
            s.push('k');
        }
        if self.black_queen_side {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

/// Side to move, castling rights, en-passant target and clocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square a pawn passed over on the previous ply, if it was a double push
    pub en_passant: Option<Square>,
    /// Half-moves since the last pawn move
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

pub type BoardArray = [Option<Piece>; 64];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Standard,
    Capture,
    DoublePawnPush,
    KingCastle,
    QueenCastle,
    EnPassant,
    Promotion,
}

/// A move is a plain value: it never references board state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveType,
    /// Set only for `MoveType::Promotion`
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub const fn new(from: Square, to: Square, kind: MoveType) -> Self {
        Self {
            from,
            to,
            kind,
            promotion: None,
        }
    }

    pub const fn promote(from: Square, to: Square, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            kind: MoveType::Promotion,
            promotion: Some(piece),
        }
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveType::KingCastle | MoveType::QueenCastle)
    }
}

/// Convert a Move to coordinate notation (e.g., "e2e4" or "e7e8q")
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

// Geometria arrocco: (king_from, king_to, rook_from, rook_to)
pub const WHITE_KING_CASTLE: (Square, Square, Square, Square) = (4, 6, 7, 5);
pub const WHITE_QUEEN_CASTLE: (Square, Square, Square, Square) = (4, 2, 0, 3);
pub const BLACK_KING_CASTLE: (Square, Square, Square, Square) = (60, 62, 63, 61);
pub const BLACK_QUEEN_CASTLE: (Square, Square, Square, Square) = (60, 58, 56, 59);

pub fn castle_geometry(color: Color, king_side: bool) -> (Square, Square, Square, Square) {
    match (color, king_side) {
        (Color::White, true) => WHITE_KING_CASTLE,
        (Color::White, false) => WHITE_QUEEN_CASTLE,
        (Color::Black, true) => BLACK_KING_CASTLE,
        (Color::Black, false) => BLACK_QUEEN_CASTLE,
    }
}

// Undo entry per rollback: full snapshot of the position before the move
#[derive(Debug, Clone)]
struct UndoFrame {
    state: GameState,
    squares: BoardArray,
}

#[derive(Clone)]
pub struct Board {
    squares: BoardArray,
    state: GameState,
    // One frame per applied move that has not been undone yet
    history: Vec<UndoFrame>,
}

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position
    pub fn new() -> Self {
        let mut squares: BoardArray = [None; 64];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            squares[make_square(file, 0)] = Some(Piece::new(kind, Color::White));
            squares[make_square(file, 1)] = Some(Piece::new(PieceKind::Pawn, Color::White));
            squares[make_square(file, 6)] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            squares[make_square(file, 7)] = Some(Piece::new(kind, Color::Black));
        }
        Self {
            squares,
            state: GameState::default(),
            history: Vec::with_capacity(256),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Self::new();
        board.set_from_fen(fen)?;
        Ok(board)
    }

    /// Piece on `sq`, or None for an empty square.
    ///
    /// Panics if `sq` is not in 0..64.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        assert!(sq < 64, "square index {} out of range", sq);
        self.squares[sq]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// True if `sq` holds a piece of `color`
    #[inline]
    pub fn is_color(&self, sq: Square, color: Color) -> bool {
        matches!(self.piece_at(sq), Some(p) if p.color == color)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.state.castling
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.state.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.state.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.state.fullmove_number
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn squares(&self) -> &BoardArray {
        &self.squares
    }

    /// Number of applied moves that can still be undone
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Apply a (at least pseudo-legal) move, pushing an undo frame.
    ///
    /// Panics if the source square is empty.
    pub fn make_move(&mut self, mv: Move) {
        let Some(piece) = self.squares[mv.from] else {
            panic!("make_move {}: no piece on {}", mv, square_name(mv.from));
        };
        let color = piece.color;

        self.history.push(UndoFrame {
            state: self.state,
            squares: self.squares,
        });

        match mv.kind {
            MoveType::Standard | MoveType::Capture | MoveType::DoublePawnPush => {
                self.squares[mv.to] = Some(piece);
                self.squares[mv.from] = None;
            }
            MoveType::EnPassant => {
                self.squares[mv.to] = Some(piece);
                self.squares[mv.from] = None;
                // il pedone catturato sta dietro la casa di arrivo
                let captured_sq = match color {
                    Color::White => mv.to - 8,
                    Color::Black => mv.to + 8,
                };
                self.squares[captured_sq] = None;
            }
            MoveType::KingCastle | MoveType::QueenCastle => {
                let (king_from, king_to, rook_from, rook_to) =
                    castle_geometry(color, mv.kind == MoveType::KingCastle);
                self.squares[king_from] = None;
                self.squares[rook_from] = None;
                self.squares[king_to] = Some(Piece::new(PieceKind::King, color));
                self.squares[rook_to] = Some(Piece::new(PieceKind::Rook, color));
                self.state.castling.clear(color);
            }
            MoveType::Promotion => {
                let kind = mv.promotion.unwrap_or(PieceKind::Queen);
                self.squares[mv.to] = Some(Piece::new(kind, color));
                self.squares[mv.from] = None;
            }
        }

        // King or rook leaving home, or a rook captured on its corner
        self.state.castling.clear_touching(mv.from);
        self.state.castling.clear_touching(mv.to);

        if piece.kind == PieceKind::Pawn {
            self.state.halfmove_clock = 0;
        } else {
            self.state.halfmove_clock += 1;
        }

        self.state.en_passant = if mv.kind == MoveType::DoublePawnPush {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };

        self.state.side_to_move = color.opposite();
        if color == Color::Black {
            self.state.fullmove_number += 1;
        }
    }

    /// Restore the position from before the most recent `make_move`.
    ///
    /// Panics if there is nothing to undo.
    pub fn unmake_move(&mut self) {
        let Some(frame) = self.history.pop() else {
            panic!("unmake_move called with empty history");
        };
        self.state = frame.state;
        self.squares = frame.squares;
    }

    /// The same position with colors swapped and ranks mirrored
    pub fn color_flipped(&self) -> Board {
        let mut squares: BoardArray = [None; 64];
        for (sq, piece) in self.squares.iter().enumerate() {
            squares[mirror(sq)] = piece.map(|p| Piece::new(p.kind, p.color.opposite()));
        }
        let c = self.state.castling;
        Board {
            squares,
            state: GameState {
                side_to_move: self.state.side_to_move.opposite(),
                castling: CastlingRights {
                    white_king_side: c.black_king_side,
                    white_queen_side: c.black_queen_side,
                    black_king_side: c.white_king_side,
                    black_queen_side: c.white_queen_side,
                },
                en_passant: self.state.en_passant.map(mirror),
                halfmove_clock: self.state.halfmove_clock,
                fullmove_number: self.state.fullmove_number,
            },
            history: Vec::with_capacity(256),
        }
    }
}

// FEN parsing/setter su Board
impl Board {
    /// Replace the position with the one described by `fen`.
    /// The undo history is cleared. The board is left untouched on error.
    pub fn set_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let mut parts = fen.split_whitespace();
        let piece_part = parts.next().ok_or(FenError::MissingField("pieces"))?;
        let side_part = parts.next().ok_or(FenError::MissingField("side"))?;
        let castle_part = parts.next().ok_or(FenError::MissingField("castling"))?;
        let ep_part = parts.next().ok_or(FenError::MissingField("en-passant"))?;
        // Counters are optional in many FEN sources
        let halfmove_part = parts.next().unwrap_or("0");
        let fullmove_part = parts.next().unwrap_or("1");

        // Pieces: rank8 .. rank1
        let mut squares: BoardArray = [None; 64];
        let ranks: Vec<&str> = piece_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadPlacement);
        }
        for (i, rank_part) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0;
            for ch in rank_part.chars() {
                if let Some(run) = ch.to_digit(10) {
                    file += run as usize;
                } else {
                    let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    if file >= 8 {
                        return Err(FenError::BadPlacement);
                    }
                    squares[make_square(file, rank)] = Some(piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadPlacement);
            }
        }

        for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
            let kings = squares
                .iter()
                .filter(|p| **p == Some(Piece::new(PieceKind::King, color)))
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(name));
            }
        }

        let side_to_move = match side_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        for ch in castle_part.chars() {
            match ch {
                'K' => castling.white_king_side = true,
                'Q' => castling.white_queen_side = true,
                'k' => castling.black_king_side = true,
                'q' => castling.black_queen_side = true,
                '-' => {}
                _ => return Err(FenError::InvalidCastling(ch)),
            }
        }

        let en_passant = match ep_part {
            "-" => None,
            s => match (parse_square(s), side_to_move) {
                // il bersaglio sta dietro il pedone appena spinto dall'avversario
                (Some(sq), Color::White) if sq / 8 == 5 => Some(sq),
                (Some(sq), Color::Black) if sq / 8 == 2 => Some(sq),
                _ => return Err(FenError::InvalidEnPassant(s.to_string())),
            },
        };

        let halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| FenError::InvalidCounter(halfmove_part.to_string()))?;
        let fullmove_number = fullmove_part
            .parse()
            .map_err(|_| FenError::InvalidCounter(fullmove_part.to_string()))?;

        self.squares = squares;
        self.state = GameState {
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        self.history.clear();
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.squares[make_square(file, rank)] {
                    Some(p) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        let side = match self.state.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .state
            .en_passant
            .map(square_name)
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {} {} {}",
            fen,
            side,
            self.state.castling.to_fen(),
            ep,
            self.state.halfmove_clock,
            self.state.fullmove_number
        )
    }
}

// Grid + metadata line
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let ch = self.squares[make_square(file, rank)]
                    .map(Piece::to_char)
                    .unwrap_or('.');
                write!(f, "{} ", ch)?;
            }
            writeln!(f, "{}", rank + 1)?;
        }
        writeln!(f, "a b c d e f g h")?;
        let side = match self.state.side_to_move {
            Color::White => "White",
            Color::Black => "Black",
        };
        let ep = self
            .state
            .en_passant
            .map(square_name)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            f,
            "Move: {} | {} to play | Castling: {} | Half moves: {} | En passant: {}",
            self.state.fullmove_number,
            side,
            self.state.castling.to_fen(),
            self.state.halfmove_clock,
            ep
        )
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_matches_start_fen() {
        let board = Board::new();
        assert_eq!(board.to_fen(), START_FEN);
        let parsed = Board::from_fen(START_FEN).unwrap();
        assert_eq!(parsed.squares(), board.squares());
        assert_eq!(parsed.state(), board.state());
    }

    #[test]
    fn fen_round_trip() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.en_passant_square(), Some(43));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn fen_rejects_malformed_input() {
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap_err(),
            FenError::KingCount("white")
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").unwrap_err(),
            FenError::InvalidSide("x".to_string())
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1").unwrap_err(),
            FenError::InvalidPiece('X')
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            FenError::BadPlacement
        );
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenError::InvalidEnPassant(_))
        ));
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1").unwrap_err(),
            FenError::InvalidEnPassant("e3".to_string())
        );
        assert_eq!(
            Board::from_fen("4k3/3pp3/8/8/8/8/8/4K3 b - e6 0 1").unwrap_err(),
            FenError::InvalidEnPassant("e6".to_string())
        );
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w -"),
            Err(FenError::MissingField("en-passant"))
        ));
    }

    #[test]
    fn double_push_sets_en_passant_for_one_ply() {
        let mut board = Board::new();
        board.make_move(Move::new(12, 28, MoveType::DoublePawnPush)); // e2e4
        assert_eq!(board.en_passant_square(), Some(20)); // e3
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.fullmove_number(), 1);
        board.make_move(Move::new(62, 45, MoveType::Standard)); // g8f6
        assert_eq!(board.en_passant_square(), None);
        assert_eq!(board.fullmove_number(), 2);
        assert_eq!(board.halfmove_clock(), 1);
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        board.make_move(Move::new(36, 43, MoveType::EnPassant)); // e5xd6
        assert_eq!(board.piece_at(43), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert!(board.is_empty(35)); // d5 pawn gone
        assert!(board.is_empty(36));
        assert_eq!(board.halfmove_clock(), 0);
    }

    #[test]
    fn halfmove_clock_resets_only_on_pawn_moves() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/r7/R3K3 w - - 7 30").unwrap();
        board.make_move(Move::new(0, 8, MoveType::Capture)); // Rxa2
        assert_eq!(board.halfmove_clock(), 8);
        board.unmake_move();
        assert_eq!(board.halfmove_clock(), 7);

        let mut board =
            Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 12 40").unwrap();
        board.make_move(Move::new(28, 35, MoveType::Capture)); // exd5
        assert_eq!(board.halfmove_clock(), 0);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
        board.make_move(Move::new(4, 6, MoveType::KingCastle));
        assert_eq!(board.piece_at(6), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.piece_at(5), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert!(board.is_empty(7) && board.is_empty(4));
        let rights = board.castling_rights();
        assert!(!rights.white_king_side && !rights.white_queen_side);
        assert!(rights.black_king_side && rights.black_queen_side);

        board.make_move(Move::new(60, 58, MoveType::QueenCastle));
        assert_eq!(board.piece_at(58), Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(board.piece_at(59), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(board.castling_rights(), CastlingRights::NONE);
    }

    #[test]
    fn rook_moves_and_captures_clear_single_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        board.make_move(Move::new(7, 63, MoveType::Capture)); // Rh1xh8
        let rights = board.castling_rights();
        assert!(!rights.white_king_side && rights.white_queen_side);
        assert!(!rights.black_king_side && rights.black_queen_side);
    }

    #[test]
    fn promotion_places_chosen_piece() {
        let mut board = Board::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 5 40").unwrap();
        board.make_move(Move::promote(52, 60, PieceKind::Knight));
        assert_eq!(board.piece_at(60), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert!(board.is_empty(52));
        board.unmake_move();
        assert_eq!(board.piece_at(52), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(board.halfmove_clock(), 5);
    }

    #[test]
    fn unmake_restores_everything() {
        let mut board = Board::new();
        let before_squares = *board.squares();
        let before_state = *board.state();
        board.make_move(Move::new(6, 21, MoveType::Standard));
        board.make_move(Move::new(52, 36, MoveType::DoublePawnPush));
        assert_eq!(board.history_len(), 2);
        board.unmake_move();
        board.unmake_move();
        assert_eq!(board.history_len(), 0);
        assert_eq!(board.squares(), &before_squares);
        assert_eq!(board.state(), &before_state);
    }

    #[test]
    #[should_panic(expected = "empty history")]
    fn unmake_on_empty_history_panics() {
        let mut board = Board::new();
        board.unmake_move();
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn piece_at_out_of_range_panics() {
        let board = Board::new();
        board.piece_at(64);
    }

    #[test]
    fn display_prints_grid_and_metadata() {
        let out = Board::new().to_string();
        assert!(out.starts_with("r n b q k b n r 8\n"));
        assert!(out.contains("a b c d e f g h\n"));
        assert!(out.contains("Move: 1 | White to play | Castling: KQkq | Half moves: 0 | En passant: -"));
    }

    #[test]
    fn color_flip_mirrors_pieces_and_state() {
        let board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3").unwrap();
        let flipped = board.color_flipped();
        assert_eq!(
            flipped.to_fen(),
            "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b Qk d3 0 3"
        );
    }
}
