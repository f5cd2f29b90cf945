// Square helpers and direction tables for the mailbox move generator.
// Mapping: A1=0, B1=1, ..., H8=63. rank = sq / 8, file = sq % 8.

pub type Square = usize;

// Direction deltas for sliding moves
pub const NORTH: i8 = 8;
pub const SOUTH: i8 = -8;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;
pub const NORTH_EAST: i8 = 9;
pub const NORTH_WEST: i8 = 7;
pub const SOUTH_EAST: i8 = -7;
pub const SOUTH_WEST: i8 = -9;

pub const ORTHOGONAL_DIRS: [i8; 4] = [NORTH, SOUTH, EAST, WEST];
pub const DIAGONAL_DIRS: [i8; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];
pub const ALL_DIRS: [i8; 8] = [
    NORTH, SOUTH, EAST, WEST, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST,
];

pub const KNIGHT_OFFSETS: [i8; 8] = [17, 15, 10, 6, -6, -10, -15, -17];
pub const KING_OFFSETS: [i8; 8] = ALL_DIRS;

/// Maximum file shift a single step of each leaper/slider may produce.
/// Anything larger means the step wrapped around a board edge.
pub const SLIDER_FILE_SHIFT: usize = 1;
pub const KNIGHT_FILE_SHIFT: usize = 2;

#[inline]
pub fn rank_of(sq: Square) -> usize {
    sq / 8
}

#[inline]
pub fn file_of(sq: Square) -> usize {
    sq % 8
}

#[inline]
pub fn make_square(file: usize, rank: usize) -> Square {
    rank * 8 + file
}

/// Vertical mirror (a1 <-> a8), used to read white tables for black pieces
#[inline]
pub fn mirror(sq: Square) -> Square {
    sq ^ 56
}

/// Step from `from` by `delta`. Returns None when the target falls off the
/// board or the file changes by more than `max_file_shift` (edge wraparound,
/// e.g. a1 + 15 landing on h2).
#[inline]
pub fn step(from: Square, delta: i8, max_file_shift: usize) -> Option<Square> {
    let to = from as i16 + delta as i16;
    if !(0..64).contains(&to) {
        return None;
    }
    let to = to as Square;
    if file_of(from).abs_diff(file_of(to)) > max_file_shift {
        return None;
    }
    Some(to)
}

/// Iterator over the squares of a ray, stopping at the board edge.
/// The origin square is not included.
pub struct Ray {
    current: Square,
    delta: i8,
}

impl Iterator for Ray {
    type Item = Square;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let next = step(self.current, self.delta, SLIDER_FILE_SHIFT)?;
        self.current = next;
        Some(next)
    }
}

#[inline]
pub fn ray(from: Square, delta: i8) -> Ray {
    Ray {
        current: from,
        delta,
    }
}

/// Convert a square index (0-63) to coordinate notation (e.g., 0 -> "a1", 63 -> "h8")
pub fn square_name(sq: Square) -> String {
    let file_char = (b'a' + file_of(sq) as u8) as char;
    let rank_char = (b'1' + rank_of(sq) as u8) as char;
    format!("{}{}", file_char, rank_char)
}

/// Convert coordinate notation to a square index (e.g., "e2" -> 12, "a1" -> 0)
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(make_square((file - b'a') as usize, (rank - b'1') as usize))
}
