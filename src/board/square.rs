//! Square geometry for the 8x8 board.
//!
//! Squares are addressed by column and row, both 0..8, with column 0 printed
//! as `a` and row 0 printed as `1`. Directions are the eight compass lines a
//! piece can travel along; the opposite of each direction comes from a
//! constant table.

use std::fmt;

/// Number of squares along one edge of the board.
pub const BOARD_SIZE: usize = 8;

/// Total number of squares on the board.
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the eight lines of travel from a square.
///
/// Discriminants are the direction codes, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

/// All directions in code order.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::N,
    Direction::NE,
    Direction::E,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
];

/// Opposite direction, indexed by direction code.
const OPPOSITE: [Direction; 8] = [
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
    Direction::N,
    Direction::NE,
    Direction::E,
    Direction::SE,
];

/// Column and row deltas, indexed by direction code.
const DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

impl Direction {
    /// Returns the direction pointing the other way along the same line.
    #[inline]
    pub const fn opposite(self) -> Direction {
        OPPOSITE[self as usize]
    }

    /// Returns the (column, row) step for one square of travel.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        DELTAS[self as usize]
    }

    /// Looks up a direction from its code.
    pub fn from_code(code: u8) -> Option<Direction> {
        ALL_DIRECTIONS.get(code as usize).copied()
    }

    /// Maps a unit step back to its direction.
    fn from_delta(dc: i8, dr: i8) -> Option<Direction> {
        DELTAS
            .iter()
            .position(|&d| d == (dc, dr))
            .map(|i| ALL_DIRECTIONS[i])
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    index: u8,
}

impl Square {
    /// Creates a square from column and row, both in 0..8.
    #[inline]
    pub const fn new(col: u8, row: u8) -> Self {
        debug_assert!((col as usize) < BOARD_SIZE && (row as usize) < BOARD_SIZE);
        Square {
            index: row * BOARD_SIZE as u8 + col,
        }
    }

    /// Creates a square from signed coordinates, or `None` if off the board.
    #[inline]
    pub fn try_new(col: i32, row: i32) -> Option<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&col) && (0..size).contains(&row) {
            Some(Square::new(col as u8, row as u8))
        } else {
            None
        }
    }

    /// Creates a square from its grid index.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < SQUARE_COUNT);
        Square { index: index as u8 }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.index % BOARD_SIZE as u8
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.index / BOARD_SIZE as u8
    }

    /// Returns the square `steps` squares away in `dir`, or `None` if that
    /// leaves the board.
    #[inline]
    pub fn step(self, dir: Direction, steps: u8) -> Option<Square> {
        let (dc, dr) = dir.delta();
        let steps = steps as i32;
        Square::try_new(
            self.col() as i32 + dc as i32 * steps,
            self.row() as i32 + dr as i32 * steps,
        )
    }

    /// Returns true if `to` is a different square on the same rank, file or
    /// diagonal.
    pub fn is_aligned(self, to: Square) -> bool {
        self.direction_to(to).is_some()
    }

    /// Returns the direction from this square to `to`, or `None` if the two
    /// are not on a common line (or are the same square).
    pub fn direction_to(self, to: Square) -> Option<Direction> {
        let dc = to.col() as i8 - self.col() as i8;
        let dr = to.row() as i8 - self.row() as i8;
        if dc == 0 && dr == 0 {
            return None;
        }
        if dc != 0 && dr != 0 && dc.abs() != dr.abs() {
            return None;
        }
        Direction::from_delta(dc.signum(), dr.signum())
    }

    /// Number of steps between this square and `to`. Only meaningful along a
    /// line, where it equals the count of single-square moves needed.
    pub fn distance(self, to: Square) -> u8 {
        let dc = (to.col() as i8 - self.col() as i8).unsigned_abs();
        let dr = (to.row() as i8 - self.row() as i8).unsigned_abs();
        dc.max(dr)
    }

    /// Iterates over the in-board neighbours of this square.
    pub fn adjacent(self) -> impl Iterator<Item = Square> {
        ALL_DIRECTIONS.into_iter().filter_map(move |d| self.step(d, 1))
    }

    /// Column letter, `a`..`h`.
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Row digit, `1`..`8`.
    pub const fn rank_char(self) -> char {
        (b'1' + self.row()) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// All squares in index order (row-major from `a1`).
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..SQUARE_COUNT).map(Square::from_index)
}
