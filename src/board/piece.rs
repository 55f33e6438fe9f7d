//! Pieces and sides.
//!
//! A `Piece` is the content of a square; a `Side` is one of the two players.
//! Every non-empty piece belongs to exactly one side.

use std::fmt;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

/// Both sides, Black first.
pub const ALL_SIDES: [Side; 2] = [Side::Black, Side::White];

impl Side {
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Returns the piece this side plays with.
    #[inline]
    pub const fn piece(self) -> Piece {
        match self {
            Side::Black => Piece::Black,
            Side::White => Piece::White,
        }
    }

    /// Returns the lowercase full name used in protocol output.
    pub const fn name(self) -> &'static str {
        match self {
            Side::Black => "black",
            Side::White => "white",
        }
    }

    /// Parses a side from its full name or single-letter abbreviation.
    pub fn from_name(s: &str) -> Option<Side> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Some(Side::Black),
            "white" | "w" => Some(Side::White),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    Black,
    White,
}

impl Piece {
    /// Returns the opposing piece. Empty has no opposite.
    #[inline]
    pub const fn opposite(self) -> Option<Piece> {
        match self {
            Piece::Black => Some(Piece::White),
            Piece::White => Some(Piece::Black),
            Piece::Empty => None,
        }
    }

    /// Returns the side owning this piece, if any.
    #[inline]
    pub const fn side(self) -> Option<Side> {
        match self {
            Piece::Black => Some(Side::Black),
            Piece::White => Some(Side::White),
            Piece::Empty => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// Single-character abbreviation used in board rendering and position
    /// strings.
    pub const fn abbrev(self) -> char {
        match self {
            Piece::Empty => '-',
            Piece::Black => 'b',
            Piece::White => 'w',
        }
    }

    /// Parses a piece from its abbreviation.
    pub fn from_abbrev(c: char) -> Option<Piece> {
        match c {
            '-' => Some(Piece::Empty),
            'b' => Some(Piece::Black),
            'w' => Some(Piece::White),
            _ => None,
        }
    }
}
