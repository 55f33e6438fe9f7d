//! Move types.
//!
//! A `Move` is a source/destination pair along one line of action. The
//! history on a board stores `PlayedMove`s, which also remember what stood on
//! the destination so the move can be retracted.

use std::fmt;

use super::piece::Piece;
use super::square::Square;

/// A piece movement from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a move between two aligned squares.
    pub fn new(from: Square, to: Square) -> Self {
        debug_assert!(from.is_aligned(to), "{}-{} is not along a line", from, to);
        Move { from, to }
    }

    /// Creates a move, or `None` if the squares do not share a line.
    pub fn try_new(from: Square, to: Square) -> Option<Self> {
        if from.is_aligned(to) {
            Some(Move { from, to })
        } else {
            None
        }
    }

    /// Number of squares travelled.
    pub fn length(self) -> u8 {
        self.from.distance(self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// A move as recorded in a board's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayedMove {
    pub mv: Move,
    /// Occupant of the destination before the move: `Empty`, or the
    /// captured opposing piece.
    pub captured: Piece,
}

impl PlayedMove {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}
