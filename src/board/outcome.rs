//! Game outcome.
//!
//! A game ends when a side's pieces form a single region, or in a tie when
//! the move limit runs out first. If one move leaves both sides connected,
//! the side that made it wins.

use std::fmt;

use super::piece::Side;

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Side),
    Tie,
}

impl Outcome {
    /// Returns the winning side, or `None` for a tie.
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(side),
            Outcome::Tie => None,
        }
    }

    /// Lowercase name used by the protocol and self-play records.
    pub const fn name(self) -> &'static str {
        match self {
            Outcome::Win(side) => side.name(),
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decides the outcome from connectivity and move count.
///
/// `to_move` is the side whose turn it is now, so the side that just moved
/// is its opposite.
pub fn decide(
    black_contiguous: bool,
    white_contiguous: bool,
    to_move: Side,
    moves_made: usize,
    half_move_limit: usize,
) -> Option<Outcome> {
    match (black_contiguous, white_contiguous) {
        (true, true) => Some(Outcome::Win(to_move.opposite())),
        (true, false) => Some(Outcome::Win(Side::Black)),
        (false, true) => Some(Outcome::Win(Side::White)),
        (false, false) if moves_made >= half_move_limit => Some(Outcome::Tie),
        (false, false) => None,
    }
}
