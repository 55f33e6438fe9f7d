//! Square and move notation.
//!
//! Squares are a column letter `a`-`h` followed by a row digit `1`-`8`.
//! Moves are two squares joined by `-`, as in `b1-b3`.

use std::str::FromStr;

use thiserror::Error;

use crate::board::{Move, Square};

/// Errors that can occur when parsing squares and moves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid move '{0}', expected <from>-<to>")]
    InvalidMove(String),

    #[error("{0} and {1} are not on a common line")]
    NotALine(Square, Square),
}

/// Parses a square like `e4`.
pub fn parse_square(s: &str) -> Result<Square, NotationError> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidSquare(s.to_string()));
    }
    let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(NotationError::InvalidSquare(s.to_string()));
    }
    Ok(Square::new(file - b'a', rank - b'1'))
}

/// Parses a move like `b1-b3`.
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let s = s.trim();
    let (from, to) = s
        .split_once('-')
        .ok_or_else(|| NotationError::InvalidMove(s.to_string()))?;
    let from = parse_square(from.trim())?;
    let to = parse_square(to.trim())?;
    Move::try_new(from, to).ok_or(NotationError::NotALine(from, to))
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_square(s)
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}
