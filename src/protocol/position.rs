//! Position strings.
//!
//! A position is written as eight ranks from row 8 down to row 1, separated
//! by `/`, followed by the side to move:
//!
//! ```text
//! 1bbbbbb1/w6w/w6w/w6w/w6w/w6w/w6w/1bbbbbb1 b
//! ```
//!
//! Within a rank `b` and `w` are pieces and the digits `1`-`8` are runs of
//! empty squares. Every rank must cover exactly eight squares.

use thiserror::Error;

use crate::board::{BoardState, Piece, Side, Square, BOARD_SIZE};

/// The standard initial position.
pub const START_POSITION: &str = "1bbbbbb1/w6w/w6w/w6w/w6w/w6w/w6w/1bbbbbb1 b";

/// Errors that can occur when parsing a position string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} covers {squares} squares, expected 8")]
    RankLength { rank: usize, squares: usize },

    #[error("invalid character '{0}' in position")]
    InvalidChar(char),

    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
}

/// Builds a board from a layout and a side to move (`b`/`w` or the full
/// name).
pub fn parse_position(layout: &str, side: &str) -> Result<BoardState, PositionError> {
    let turn = Side::from_name(side).ok_or_else(|| PositionError::InvalidSide(side.to_string()))?;
    let ranks: Vec<&str> = layout.split('/').collect();
    if ranks.len() != BOARD_SIZE {
        return Err(PositionError::RankCount(ranks.len()));
    }

    let mut state = BoardState::empty(turn);
    for (i, rank) in ranks.iter().enumerate() {
        let row = (BOARD_SIZE - 1 - i) as u8;
        let rank_no = BOARD_SIZE - i;
        let mut col = 0usize;
        for c in rank.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(PositionError::InvalidChar(c));
                }
                col += run as usize;
                continue;
            }
            let piece = match Piece::from_abbrev(c) {
                Some(p) if !p.is_empty() => p,
                _ => return Err(PositionError::InvalidChar(c)),
            };
            if col >= BOARD_SIZE {
                return Err(PositionError::RankLength {
                    rank: rank_no,
                    squares: col + 1,
                });
            }
            state.set(Square::new(col as u8, row), piece);
            col += 1;
        }
        if col != BOARD_SIZE {
            return Err(PositionError::RankLength {
                rank: rank_no,
                squares: col,
            });
        }
    }
    Ok(state)
}

/// Parses a full position string: layout and side separated by whitespace.
pub fn parse_position_str(s: &str) -> Result<BoardState, PositionError> {
    let mut parts = s.split_whitespace();
    let layout = parts.next().unwrap_or("");
    let side = parts.next().unwrap_or("");
    parse_position(layout, side)
}

/// Encodes the grid and side to move of `state`.
pub fn encode_position(state: &BoardState) -> String {
    let mut out = String::with_capacity(48);
    for row in (0..BOARD_SIZE as u8).rev() {
        let mut empty = 0;
        for col in 0..BOARD_SIZE as u8 {
            let piece = state.get(Square::new(col, row));
            if piece.is_empty() {
                empty += 1;
                continue;
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
                empty = 0;
            }
            out.push(piece.abbrev());
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if row > 0 {
            out.push('/');
        }
    }
    out.push(' ');
    out.push(match state.turn() {
        Side::Black => 'b',
        Side::White => 'w',
    });
    out
}
