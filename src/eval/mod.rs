//! Position evaluation.
//!
//! Scores a board from White's point of view: positive favours White,
//! negative favours Black. Decided games score a fixed winning value that no
//! heuristic score can reach.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, MAX_HEURISTIC, REGION_WEIGHT, WINNING_VALUE};
