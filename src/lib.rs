//! Lines of Action engine library.
//!
//! Exposes the board representation, move generation, evaluation, search,
//! protocol and self-play modules for use by integration tests and the
//! binaries.

pub mod board;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;
