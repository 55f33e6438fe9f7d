//! Search and move selection.
//!
//! Alpha-beta minimax over the legal move tree, plus an unpruned minimax
//! that serves as a reference for the pruned search.

pub mod alphabeta;
pub mod minimax;

pub use alphabeta::{
    choose_move, search, SearchError, SearchResult, Sense, DEFAULT_DEPTH, INFINITY,
};
pub use minimax::minimax;
