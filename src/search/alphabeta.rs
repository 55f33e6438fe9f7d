//! Alpha-beta search.
//!
//! Fixed-depth minimax with alpha-beta pruning. Scores are from White's
//! point of view, so White's levels maximise and Black's minimise. The
//! search copies the caller's board once and then plays and retracts moves
//! on that copy, so the caller's board is never touched.

use std::io::{self, Write};
use std::time::Instant;

use thiserror::Error;

use crate::board::{BoardState, Move, Outcome, Side};
use crate::eval::evaluate;

/// Bound wider than any score the evaluator can produce.
pub const INFINITY: i32 = i32::MAX;

/// Search depth in plies when none is configured.
pub const DEFAULT_DEPTH: u32 = 3;

/// Errors from asking the search for a move.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("game is already over: {0}")]
    GameOver(Outcome),

    #[error("{0} has no legal moves")]
    NoLegalMoves(Side),
}

/// Whether a search level maximises or minimises the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Max,
    Min,
}

impl Sense {
    /// White maximises, Black minimises.
    pub const fn for_side(side: Side) -> Sense {
        match side {
            Side::White => Sense::Max,
            Side::Black => Sense::Min,
        }
    }

    pub const fn flip(self) -> Sense {
        match self {
            Sense::Max => Sense::Min,
            Sense::Min => Sense::Max,
        }
    }
}

/// Result of a search: the chosen move and associated info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Move chosen at the root. `None` at depth 0, in a finished game, or
    /// when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
    pub depth: u32,
}

/// Per-search state.
struct Searcher {
    nodes: u64,
    found: Option<Move>,
}

impl Searcher {
    fn new() -> Self {
        Searcher {
            nodes: 0,
            found: None,
        }
    }

    /// Scores `board` searching `depth` plies, recording the best move in
    /// `self.found` when `save_move` is set.
    ///
    /// The returned score is exact when it falls strictly inside
    /// `(alpha, beta)`; otherwise it is a bound on the true value on the
    /// same side of the window.
    fn find_move(
        &mut self,
        board: &mut BoardState,
        depth: u32,
        save_move: bool,
        sense: Sense,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if depth == 0 || board.game_over() {
            return evaluate(board);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return evaluate(board);
        }

        let mut best_move = None;
        let best = match sense {
            Sense::Max => {
                let mut best = alpha;
                for mv in moves {
                    board.make_move(mv);
                    let score = self.find_move(board, depth - 1, false, sense.flip(), alpha, beta);
                    board.unmake_move();
                    if score > best {
                        best = score;
                        best_move = Some(mv);
                        alpha = alpha.max(best);
                        if alpha >= beta {
                            break;
                        }
                    }
                }
                best
            }
            Sense::Min => {
                let mut best = beta;
                for mv in moves {
                    board.make_move(mv);
                    let score = self.find_move(board, depth - 1, false, sense.flip(), alpha, beta);
                    board.unmake_move();
                    if score < best {
                        best = score;
                        best_move = Some(mv);
                        beta = beta.min(best);
                        if alpha >= beta {
                            break;
                        }
                    }
                }
                best
            }
        };

        if save_move {
            self.found = best_move;
        }
        best
    }
}

/// Searches `state` to `depth` plies for the side to move and writes one
/// `info` line to `out`.
pub fn search<W: Write>(state: &BoardState, depth: u32, out: &mut W) -> SearchResult {
    let start = Instant::now();
    let mut work = state.clone();
    let mut searcher = Searcher::new();
    let sense = Sense::for_side(state.turn());
    let score = searcher.find_move(&mut work, depth, true, sense, -INFINITY, INFINITY);
    debug_assert_eq!(&work, state);

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let _ = match searcher.found {
        Some(mv) => writeln!(
            out,
            "info depth {} nodes {} score {} time {} pv {}",
            depth, searcher.nodes, score, elapsed_ms, mv
        ),
        None => writeln!(
            out,
            "info depth {} nodes {} score {} time {}",
            depth, searcher.nodes, score, elapsed_ms
        ),
    };

    SearchResult {
        best_move: searcher.found,
        score,
        nodes: searcher.nodes,
        depth,
    }
}

/// Chooses a move for the side to move, searching at least one ply.
pub fn choose_move(state: &BoardState, depth: u32) -> Result<Move, SearchError> {
    if let Some(outcome) = state.winner() {
        return Err(SearchError::GameOver(outcome));
    }
    let result = search(state, depth.max(1), &mut io::sink());
    result
        .best_move
        .ok_or(SearchError::NoLegalMoves(state.turn()))
}
