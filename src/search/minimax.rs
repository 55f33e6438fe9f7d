//! Unpruned minimax.
//!
//! Visits every node to the given depth. Uses the same move order and the
//! same strict-improvement rule as the alpha-beta search, so both return the
//! same score and the same move; only the node count differs.

use crate::board::{BoardState, Move};
use crate::eval::evaluate;

use super::alphabeta::{SearchResult, Sense, INFINITY};

/// Searches `state` to `depth` plies without pruning.
pub fn minimax(state: &BoardState, depth: u32) -> SearchResult {
    let mut work = state.clone();
    let mut nodes = 0;
    let (score, best_move) = node(&mut work, depth, Sense::for_side(state.turn()), &mut nodes);
    SearchResult {
        best_move,
        score,
        nodes,
        depth,
    }
}

fn node(
    board: &mut BoardState,
    depth: u32,
    sense: Sense,
    nodes: &mut u64,
) -> (i32, Option<Move>) {
    *nodes += 1;
    if depth == 0 || board.game_over() {
        return (evaluate(board), None);
    }
    let moves = board.legal_moves();
    if moves.is_empty() {
        return (evaluate(board), None);
    }

    let mut best = match sense {
        Sense::Max => -INFINITY,
        Sense::Min => INFINITY,
    };
    let mut best_move = None;
    for mv in moves {
        board.make_move(mv);
        let (score, _) = node(board, depth - 1, sense.flip(), nodes);
        board.unmake_move();
        let improves = match sense {
            Sense::Max => score > best,
            Sense::Min => score < best,
        };
        if improves {
            best = score;
            best_move = Some(mv);
        }
    }
    (best, best_move)
}
