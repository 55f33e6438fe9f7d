//! Legal move generation.
//!
//! A piece moves along one of its eight lines exactly as many squares as
//! there are pieces, of either side, on the whole line through it. It may
//! jump its own pieces but not the opponent's, and it may not land on one of
//! its own pieces. Landing on an opposing piece captures it.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{all_squares, BoardState, Direction, Move, Square, ALL_DIRECTIONS};

/// Counts the pieces on the full line through `from` along `dir`, in both
/// directions out to the edges, including the piece on `from` itself.
pub fn line_count(state: &BoardState, from: Square, dir: Direction) -> u8 {
    let mut count = u8::from(!state.get(from).is_empty());
    for d in [dir, dir.opposite()] {
        let mut steps = 1;
        while let Some(sq) = from.step(d, steps) {
            if !state.get(sq).is_empty() {
                count += 1;
            }
            steps += 1;
        }
    }
    count
}

/// Returns true if `mv` is legal for the side to move.
pub fn is_legal(state: &BoardState, mv: Move) -> bool {
    let Move { from, to } = mv;
    let dir = match from.direction_to(to) {
        Some(d) => d,
        None => return false,
    };

    let own = state.turn().piece();
    if state.get(from) != own {
        return false;
    }

    let distance = from.distance(to);
    if line_count(state, from, dir) != distance {
        return false;
    }

    let enemy = state.turn().opposite().piece();
    for steps in 1..distance {
        match from.step(dir, steps) {
            Some(sq) if state.get(sq) == enemy => return false,
            Some(_) => {}
            None => return false,
        }
    }

    state.get(to) != own
}

/// Generates every legal move for the side to move.
///
/// Moves come out in a fixed order: source squares in index order, then
/// directions in code order.
pub fn legal_moves(state: &BoardState) -> Vec<Move> {
    let own = state.turn().piece();
    let mut moves = Vec::with_capacity(48);

    for from in all_squares() {
        if state.get(from) != own {
            continue;
        }
        for dir in ALL_DIRECTIONS {
            let count = line_count(state, from, dir);
            let to = match from.step(dir, count) {
                Some(sq) => sq,
                None => continue,
            };
            let mv = Move::new(from, to);
            if is_legal(state, mv) {
                moves.push(mv);
            }
        }
    }

    moves
}

/// Picks a uniformly random legal move, or `None` if the side to move is
/// stuck.
pub fn random_move(state: &BoardState, rng: &mut impl Rng) -> Option<Move> {
    legal_moves(state).choose(rng).copied()
}
