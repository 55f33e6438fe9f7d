//! Heuristic position evaluation.
//!
//! A decided game scores `WINNING_VALUE` with White's sign. Otherwise the
//! score is proportional to how many more regions Black has than White:
//! fewer regions means closer to connecting.

use crate::board::{BoardState, Outcome, Side};

/// Score magnitude of a won game.
pub const WINNING_VALUE: i32 = i32::MAX - 20;

/// Points per region of difference between the two sides.
pub const REGION_WEIGHT: i32 = 100;

/// A side has at most 12 pieces, so at most 12 regions, and needs at least
/// one to be in the game. The difference never exceeds 11 regions.
const MAX_REGION_DIFF: i32 = 11;

/// Largest magnitude the heuristic can return.
pub const MAX_HEURISTIC: i32 = REGION_WEIGHT * MAX_REGION_DIFF;

const _: () = assert!(MAX_HEURISTIC < WINNING_VALUE / 2);

/// Evaluates `state` from White's point of view.
pub fn evaluate(state: &BoardState) -> i32 {
    match state.winner() {
        Some(Outcome::Win(Side::White)) => WINNING_VALUE,
        Some(Outcome::Win(Side::Black)) => -WINNING_VALUE,
        Some(Outcome::Tie) => 0,
        None => region_score(state),
    }
}

/// Region-count difference, scaled. Positive when Black is more scattered.
fn region_score(state: &BoardState) -> i32 {
    let black = state.region_count(Side::Black) as i32;
    let white = state.region_count(Side::White) as i32;
    ((black - white) * REGION_WEIGHT).clamp(-MAX_HEURISTIC, MAX_HEURISTIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Square};

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row)
    }

    #[test]
    fn initial_position_is_balanced() {
        assert_eq!(evaluate(&BoardState::new()), 0);
    }

    #[test]
    fn fewer_regions_is_better() {
        let mut state = BoardState::empty(Side::Black);
        for (c, r) in [(0, 0), (3, 0), (6, 0)] {
            state.set(sq(c, r), Piece::Black);
        }
        for (c, r) in [(0, 7), (0, 6), (5, 7)] {
            state.set(sq(c, r), Piece::White);
        }
        // Black: three regions, White: two.
        assert_eq!(evaluate(&state), REGION_WEIGHT);

        state.set(sq(5, 7), Piece::Empty);
        state.set(sq(7, 3), Piece::White);
        state.set(sq(7, 5), Piece::White);
        // White now has three regions as well.
        assert_eq!(evaluate(&state), 0);
    }

    #[test]
    fn decided_games_score_the_winning_value() {
        let mut state = BoardState::empty(Side::White);
        state.set(sq(0, 0), Piece::Black);
        state.set(sq(1, 1), Piece::Black);
        state.set(sq(4, 4), Piece::White);
        state.set(sq(6, 6), Piece::White);
        assert_eq!(evaluate(&state), -WINNING_VALUE);

        state.set(sq(5, 5), Piece::White);
        // Both connected with White to move: Black made the last move.
        assert_eq!(evaluate(&state), -WINNING_VALUE);

        state.set_turn(Side::Black);
        assert_eq!(evaluate(&state), WINNING_VALUE);
    }

    #[test]
    fn tie_scores_zero() {
        let mut state = BoardState::new();
        state.set_move_limit(1).unwrap();
        let mv = state.legal_moves()[0];
        state.apply_move(mv).unwrap();
        let reply = state.legal_moves()[0];
        state.apply_move(reply).unwrap();
        assert_eq!(state.winner(), Some(Outcome::Tie));
        assert_eq!(evaluate(&state), 0);
    }

    #[test]
    fn heuristic_stays_below_winning_value() {
        let mut state = BoardState::empty(Side::Black);
        for i in 0..4u8 {
            state.set(sq(i * 2, 0), Piece::Black);
            state.set(sq(i * 2, 2), Piece::Black);
            state.set(sq(i * 2, 4), Piece::Black);
        }
        state.set(sq(7, 7), Piece::White);
        state.set(sq(6, 7), Piece::White);
        state.set(sq(7, 6), Piece::White);
        state.set(sq(3, 7), Piece::White);
        let score = evaluate(&state);
        assert!(score > 0 && score <= MAX_HEURISTIC, "{}", score);
    }
}
