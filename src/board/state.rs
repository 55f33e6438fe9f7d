//! Game state representation.
//!
//! Holds the piece grid, the side to move, the move history and the move
//! limit. Region sizes and the winner are derived lazily and cached until the
//! next mutation of the grid.

use std::cell::OnceCell;
use std::fmt;

use thiserror::Error;

use super::moves::{Move, PlayedMove};
use super::outcome::{self, Outcome};
use super::piece::{Piece, Side};
use super::region::RegionSizes;
use super::square::{Square, BOARD_SIZE, SQUARE_COUNT};
use crate::movegen;

/// Default number of moves per side before the game is declared a tie.
pub const DEFAULT_MOVE_LIMIT: usize = 60;

/// Errors from mutating a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("no moves to undo")]
    EmptyHistory,

    #[error("move limit {limit} per side does not cover the {moves_made} moves already played")]
    MoveLimitTooSmall { limit: usize, moves_made: usize },
}

/// Complete state of a game at a point in time.
///
/// Clone to get an independent copy; the caches travel with it.
#[derive(Debug, Clone)]
pub struct BoardState {
    squares: [Piece; SQUARE_COUNT],
    turn: Side,
    history: Vec<PlayedMove>,
    /// Moves per side before a tie.
    move_limit: usize,
    winner: OnceCell<Option<Outcome>>,
    regions: OnceCell<RegionSizes>,
}

impl BoardState {
    /// Creates a board in the standard starting position, Black to move.
    pub fn new() -> Self {
        let mut state = BoardState::empty(Side::Black);
        for i in 1..BOARD_SIZE as u8 - 1 {
            state.squares[Square::new(i, 0).index()] = Piece::Black;
            state.squares[Square::new(i, 7).index()] = Piece::Black;
            state.squares[Square::new(0, i).index()] = Piece::White;
            state.squares[Square::new(7, i).index()] = Piece::White;
        }
        state
    }

    /// Creates a board with no pieces and `turn` to move.
    pub fn empty(turn: Side) -> Self {
        BoardState {
            squares: [Piece::Empty; SQUARE_COUNT],
            turn,
            history: Vec::new(),
            move_limit: DEFAULT_MOVE_LIMIT,
            winner: OnceCell::new(),
            regions: OnceCell::new(),
        }
    }

    /// Returns the contents of a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    /// Places `piece` on `sq` for position setup. Does not touch the history
    /// or the turn.
    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = piece;
        self.invalidate();
    }

    /// Sets the side to move for position setup.
    pub fn set_turn(&mut self, turn: Side) {
        self.turn = turn;
        self.invalidate();
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Number of moves played and not retracted.
    pub fn moves_made(&self) -> usize {
        self.history.len()
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// Move limit per side.
    pub fn move_limit(&self) -> usize {
        self.move_limit
    }

    /// Sets the number of moves per side after which the game is tied.
    ///
    /// The limit must leave room for at least one more move:
    /// `2 * limit > moves_made()`.
    pub fn set_move_limit(&mut self, limit: usize) -> Result<(), BoardError> {
        let moves_made = self.moves_made();
        if 2 * limit <= moves_made {
            return Err(BoardError::MoveLimitTooSmall { limit, moves_made });
        }
        self.move_limit = limit;
        self.winner.take();
        Ok(())
    }

    /// Number of pieces of `side` on the board.
    pub fn piece_count(&self, side: Side) -> usize {
        let piece = side.piece();
        self.squares.iter().filter(|&&p| p == piece).count()
    }

    /// Returns true if `mv` is legal for the side to move.
    pub fn is_legal(&self, mv: Move) -> bool {
        movegen::is_legal(self, mv)
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    /// Plays `mv` for the side to move.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.is_legal(mv) {
            return Err(BoardError::IllegalMove(mv));
        }
        self.make_move(mv);
        Ok(())
    }

    /// Plays a move already known to be legal. Used by search on moves taken
    /// straight from `legal_moves`.
    pub(crate) fn make_move(&mut self, mv: Move) {
        debug_assert!(self.is_legal(mv), "make_move on illegal {}", mv);
        let captured = self.squares[mv.to.index()];
        self.squares[mv.to.index()] = self.squares[mv.from.index()];
        self.squares[mv.from.index()] = Piece::Empty;
        self.history.push(PlayedMove { mv, captured });
        self.turn = self.turn.opposite();
        self.invalidate();
    }

    /// Retracts the most recent move, returning it.
    pub fn undo_last_move(&mut self) -> Result<Move, BoardError> {
        self.unmake_move()
            .map(|played| played.mv)
            .ok_or(BoardError::EmptyHistory)
    }

    /// Retracts the most recent move, if any.
    pub(crate) fn unmake_move(&mut self) -> Option<PlayedMove> {
        let played = self.history.pop()?;
        let PlayedMove { mv, captured } = played;
        self.squares[mv.from.index()] = self.squares[mv.to.index()];
        self.squares[mv.to.index()] = captured;
        self.turn = self.turn.opposite();
        self.invalidate();
        Some(played)
    }

    /// Region sizes of `side`, largest first.
    pub fn region_sizes(&self, side: Side) -> &[usize] {
        self.regions().for_side(side)
    }

    /// Number of separate regions `side` has.
    pub fn region_count(&self, side: Side) -> usize {
        self.region_sizes(side).len()
    }

    /// Returns true if all of `side`'s pieces form one region.
    pub fn pieces_contiguous(&self, side: Side) -> bool {
        self.region_count(side) == 1
    }

    /// Returns the outcome if the game is over, `None` while it continues.
    pub fn winner(&self) -> Option<Outcome> {
        *self.winner.get_or_init(|| {
            outcome::decide(
                self.pieces_contiguous(Side::Black),
                self.pieces_contiguous(Side::White),
                self.turn,
                self.moves_made(),
                2 * self.move_limit,
            )
        })
    }

    pub fn game_over(&self) -> bool {
        self.winner().is_some()
    }

    fn regions(&self) -> &RegionSizes {
        self.regions.get_or_init(|| RegionSizes::compute(&self.squares))
    }

    /// Marks the derived caches stale after a grid or turn change.
    fn invalidate(&mut self) {
        self.winner.take();
        self.regions.take();
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::new()
    }
}

/// Boards compare by position and history; caches are derived data.
impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.turn == other.turn
            && self.history == other.history
            && self.move_limit == other.move_limit
    }
}

impl Eq for BoardState {}

/// Renders the board from row 8 down to row 1 followed by the side to move.
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===")?;
        for row in (0..BOARD_SIZE as u8).rev() {
            write!(f, "    ")?;
            for col in 0..BOARD_SIZE as u8 {
                write!(f, "{} ", self.get(Square::new(col, row)).abbrev())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Next move: {}", self.turn)?;
        write!(f, "===")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row)
    }

    #[test]
    fn initial_layout() {
        let state = BoardState::new();
        assert_eq!(state.turn(), Side::Black);
        assert_eq!(state.piece_count(Side::Black), 12);
        assert_eq!(state.piece_count(Side::White), 12);
        assert_eq!(state.get(sq(0, 0)), Piece::Empty);
        assert_eq!(state.get(sq(1, 0)), Piece::Black);
        assert_eq!(state.get(sq(0, 1)), Piece::White);
        assert_eq!(state.get(sq(7, 7)), Piece::Empty);
        assert_eq!(state.move_limit(), DEFAULT_MOVE_LIMIT);
    }

    #[test]
    fn initial_position_is_not_contiguous() {
        let state = BoardState::new();
        assert!(!state.pieces_contiguous(Side::Black));
        assert!(!state.pieces_contiguous(Side::White));
        assert_eq!(state.region_sizes(Side::Black), &[6, 6]);
        assert_eq!(state.region_sizes(Side::White), &[6, 6]);
        assert_eq!(state.winner(), None);
        assert!(!state.game_over());
    }

    #[test]
    fn apply_move_relocates_and_flips_turn() {
        let mut state = BoardState::new();
        let mv = Move::new(sq(1, 0), sq(1, 2));
        state.apply_move(mv).unwrap();
        assert_eq!(state.get(sq(1, 0)), Piece::Empty);
        assert_eq!(state.get(sq(1, 2)), Piece::Black);
        assert_eq!(state.turn(), Side::White);
        assert_eq!(state.moves_made(), 1);
        assert_eq!(state.history()[0], PlayedMove { mv, captured: Piece::Empty });
    }

    #[test]
    fn apply_rejects_illegal_move() {
        let mut state = BoardState::new();
        // Only two pieces on the b-file, so b1 cannot travel three squares.
        let mv = Move::new(sq(1, 0), sq(1, 3));
        assert_eq!(state.apply_move(mv), Err(BoardError::IllegalMove(mv)));
        assert_eq!(state, BoardState::new());
    }

    #[test]
    fn apply_then_undo_restores_state() {
        let original = BoardState::new();
        for mv in original.legal_moves() {
            let mut state = original.clone();
            state.apply_move(mv).unwrap();
            assert_eq!(state.undo_last_move(), Ok(mv));
            assert_eq!(state, original);
            assert_eq!(state.region_sizes(Side::Black), original.region_sizes(Side::Black));
            assert_eq!(state.region_sizes(Side::White), original.region_sizes(Side::White));
            assert_eq!(state.winner(), original.winner());
        }
    }

    #[test]
    fn capture_and_undo() {
        let mut state = BoardState::empty(Side::White);
        state.set(sq(0, 3), Piece::White);
        state.set(sq(2, 3), Piece::Black);
        state.set(sq(7, 7), Piece::Black);
        state.set(sq(7, 0), Piece::White);
        let before = state.clone();

        let mv = Move::new(sq(0, 3), sq(2, 3));
        state.apply_move(mv).unwrap();
        assert_eq!(state.get(sq(2, 3)), Piece::White);
        assert_eq!(state.piece_count(Side::Black), 1);
        assert!(state.history()[0].is_capture());

        state.undo_last_move().unwrap();
        assert_eq!(state, before);
        assert_eq!(state.get(sq(2, 3)), Piece::Black);
        assert_eq!(state.piece_count(Side::Black), 2);
    }

    #[test]
    fn undo_on_empty_history_is_an_error() {
        let mut state = BoardState::new();
        assert_eq!(state.undo_last_move(), Err(BoardError::EmptyHistory));
        assert_eq!(state, BoardState::new());
    }

    #[test]
    fn move_limit_must_cover_played_moves() {
        let mut state = BoardState::new();
        let mv = state.legal_moves()[0];
        state.apply_move(mv).unwrap();
        let reply = state.legal_moves()[0];
        state.apply_move(reply).unwrap();

        assert_eq!(
            state.set_move_limit(1),
            Err(BoardError::MoveLimitTooSmall { limit: 1, moves_made: 2 })
        );
        assert_eq!(state.move_limit(), DEFAULT_MOVE_LIMIT);
        assert!(state.set_move_limit(2).is_ok());
        assert_eq!(state.move_limit(), 2);
    }

    #[test]
    fn tie_at_move_limit() {
        let mut state = BoardState::new();
        state.set_move_limit(1).unwrap();
        let mv = state.legal_moves()[0];
        state.apply_move(mv).unwrap();
        assert_eq!(state.winner(), None);
        let reply = state.legal_moves()[0];
        state.apply_move(reply).unwrap();
        assert_eq!(state.winner(), Some(Outcome::Tie));
        assert!(state.game_over());

        state.undo_last_move().unwrap();
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn consolidated_side_wins() {
        let mut state = BoardState::empty(Side::Black);
        for (c, r) in [(3, 3), (3, 4), (4, 4), (5, 5)] {
            state.set(sq(c, r), Piece::White);
        }
        for (c, r) in [(0, 0), (7, 7), (0, 7)] {
            state.set(sq(c, r), Piece::Black);
        }
        assert!(state.pieces_contiguous(Side::White));
        assert!(!state.pieces_contiguous(Side::Black));
        assert_eq!(state.winner(), Some(Outcome::Win(Side::White)));
    }

    #[test]
    fn set_invalidates_caches() {
        let mut state = BoardState::empty(Side::Black);
        state.set(sq(0, 0), Piece::Black);
        state.set(sq(5, 5), Piece::Black);
        state.set(sq(3, 0), Piece::White);
        state.set(sq(6, 0), Piece::White);
        assert_eq!(state.region_count(Side::Black), 2);
        assert_eq!(state.winner(), None);

        state.set(sq(5, 5), Piece::Empty);
        assert_eq!(state.region_count(Side::Black), 1);
        assert_eq!(state.winner(), Some(Outcome::Win(Side::Black)));
    }

    #[test]
    fn both_connected_after_move_credits_mover() {
        // White e6 captures the stray black piece on e4, which connects White
        // and leaves Black's remaining pair connected as well.
        let mut state = BoardState::empty(Side::White);
        state.set(sq(0, 0), Piece::Black);
        state.set(sq(1, 0), Piece::Black);
        state.set(sq(4, 3), Piece::Black);
        state.set(sq(4, 5), Piece::White);
        state.set(sq(3, 2), Piece::White);
        assert_eq!(state.winner(), None);

        state.apply_move(Move::new(sq(4, 5), sq(4, 3))).unwrap();
        assert!(state.pieces_contiguous(Side::Black));
        assert!(state.pieces_contiguous(Side::White));
        assert_eq!(state.winner(), Some(Outcome::Win(Side::White)));
    }

    #[test]
    fn display_matches_reference_layout() {
        let state = BoardState::new();
        let expected = "===\n\
            \x20   - b b b b b b - \n\
            \x20   w - - - - - - w \n\
            \x20   w - - - - - - w \n\
            \x20   w - - - - - - w \n\
            \x20   w - - - - - - w \n\
            \x20   w - - - - - - w \n\
            \x20   w - - - - - - w \n\
            \x20   - b b b b b b - \n\
            Next move: black\n\
            ===";
        assert_eq!(state.to_string(), expected);
    }
}
