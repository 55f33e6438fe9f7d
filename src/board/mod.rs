//! Board representation and game-state types.
//!
//! Contains squares and directions, pieces and sides, moves, region
//! analysis, the outcome rules and the overall game state.

pub mod moves;
pub mod outcome;
pub mod piece;
pub mod region;
pub mod square;
pub mod state;

pub use moves::{Move, PlayedMove};
pub use outcome::Outcome;
pub use piece::{Piece, Side, ALL_SIDES};
pub use region::RegionSizes;
pub use square::{all_squares, Direction, Square, ALL_DIRECTIONS, BOARD_SIZE, SQUARE_COUNT};
pub use state::{BoardError, BoardState, DEFAULT_MOVE_LIMIT};
