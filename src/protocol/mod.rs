//! Text protocol handling.
//!
//! Square and move notation, the position string used to set up boards, and
//! the command parser for the main loop.

pub mod notation;
pub mod parser;
pub mod position;

pub use notation::{parse_move, parse_square, NotationError};
pub use parser::{parse_command, Command, GoParams, PositionSpec};
pub use position::{encode_position, parse_position, parse_position_str, PositionError, START_POSITION};
