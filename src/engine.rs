//! Engine state management.
//!
//! Holds the current game, engine options, and runs the search for the `go`
//! command. Moves sent by the controller are validated and applied here.

use std::collections::HashMap;
use std::io::{self, Write};

use thiserror::Error;

use crate::board::{BoardError, BoardState, DEFAULT_MOVE_LIMIT};
use crate::protocol::notation::{parse_move, NotationError};
use crate::protocol::parser::PositionSpec;
use crate::protocol::position::{parse_position, PositionError};
use crate::search::{search, SearchError, DEFAULT_DEPTH};

/// Largest depth accepted through `setoption`.
pub const MAX_DEPTH: u32 = 6;

/// Largest per-side move limit accepted through `setoption`.
pub const MAX_MOVE_LIMIT: usize = 1000;

/// Errors reported by command handlers.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Position(#[from] PositionError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("invalid value '{value}' for option {name}")]
    InvalidOption { name: String, value: String },
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: BoardState,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates an engine on the initial position with default options.
    pub fn new() -> Self {
        Engine {
            position: BoardState::new(),
            options: HashMap::new(),
        }
    }

    /// Resets the game to the initial position, keeping options.
    pub fn new_game(&mut self) {
        self.position = self.fresh_board(BoardState::new());
    }

    /// Configured search depth (option `Depth`).
    pub fn depth(&self) -> u32 {
        self.options
            .get("Depth")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DEPTH)
    }

    /// Configured moves per side before a tie (option `MoveLimit`).
    pub fn move_limit(&self) -> usize {
        self.options
            .get("MoveLimit")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MOVE_LIMIT)
    }

    /// Sets an engine option.
    ///
    /// `Depth` and `MoveLimit` are range checked; a new move limit also
    /// applies to the game in progress. Unknown options are stored as given.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), EngineError> {
        let value = value.unwrap_or_default();
        match name.as_str() {
            "Depth" => {
                parse_in_range(&name, &value, 1, MAX_DEPTH)?;
            }
            "MoveLimit" => {
                let limit = parse_in_range(&name, &value, 1, MAX_MOVE_LIMIT)?;
                self.position.set_move_limit(limit)?;
            }
            _ => {}
        }
        self.options.insert(name, value);
        Ok(())
    }

    /// Replaces the game with the given position after playing `moves`.
    ///
    /// On any error the current game is left unchanged.
    pub fn set_position(&mut self, spec: &PositionSpec, moves: &[String]) -> Result<(), EngineError> {
        let start = match spec {
            PositionSpec::StartPos => BoardState::new(),
            PositionSpec::Layout { layout, side } => parse_position(layout, side)?,
        };
        let mut state = self.fresh_board(start);
        for text in moves {
            state.apply_move(parse_move(text)?)?;
        }
        self.position = state;
        Ok(())
    }

    /// Plays one move for the side to move.
    pub fn play_move(&mut self, text: &str) -> Result<(), EngineError> {
        if let Some(outcome) = self.position.winner() {
            return Err(SearchError::GameOver(outcome).into());
        }
        let mv = parse_move(text)?;
        self.position.apply_move(mv)?;
        Ok(())
    }

    /// Retracts the last move.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        self.position.undo_last_move()?;
        Ok(())
    }

    /// Handles the handshake: writes id, options, protocol_version, and loaok.
    pub fn handle_loa<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name loa")?;
        writeln!(out, "id author loa")?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            DEFAULT_DEPTH, MAX_DEPTH
        )?;
        writeln!(
            out,
            "option name MoveLimit type spin default {} min 1 max {}",
            DEFAULT_MOVE_LIMIT, MAX_MOVE_LIMIT
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "loaok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `go` command: searches the current position and writes an
    /// `info` line followed by `bestmove`. The move is not played.
    pub fn handle_go<W: Write>(&self, depth: Option<u32>, out: &mut W) -> io::Result<()> {
        if let Some(outcome) = self.position.winner() {
            eprintln!("go: game is already over ({})", outcome);
            writeln!(out, "bestmove none")?;
            return out.flush();
        }

        let depth = depth.unwrap_or_else(|| self.depth()).max(1);
        let result = search(&self.position, depth, out);
        match result.best_move {
            Some(mv) => writeln!(out, "bestmove {}", mv)?,
            None => {
                eprintln!("go: {} has no legal moves", self.position.turn());
                writeln!(out, "bestmove none")?;
            }
        }
        out.flush()
    }

    /// Handles the `show` command.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.position)?;
        out.flush()
    }

    /// Handles the `winner` command.
    pub fn handle_winner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.position.winner() {
            Some(outcome) => writeln!(out, "winner {}", outcome)?,
            None => writeln!(out, "winner none")?,
        }
        out.flush()
    }

    /// Applies the configured move limit to a newly set up board.
    fn fresh_board(&self, mut state: BoardState) -> BoardState {
        // A fresh board has no history, so any positive limit fits.
        if state.set_move_limit(self.move_limit()).is_err() {
            eprintln!("ignoring move limit {}", self.move_limit());
        }
        state
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

fn parse_in_range<T>(name: &str, value: &str, min: T, max: T) -> Result<T, EngineError>
where
    T: std::str::FromStr + PartialOrd,
{
    match value.parse::<T>() {
        Ok(v) if v >= min && v <= max => Ok(v),
        _ => Err(EngineError::InvalidOption {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Outcome, Side};

    fn output_of<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_starts_at_initial_position() {
        let engine = Engine::new();
        assert_eq!(engine.position, BoardState::new());
        assert!(engine.options.is_empty());
        assert_eq!(engine.depth(), DEFAULT_DEPTH);
        assert_eq!(engine.move_limit(), DEFAULT_MOVE_LIMIT);
    }

    #[test]
    fn new_game_resets_position() {
        let mut engine = Engine::new();
        engine.play_move("b1-b3").unwrap();
        engine.new_game();
        assert_eq!(engine.position, BoardState::new());
    }

    #[test]
    fn set_option_stores_value() {
        let mut engine = Engine::new();
        engine
            .set_option("Depth".to_string(), Some("2".to_string()))
            .unwrap();
        assert_eq!(engine.depth(), 2);
        engine
            .set_option("Colour".to_string(), Some("blue".to_string()))
            .unwrap();
        assert_eq!(engine.options.get("Colour"), Some(&"blue".to_string()));
    }

    #[test]
    fn set_option_rejects_out_of_range() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.set_option("Depth".to_string(), Some("0".to_string())),
            Err(EngineError::InvalidOption { .. })
        ));
        assert!(matches!(
            engine.set_option("Depth".to_string(), None),
            Err(EngineError::InvalidOption { .. })
        ));
        assert_eq!(engine.depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn move_limit_applies_to_current_and_new_games() {
        let mut engine = Engine::new();
        engine
            .set_option("MoveLimit".to_string(), Some("10".to_string()))
            .unwrap();
        assert_eq!(engine.position.move_limit(), 10);
        engine.new_game();
        assert_eq!(engine.position.move_limit(), 10);
    }

    #[test]
    fn move_limit_cannot_drop_below_played_moves() {
        let mut engine = Engine::new();
        engine.play_move("b1-b3").unwrap();
        engine.play_move("a2-c2").unwrap();
        assert!(matches!(
            engine.set_option("MoveLimit".to_string(), Some("1".to_string())),
            Err(EngineError::Board(BoardError::MoveLimitTooSmall { .. }))
        ));
        assert_eq!(engine.move_limit(), DEFAULT_MOVE_LIMIT);
    }

    #[test]
    fn set_position_with_moves() {
        let mut engine = Engine::new();
        let moves = vec!["b1-b3".to_string(), "a2-c2".to_string()];
        engine.set_position(&PositionSpec::StartPos, &moves).unwrap();
        assert_eq!(engine.position.moves_made(), 2);
        assert_eq!(engine.position.turn(), Side::Black);
    }

    #[test]
    fn set_position_from_layout() {
        let mut engine = Engine::new();
        let spec = PositionSpec::Layout {
            layout: "8/8/8/8/3w4/2w5/8/b6b".to_string(),
            side: "w".to_string(),
        };
        engine.set_position(&spec, &[]).unwrap();
        assert_eq!(engine.position.turn(), Side::White);
        assert_eq!(engine.position.piece_count(Side::Black), 2);
    }

    #[test]
    fn failed_set_position_keeps_game() {
        let mut engine = Engine::new();
        engine.play_move("b1-b3").unwrap();
        let before = engine.position.clone();

        let bad_move = vec!["b8-b5".to_string()];
        assert!(matches!(
            engine.set_position(&PositionSpec::StartPos, &bad_move),
            Err(EngineError::Board(BoardError::IllegalMove(_)))
        ));
        let bad_layout = PositionSpec::Layout {
            layout: "8/8".to_string(),
            side: "b".to_string(),
        };
        assert!(matches!(
            engine.set_position(&bad_layout, &[]),
            Err(EngineError::Position(PositionError::RankCount(2)))
        ));
        assert_eq!(engine.position, before);
    }

    #[test]
    fn play_move_rejects_bad_input() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.play_move("b1b3"),
            Err(EngineError::Notation(_))
        ));
        assert!(matches!(
            engine.play_move("a2-a4"),
            Err(EngineError::Board(BoardError::IllegalMove(_)))
        ));
        assert_eq!(engine.position, BoardState::new());
    }

    #[test]
    fn play_move_after_game_over_is_rejected() {
        let mut engine = Engine::new();
        let won = PositionSpec::Layout {
            layout: "8/8/8/8/3w4/2w5/8/b6b".to_string(),
            side: "b".to_string(),
        };
        engine.set_position(&won, &[]).unwrap();
        assert_eq!(engine.position.winner(), Some(Outcome::Win(Side::White)));
        assert!(matches!(
            engine.play_move("a1-b1"),
            Err(EngineError::Search(SearchError::GameOver(_)))
        ));
    }

    #[test]
    fn undo_restores_previous_position() {
        let mut engine = Engine::new();
        engine.play_move("b1-b3").unwrap();
        engine.undo().unwrap();
        assert_eq!(engine.position, BoardState::new());
        assert!(matches!(
            engine.undo(),
            Err(EngineError::Board(BoardError::EmptyHistory))
        ));
    }

    #[test]
    fn handle_loa_outputs_handshake() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_loa(out));
        assert!(output.starts_with("id name loa\n"));
        assert!(output.contains("option name Depth type spin default 3 min 1 max 6"));
        assert!(output.contains("option name MoveLimit type spin default 60 min 1 max 1000"));
        assert!(output.contains("protocol_version 1"));
        assert!(output.ends_with("loaok\n"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_isready(out));
        assert_eq!(output.trim(), "readyok");
    }

    #[test]
    fn handle_go_outputs_info_and_bestmove() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_go(Some(1), out));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "got: {}", output);
        assert!(lines[0].starts_with("info depth 1 "));
        let mv = lines[1].strip_prefix("bestmove ").unwrap();
        assert!(engine.position.is_legal(parse_move(mv).unwrap()));
        assert_eq!(engine.position, BoardState::new());
    }

    #[test]
    fn handle_go_finds_winning_move() {
        let mut engine = Engine::new();
        let spec = PositionSpec::Layout {
            layout: "b7/8/8/8/b2w3w/2w5/8/8".to_string(),
            side: "w".to_string(),
        };
        engine.set_position(&spec, &[]).unwrap();
        let output = output_of(|out| engine.handle_go(Some(1), out));
        assert!(output.ends_with("bestmove h4-e4\n"), "got: {}", output);
    }

    #[test]
    fn handle_go_after_game_over() {
        let mut engine = Engine::new();
        let spec = PositionSpec::Layout {
            layout: "8/8/8/8/3w4/2w5/8/b6b".to_string(),
            side: "b".to_string(),
        };
        engine.set_position(&spec, &[]).unwrap();
        let output = output_of(|out| engine.handle_go(None, out));
        assert_eq!(output, "bestmove none\n");
    }

    #[test]
    fn handle_show_renders_board() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_show(out));
        assert!(output.starts_with("===\n    - b b b b b b - \n"));
        assert!(output.ends_with("Next move: black\n===\n"));
    }

    #[test]
    fn handle_winner_reports_outcome() {
        let mut engine = Engine::new();
        assert_eq!(output_of(|out| engine.handle_winner(out)), "winner none\n");

        let spec = PositionSpec::Layout {
            layout: "8/8/8/8/3w4/2w5/8/b6b".to_string(),
            side: "b".to_string(),
        };
        engine.set_position(&spec, &[]).unwrap();
        assert_eq!(output_of(|out| engine.handle_winner(out)), "winner white\n");
    }
}
