//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on. Move and position
//! arguments stay as text here; the engine validates them against the
//! current game.

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoParams {
    pub depth: Option<u32>,
}

/// Where a `position` command starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSpec {
    /// The standard initial layout.
    StartPos,

    /// An explicit layout string and side to move.
    Layout { layout: String, side: String },
}

/// A parsed controller-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; engine identifies itself and replies `loaok`.
    Loa,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset to the initial position.
    NewGame,

    /// Set up a position, then play the listed moves.
    Position { spec: PositionSpec, moves: Vec<String> },

    /// Play a single move for the side to move.
    Move { mv: String },

    /// Retract the last move.
    Undo,

    /// Search the current position and report the best move.
    Go(GoParams),

    /// Render the board.
    Show,

    /// Report the game outcome, if any.
    Winner,

    /// Accepted for compatibility; searches are synchronous.
    Stop,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&first, rest) = tokens.split_first()?;

    match first {
        "loa" => Some(Command::Loa),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "undo" => Some(Command::Undo),
        "show" => Some(Command::Show),
        "winner" => Some(Command::Winner),
        "stop" => Some(Command::Stop),

        "setoption" => parse_setoption(rest),
        "position" => parse_position(rest),
        "move" => parse_move(rest),
        "go" => parse_go(rest),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = args.iter().position(|&t| t == "value");
    let (name_parts, value_parts) = match value_idx {
        Some(vi) => (&args[1..vi], &args[vi + 1..]),
        None => (&args[1..], &args[args.len()..]),
    };
    if name_parts.is_empty() {
        eprintln!("malformed setoption: empty name");
        return None;
    }

    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `position startpos [moves ...]` or
/// `position <layout> <side> [moves ...]`.
fn parse_position(args: &[&str]) -> Option<Command> {
    let (spec, rest) = match args {
        ["startpos", rest @ ..] => (PositionSpec::StartPos, rest),
        [layout, side, rest @ ..] if *side != "moves" => (
            PositionSpec::Layout {
                layout: layout.to_string(),
                side: side.to_string(),
            },
            rest,
        ),
        _ => {
            eprintln!("malformed position: expected 'position startpos|<layout> <side> [moves ...]'");
            return None;
        }
    };

    let moves = match rest {
        [] => Vec::new(),
        ["moves", moves @ ..] => moves.iter().map(|m| m.to_string()).collect(),
        [other, ..] => {
            eprintln!("malformed position: unexpected '{}'", other);
            return None;
        }
    };
    Some(Command::Position { spec, moves })
}

/// Parses `move <from>-<to>`.
fn parse_move(args: &[&str]) -> Option<Command> {
    match args {
        [mv] => Some(Command::Move { mv: mv.to_string() }),
        _ => {
            eprintln!("malformed move: expected 'move <from>-<to>'");
            None
        }
    }
}

/// Parses `go [depth <n>]`.
fn parse_go(args: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 0;

    while i < args.len() {
        match args[i] {
            "depth" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse::<u32>() {
                        Ok(v) => params.depth = Some(v),
                        Err(_) => {
                            eprintln!("invalid depth value: '{}'", args[i]);
                        }
                    }
                }
            }
            other => {
                eprintln!("unknown go parameter: '{}'", other);
            }
        }
        i += 1;
    }

    Some(Command::Go(params))
}
