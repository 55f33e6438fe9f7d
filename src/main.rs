//! loa -- a Lines of Action engine speaking a line-based text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Rejected commands are reported on stderr.

use std::io::{self, BufRead};

use loa::engine::Engine;
use loa::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Loa => engine.handle_loa(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(name, value) {
                    eprintln!("setoption: {}", e);
                }
            }
            Command::NewGame => engine.new_game(),
            Command::Position { spec, moves } => {
                if let Err(e) = engine.set_position(&spec, &moves) {
                    eprintln!("position: {}", e);
                }
            }
            Command::Move { mv } => {
                if let Err(e) = engine.play_move(&mv) {
                    eprintln!("move: {}", e);
                }
            }
            Command::Undo => {
                if let Err(e) = engine.undo() {
                    eprintln!("undo: {}", e);
                }
            }
            Command::Go(params) => engine.handle_go(params.depth, &mut out)?,
            Command::Show => engine.handle_show(&mut out)?,
            Command::Winner => engine.handle_winner(&mut out)?,
            Command::Stop => {
                // Searches run to completion before the next command is read.
            }
            Command::Quit => break,
        }
    }
    Ok(())
}
