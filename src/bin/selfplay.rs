//! Self-play game generation CLI.
//!
//! Plays Lines of Action games engine-vs-engine and outputs one JSON record
//! per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N         Number of games to play (default: 10)
//!   --depth N         Search depth in plies (default: 3)
//!   --random-plies N  Random opening half-moves per game (default: 4)
//!   --move-limit N    Moves per side before a tie (default: 60)
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Random seed, 0 for entropy (default: 0)
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use loa::selfplay::{self, SelfPlayConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => config.num_games = value_of(&args, &mut i),
            "--depth" => config.depth = value_of(&args, &mut i),
            "--random-plies" => config.random_plies = value_of(&args, &mut i),
            "--move-limit" => config.move_limit = value_of(&args, &mut i),
            "--threads" => config.threads = value_of(&args, &mut i),
            "--seed" => config.seed = value_of(&args, &mut i),
            "--output" => output_path = Some(value_of(&args, &mut i)),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, depth {}, {} random plies, move limit {}, {} threads",
            config.num_games, config.depth, config.random_plies, config.move_limit, config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let result = match &output_path {
        Some(path) => File::create(path).and_then(|file| write_games(&games, file)),
        None => write_games(&games, io::stdout().lock()),
    };
    match (result, output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            process::exit(1);
        }
        (Ok(()), Some(path)) if !config.quiet => {
            eprintln!("Wrote {} games to {}", games.len(), path);
        }
        _ => {}
    }
}

fn write_games<W: Write>(games: &[selfplay::GameRecord], out: W) -> io::Result<()> {
    let mut writer = BufWriter::new(out);
    selfplay::write_jsonl(games, &mut writer)
}

/// Parses the value following the flag at `args[*i]`, advancing `i` past
/// it. Exits with usage on a missing or malformed value.
fn value_of<T: FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --depth N         Search depth in plies (default: 3)");
    eprintln!("  --random-plies N  Random opening half-moves per game (default: 4)");
    eprintln!("  --move-limit N    Moves per side before a tie (default: 60)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
