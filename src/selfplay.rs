//! Self-play game generation.
//!
//! Plays the engine against itself from the initial position. The first few
//! half-moves of each game are random to diversify openings; after that both
//! sides use the alpha-beta search. Each game produces a `GameRecord` that
//! can be written out as JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{BoardState, Outcome, Side, DEFAULT_MOVE_LIMIT};
use crate::movegen::random_move;
use crate::protocol::position::encode_position;
use crate::search::{choose_move, DEFAULT_DEPTH};

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Search depth in plies for both sides.
    pub depth: u32,
    /// Number of uniformly random half-moves at the start of each game.
    pub random_plies: usize,
    /// Moves per side before the game is tied.
    pub move_limit: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            depth: DEFAULT_DEPTH,
            random_plies: 4,
            move_limit: DEFAULT_MOVE_LIMIT,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Moves in notation, in the order played.
    pub moves: Vec<String>,
    /// `black`, `white` or `tie`; `None` if the game stopped because the
    /// side to move had no legal move.
    pub outcome: Option<String>,
    /// Number of half-moves played.
    pub plies: usize,
    /// Position string of the final board.
    pub final_position: String,
}

/// Creates the RNG for one game. Games are seeded independently so results
/// do not depend on the thread count.
fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single self-play game.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut state = BoardState::new();
    if let Err(e) = state.set_move_limit(config.move_limit) {
        eprintln!("game {}: {}, using {}", game_id, e, state.move_limit());
    }

    let mut moves = Vec::new();
    while !state.game_over() {
        let mv = if state.moves_made() < config.random_plies {
            random_move(&state, rng)
        } else {
            choose_move(&state, config.depth).ok()
        };
        let Some(mv) = mv else {
            break;
        };
        if let Err(e) = state.apply_move(mv) {
            eprintln!("game {}: {}", game_id, e);
            break;
        }
        moves.push(mv.to_string());
    }

    GameRecord {
        game_id,
        plies: moves.len(),
        moves,
        outcome: state.winner().map(|o| o.name().to_string()),
        final_position: encode_position(&state),
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon and
/// arrive in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally (e.g. write to disk)
/// rather than waiting for all games to finish.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

fn report(config: &SelfPlayConfig, n: usize, game: &GameRecord, elapsed: f64) {
    if config.quiet {
        return;
    }
    let outcome = match game.outcome.as_deref() {
        Some("tie") => "tie".to_string(),
        Some(side) => format!("{} wins", side),
        None => "unfinished".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} after {} plies ({:.1}s)",
        n, config.num_games, outcome, game.plies, elapsed,
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let mut rng = game_rng(config, i);
        let game = play_game(config, i, &mut rng);
        report(config, i + 1, &game, game_start.elapsed().as_secs_f64());
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to build thread pool ({}), playing sequentially", e);
            run_self_play_sequential(config, on_game);
            return;
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let game_start = Instant::now();
                        let mut rng = game_rng(config, i);
                        let game = play_game(config, i, &mut rng);
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        report(config, n, &game, game_start.elapsed().as_secs_f64());
                        let _ = tx.send(game);
                    });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one line of JSON.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let count = |name: &str| {
        games
            .iter()
            .filter(|g| g.outcome.as_deref() == Some(name))
            .count()
    };
    let black = count(Side::Black.name());
    let white = count(Side::White.name());
    let ties = count(Outcome::Tie.name());
    let unfinished = games.iter().filter(|g| g.outcome.is_none()).count();
    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let pct = |n: usize| 100.0 * n as f64 / total.max(1) as f64;

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!(
        "Avg plies/game: {:.1}",
        total_plies as f64 / total.max(1) as f64
    );
    eprintln!("Black wins: {} ({:.1}%)", black, pct(black));
    eprintln!("White wins: {} ({:.1}%)", white, pct(white));
    eprintln!("Ties: {} ({:.1}%)", ties, pct(ties));
    if unfinished > 0 {
        eprintln!("Unfinished: {}", unfinished);
    }
}
