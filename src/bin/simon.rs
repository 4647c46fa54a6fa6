//! Terminal Simon.
//!
//! Type `start` to begin, then type the squares back as a word (`rgby`) or
//! one key per line. `quit` exits.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use simon_engine::board::Board;
use simon_engine::core::{EngineConfig, Symbol};
use simon_engine::engine::GameEngine;
use simon_engine::score::JsonFileStore;
use simon_engine::session::Outcome;

/// Simon - repeat the sequence, one square longer each round
#[derive(Parser, Debug)]
#[command(name = "simon")]
#[command(about = "Simon-style memory game in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON engine config (timings, base length, policy)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the sequence RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Starting sequence length
    #[arg(long)]
    base_length: Option<usize>,

    /// Board squares, one key each
    #[arg(long, value_delimiter = ',', default_value = "r,g,b,y", value_parser = parse_square)]
    squares: Vec<String>,

    /// Where the high score is kept
    #[arg(long, default_value = "simon_high_score.json")]
    high_score_file: PathBuf,
}

/// Board that prints effects to stdout.
struct ConsoleBoard {
    squares: Vec<Symbol>,
    input_enabled: bool,
}

impl ConsoleBoard {
    fn new(squares: Vec<String>) -> Self {
        Self {
            squares: squares.into_iter().map(Symbol::new).collect(),
            input_enabled: false,
        }
    }
}

impl Board for ConsoleBoard {
    fn alphabet(&self) -> Vec<Symbol> {
        self.squares.clone()
    }

    fn enable_input(&mut self) {
        if !self.input_enabled {
            println!("  your turn >");
        }
        self.input_enabled = true;
    }

    fn disable_input(&mut self) {
        self.input_enabled = false;
    }

    fn present_highlight(&mut self, symbol: &Symbol, _duration: Duration) {
        if !self.input_enabled {
            println!("  [{}]", symbol.as_str().to_uppercase());
        }
    }

    fn present_win(&mut self) {
        println!("Correct sequence!");
    }

    fn present_lose(&mut self) {
        println!("Game over!");
    }

    fn present_round_start(&mut self, round: u32) {
        println!("Round {} - get ready...", round);
    }

    fn set_score_display(&mut self, score: u32) {
        println!("Score: {}", score);
    }

    fn set_high_score_display(&mut self, score: u32) {
        println!("High score: {}", score);
    }

    fn set_controls_for_game_over(&mut self) {
        println!("Type `start` to play again.");
    }

    fn set_controls_for_game_start(&mut self) {}
}

/// Keys that `parse_line` treats as commands when typed alone.
const RESERVED_KEYS: &[char] = &['q'];

/// A square must be a single key so a typed word splits into picks.
fn parse_square(raw: &str) -> std::result::Result<String, String> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) if RESERVED_KEYS.contains(&key) => {
            Err(format!("`{}` is reserved for quit", key))
        }
        (Some(key), None) if !key.is_whitespace() => Ok(key.to_string()),
        _ => Err(format!("`{}` is not a single key", raw)),
    }
}

enum Command {
    Start,
    Quit,
    Picks(Vec<Symbol>),
}

fn parse_line(line: &str) -> Option<Command> {
    match line.trim() {
        "" => None,
        "start" | "play" => Some(Command::Start),
        "quit" | "exit" | "q" => Some(Command::Quit),
        keys => Some(Command::Picks(keys.chars().map(Symbol::from).collect())),
    }
}

/// Read stdin on its own thread so the game loop only ever waits on the
/// channel.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("simon_engine=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(base_length) = cli.base_length {
        config.base_length = base_length;
    }

    let board = ConsoleBoard::new(cli.squares);
    let store = JsonFileStore::new(cli.high_score_file);
    let mut engine = GameEngine::new(config, board, store)?;

    let squares: Vec<&str> = engine.board().squares.iter().map(Symbol::as_str).collect();
    println!("Squares: {}", squares.join(" "));
    println!("Type `start` to play, `quit` to leave.");

    let lines = spawn_stdin_reader();
    let origin = Instant::now();

    loop {
        engine.advance_to(origin.elapsed());

        let received = match engine.next_deadline() {
            Some(deadline) => lines.recv_timeout(deadline.saturating_sub(origin.elapsed())),
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let line = match received {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match parse_line(&line) {
            None => {}
            Some(Command::Quit) => break,
            Some(Command::Start) => engine.start_game()?,
            Some(Command::Picks(picks)) => {
                for pick in picks {
                    engine.advance_to(origin.elapsed());
                    if engine.on_user_pick(&pick) == Some(Outcome::Lose) {
                        let answer = engine
                            .session()
                            .map(|s| s.sequence().to_string())
                            .unwrap_or_default();
                        println!("The sequence was {}", answer);
                        break;
                    }
                }
            }
        }
    }

    println!("High score: {}", engine.high_score());
    Ok(())
}
