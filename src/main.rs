//! Gomoku engine command line
//!
//! Plays a game against the engine over stdin/stdout. Commands:
//! `<row> <col>` to move, `undo` to take back a move pair, `quit` to stop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gomoku::{AiWorker, Config, Outcome, Request, WorkerError, DEFAULT_BOARD_SIZE};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board size (5 to 25)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Let the engine play Black and move first
    #[arg(long)]
    ai_first: bool,

    /// TOML file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up waiting for the engine after this many milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Print outcomes as JSON instead of a board diagram
    #[arg(long)]
    json: bool,

    /// Skip the forced-win checks around the main search
    #[arg(long)]
    no_vct: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

enum Command {
    Move(usize, usize),
    Undo,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let first = parts.next()?;
    match first {
        "quit" | "exit" => Some(Command::Quit),
        "undo" => Some(Command::Undo),
        _ => {
            let row = first.parse().ok()?;
            let col = parts.next()?.parse().ok()?;
            parts.next().is_none().then_some(Command::Move(row, col))
        }
    }
}

fn show(outcome: &Outcome, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        let text = serde_json::to_string(outcome).context("failed to serialize outcome")?;
        writeln!(stdout, "{text}")?;
    } else {
        write!(stdout, "{outcome}")?;
    }
    stdout.flush()?;
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if args.no_vct {
        config.enable_vct = false;
    }
    log::debug!("config: {config:?}");

    let timeout = Duration::from_millis(args.timeout_ms);
    let mut worker = AiWorker::spawn(config);
    let start = Request::Start {
        size: args.size,
        ai_first: args.ai_first,
        depth: args.depth,
    };
    let outcome = worker.request(start, timeout).context("failed to start game")?;
    show(&outcome, args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let request = match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Undo) => Request::Undo,
            Some(Command::Move(row, col)) => Request::Move {
                row,
                col,
                depth: args.depth,
            },
            None => {
                eprintln!("expected `<row> <col>`, `undo` or `quit`");
                continue;
            }
        };
        match worker.request(request, timeout) {
            Ok(outcome) => show(&outcome, args.json)?,
            Err(WorkerError::Game(e)) => eprintln!("rejected: {e}"),
            Err(e @ WorkerError::Timeout(_)) => eprintln!("{e}"),
            Err(e) => return Err(e).context("engine failed"),
        }
    }

    if let Ok(outcome) = worker.request(Request::End, timeout) {
        log::info!("final position after {} moves", outcome.history.len());
    }
    worker.shutdown();
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}
