//! BacktrackChess - interactive game
//!
//! Usage:
//!     backtrack_chess [--white human|ai] [--black human|ai] [--white-depth N] ...
//!
//! Humans enter moves on stdin as "e2e4" or "x1 y1 x2 y2". Set RUST_LOG
//! (e.g. RUST_LOG=backtrack_chess=debug) for search diagnostics on stderr.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use backtrack_chess::config::Config;
use backtrack_chess::error::ChessResult;
use backtrack_chess::game::Game;
use backtrack_chess::search::SearchEngine;

fn run(config: &Config) -> ChessResult<()> {
    let (white, black) = config.players()?;
    let board = config.board()?;
    let engine = SearchEngine::new(config.search_config());
    let mut game = Game::new(board, white, black, engine).with_max_turns(config.max_turns);

    let stdin = io::stdin();
    let stdout = io::stdout();
    game.play(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "game failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
