//! BacktrackChess - Command-line configuration

use clap::{Parser, ValueEnum};

use crate::board::{Board, STARTING_FEN};
use crate::error::{ChessError, ChessResult};
use crate::game::{PlayerKind, DEFAULT_MAX_TURNS};
use crate::search::{SearchConfig, TieBreak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerArg {
    Human,
    Ai,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Who plays White
    #[arg(long, value_enum, default_value = "human")]
    pub white: PlayerArg,

    /// Who plays Black
    #[arg(long, value_enum, default_value = "ai")]
    pub black: PlayerArg,

    /// Plies the White AI looks ahead
    #[arg(long, default_value = "3")]
    pub white_depth: u32,

    /// Plies the Black AI looks ahead
    #[arg(long, default_value = "3")]
    pub black_depth: u32,

    /// Search threads (0 = one per CPU)
    #[arg(long, default_value = "1")]
    pub threads: usize,

    /// Pick randomly among equally scored moves, seeded with this value
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from this position instead of the standard one
    #[arg(long, default_value = STARTING_FEN)]
    pub fen: String,

    /// Full turns before the game is drawn
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    pub max_turns: u32,
}

impl Config {
    /// White and Black players, rejecting AI players without lookahead
    pub fn players(&self) -> ChessResult<(PlayerKind, PlayerKind)> {
        Ok((
            player(self.white, self.white_depth)?,
            player(self.black, self.black_depth)?,
        ))
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            threads: self.threads,
            tie_break: match self.seed {
                Some(seed) => TieBreak::Random { seed },
                None => TieBreak::First,
            },
        }
    }

    pub fn board(&self) -> ChessResult<Board> {
        Board::from_fen(&self.fen)
    }
}

fn player(arg: PlayerArg, depth: u32) -> ChessResult<PlayerKind> {
    match arg {
        PlayerArg::Human => Ok(PlayerKind::Human),
        PlayerArg::Ai if depth == 0 => Err(ChessError::InvalidDepth { depth }),
        PlayerArg::Ai => Ok(PlayerKind::Ai { depth }),
    }
}
