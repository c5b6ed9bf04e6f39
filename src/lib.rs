//! BacktrackChess - two-player chess with a depth-limited AI
//!
//! A chess engine written in Rust with:
//! - Per-piece pseudo-legal move rules (no castling, no en passant)
//! - Unconditional promotion to queen
//! - Exhaustive backtracking minimax without pruning
//! - Pure material evaluation with a dominating king value
//! - Optional multi-threaded search over the root moves
//!
//! The game ends when a king is captured; there is no checkmate detection
//! and no filter against moving into check.

pub mod types;
pub mod error;
pub mod piece;
pub mod behavior;
pub mod board;
pub mod move_generator;
pub mod evaluation;
pub mod search;
pub mod game;
pub mod config;

pub use board::{Board, Move, UndoInfo};
pub use error::{ChessError, ChessResult};
pub use move_generator::MoveGenerator;
pub use search::{SearchConfig, SearchEngine, SearchResult, TieBreak};
pub use types::{Color, PieceKind, Square};
