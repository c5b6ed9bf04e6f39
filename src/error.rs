//! Error types for BacktrackChess
//!
//! Covers rejected move requests, malformed positions and configuration,
//! and I/O failures in the game loop.

use thiserror::Error;

use crate::types::{Color, Square};

/// Errors that can occur while setting up or playing a game
#[derive(Error, Debug)]
pub enum ChessError {
    /// No piece at the origin square
    #[error("No piece at square {square}")]
    NoPieceAtSquare { square: Square },

    /// Origin piece belongs to the other side
    #[error("Piece at square {square} does not belong to {color}")]
    WrongPieceColor { square: Square, color: Color },

    /// Destination is not reachable for the piece
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// Coordinate text could not be parsed
    #[error("Invalid square: {name:?}")]
    InvalidSquare { name: String },

    /// Malformed FEN string
    #[error("Invalid FEN: {reason}")]
    InvalidFen { reason: String },

    /// AI player configured without any lookahead
    #[error("Invalid search depth {depth} (must be at least 1)")]
    InvalidDepth { depth: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for chess operations
pub type ChessResult<T> = Result<T, ChessError>;
