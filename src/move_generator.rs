//! BacktrackChess - Move Generator Module
//!
//! Enumerates pseudo-legal moves for one side. Moves that leave the mover's
//! own king capturable are kept; only the search's scoring discourages them.

use crate::board::{Board, Move};
use crate::error::{ChessError, ChessResult};
use crate::types::*;

/// Move generator for chess positions
pub struct MoveGenerator;

impl MoveGenerator {
    /// Create a new move generator
    pub fn new() -> Self {
        MoveGenerator
    }

    /// All pseudo-legal moves for `color`, squares visited a1..h8
    pub fn moves_for(&self, board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for piece in board.pieces_of(color) {
            piece.moves(board, &mut moves);
        }
        moves
    }

    /// Pseudo-legal moves of the piece on `from`, empty if there is none
    pub fn moves_from(&self, board: &Board, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = board.piece_at(from) {
            piece.moves(board, &mut moves);
        }
        moves
    }

    /// Check if a square can be reached by any move of `by`
    pub fn is_square_attacked(&self, board: &Board, sq: Square, by: Color) -> bool {
        board.pieces_of(by).any(|piece| {
            let mut moves = Vec::new();
            piece.moves(board, &mut moves);
            moves.iter().any(|mv| mv.to == sq)
        })
    }

    /// Check if `color`'s king is attacked. Informational only; a missing
    /// king is not in check.
    pub fn is_in_check(&self, board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some(king_sq) => self.is_square_attacked(board, king_sq, color.opponent()),
            None => false,
        }
    }

    /// Validate a requested move for `color` and return it with its
    /// promotion tag filled in
    pub fn validate_move(&self, board: &Board, color: Color, from: Square, to: Square) -> ChessResult<Move> {
        let piece = board
            .piece_at(from)
            .ok_or(ChessError::NoPieceAtSquare { square: from })?;
        if piece.color != color {
            return Err(ChessError::WrongPieceColor { square: from, color });
        }
        self.moves_from(board, from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(ChessError::IllegalMove { from, to })
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}
