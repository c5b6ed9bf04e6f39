//! BacktrackChess - Piece Module
//!
//! A piece is a colored, typed token on a square. Its kind is a plain tag, so
//! promotion rewrites the tag in place and the piece keeps its slot.

use crate::behavior;
use crate::board::{Board, Move};
use crate::evaluation::piece_value;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Piece { color, kind, square }
    }

    /// Signed material value (positive for White, negative for Black)
    #[inline]
    pub fn value(&self) -> i32 {
        piece_value(self.kind, self.color)
    }

    /// Turn this piece into a queen, keeping color and square
    pub fn promote(&mut self) {
        self.kind = PieceKind::Queen;
    }

    /// Append this piece's pseudo-legal moves on `board` to `moves`
    pub fn moves(&self, board: &Board, moves: &mut Vec<Move>) {
        behavior::candidate_moves(self.kind, self.color, self.square, board, moves);
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn to_fen(&self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parse a FEN letter into a color and kind
    pub fn from_fen(c: char) -> Option<(Color, PieceKind)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some((color, kind))
    }

    /// Short label such as "White knight"
    pub fn summary(&self) -> String {
        format!("{} {}", self.color, self.kind.name())
    }
}
