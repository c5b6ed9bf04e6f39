//! BacktrackChess - Position Evaluation Module
//!
//! Pure material evaluation from White's perspective. The king is worth more
//! than any material the rest of an army can reach, so losing it always
//! outweighs everything else.

use crate::board::Board;
use crate::types::*;

// ============================================================================
// PIECE VALUES
// ============================================================================

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

/// Unsigned magnitude of a piece kind
#[inline]
pub fn kind_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Signed value: positive for White, negative for Black
#[inline]
pub fn piece_value(kind: PieceKind, color: Color) -> i32 {
    kind_value(kind) * color.sign()
}

// ============================================================================
// MAIN EVALUATION FUNCTION
// ============================================================================

/// Material score (positive = White is ahead)
pub fn score(board: &Board) -> i32 {
    board.pieces().map(|p| p.value()).sum()
}
