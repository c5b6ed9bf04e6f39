//! BacktrackChess - Piece Behavior Module
//!
//! Per-kind movement rules. Every function here is a pure function of the
//! board, the piece's square and its color, and appends pseudo-legal moves
//! (in bounds, not landing on a friendly piece) to the output vector.
//! No castling and no en passant are generated.

use crate::board::{Board, Move};
use crate::types::*;

/// Direction offsets (file, rank) for sliding pieces
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KING_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

/// Dispatch to the rule for `kind`
pub fn candidate_moves(kind: PieceKind, color: Color, from: Square, board: &Board, moves: &mut Vec<Move>) {
    match kind {
        PieceKind::Pawn => pawn_moves(board, from, color, moves),
        PieceKind::Knight => step_moves(board, from, color, &KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => sliding_moves(board, from, color, &BISHOP_DIRECTIONS, moves),
        PieceKind::Rook => sliding_moves(board, from, color, &ROOK_DIRECTIONS, moves),
        PieceKind::Queen => sliding_moves(board, from, color, &QUEEN_DIRECTIONS, moves),
        PieceKind::King => step_moves(board, from, color, &KING_DIRECTIONS, moves),
    }
}

/// Destination squares only, in generation order
pub fn destinations(kind: PieceKind, color: Color, from: Square, board: &Board) -> Vec<Square> {
    let mut moves = Vec::with_capacity(28);
    candidate_moves(kind, color, from, board, &mut moves);
    moves.into_iter().map(|mv| mv.to).collect()
}

/// Pawn moves: left capture, forward push(es), right capture
fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    let forward = color.forward();
    let promo_rank = color.promotion_rank();
    let push = |to: Square, moves: &mut Vec<Move>| {
        moves.push(Move::new(from, to, to.rank() == promo_rank));
    };

    let capture = |df: i8, moves: &mut Vec<Move>| {
        if let Some(to) = from.offset(df, forward) {
            if let Some(target) = board.piece_at(to) {
                if target.color != color {
                    push(to, moves);
                }
            }
        }
    };

    capture(-1, moves);

    // Single push, then double push from the starting rank
    if let Some(one) = from.offset(0, forward) {
        if board.is_empty(one) {
            push(one, moves);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if board.is_empty(two) {
                        push(two, moves);
                    }
                }
            }
        }
    }

    capture(1, moves);
}

/// Single-step pieces (knight, king)
fn step_moves(board: &Board, from: Square, color: Color, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color == color => {}
            _ => moves.push(Move::new(from, to, false)),
        }
    }
}

/// Sliding pieces (bishop, rook, queen). Each ray stops at the first occupied
/// square, which is included only if it holds an enemy piece.
fn sliding_moves(board: &Board, from: Square, color: Color, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            match board.piece_at(next) {
                None => moves.push(Move::new(from, next, false)),
                Some(target) => {
                    if target.color != color {
                        moves.push(Move::new(from, next, false));
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    #[test]
    fn knight_in_corner_has_two_moves() {
        let mut board = Board::empty();
        board.put(Color::White, PieceKind::Knight, sq("a1"));
        let dests = sorted(destinations(PieceKind::Knight, Color::White, sq("a1"), &board));
        assert_eq!(dests, sorted(vec![sq("b3"), sq("c2")]));
    }

    #[test]
    fn rook_ray_stops_at_blockers() {
        let mut board = Board::empty();
        board.put(Color::White, PieceKind::Rook, sq("d4"));
        board.put(Color::White, PieceKind::Pawn, sq("d6"));
        board.put(Color::Black, PieceKind::Pawn, sq("f4"));
        let dests = destinations(PieceKind::Rook, Color::White, sq("d4"), &board);
        assert!(dests.contains(&sq("d5")));
        assert!(!dests.contains(&sq("d6")));
        assert!(dests.contains(&sq("e4")));
        assert!(dests.contains(&sq("f4")));
        assert!(!dests.contains(&sq("g4")));
        // 1 up, 3 down, 3 left, 2 right
        assert_eq!(dests.len(), 9);
    }

    #[test]
    fn queen_on_empty_board_covers_27_squares() {
        let mut board = Board::empty();
        board.put(Color::Black, PieceKind::Queen, sq("d4"));
        assert_eq!(destinations(PieceKind::Queen, Color::Black, sq("d4"), &board).len(), 27);
    }

    #[test]
    fn bishop_captures_enemy_but_not_friend() {
        let mut board = Board::empty();
        board.put(Color::White, PieceKind::Bishop, sq("c1"));
        board.put(Color::White, PieceKind::Pawn, sq("b2"));
        board.put(Color::Black, PieceKind::Knight, sq("e3"));
        let dests = sorted(destinations(PieceKind::Bishop, Color::White, sq("c1"), &board));
        assert_eq!(dests, sorted(vec![sq("d2"), sq("e3")]));
    }

    #[test]
    fn king_moves_are_adjacent_only() {
        let mut board = Board::empty();
        board.put(Color::White, PieceKind::King, sq("e1"));
        board.put(Color::White, PieceKind::Rook, sq("h1"));
        let dests = destinations(PieceKind::King, Color::White, sq("e1"), &board);
        assert_eq!(dests.len(), 5);
        assert!(!dests.contains(&sq("g1")));
    }

    #[test]
    fn pawn_double_push_only_from_start_rank() {
        let mut board = Board::empty();
        board.put(Color::White, PieceKind::Pawn, sq("e2"));
        board.put(Color::White, PieceKind::Pawn, sq("a3"));
        let e = sorted(destinations(PieceKind::Pawn, Color::White, sq("e2"), &board));
        assert_eq!(e, sorted(vec![sq("e3"), sq("e4")]));
        let a = destinations(PieceKind::Pawn, Color::White, sq("a3"), &board);
        assert_eq!(a, vec![sq("a4")]);
    }

    #[test]
    fn pawn_blocked_push_and_diagonal_capture() {
        let mut board = Board::empty();
        board.put(Color::Black, PieceKind::Pawn, sq("d7"));
        board.put(Color::White, PieceKind::Knight, sq("d6"));
        board.put(Color::White, PieceKind::Bishop, sq("c6"));
        board.put(Color::Black, PieceKind::Rook, sq("e6"));
        let dests = destinations(PieceKind::Pawn, Color::Black, sq("d7"), &board);
        assert_eq!(dests, vec![sq("c6")]);
    }

    #[test]
    fn pawn_double_push_blocked_by_second_square() {
        let mut board = Board::empty();
        board.put(Color::Black, PieceKind::Pawn, sq("g7"));
        board.put(Color::White, PieceKind::Pawn, sq("g5"));
        let dests = destinations(PieceKind::Pawn, Color::Black, sq("g7"), &board);
        assert_eq!(dests, vec![sq("g6")]);
    }

    #[test]
    fn pawn_moves_to_last_rank_are_tagged() {
        let mut board = Board::empty();
        board.put(Color::White, PieceKind::Pawn, sq("b7"));
        board.put(Color::Black, PieceKind::Rook, sq("a8"));
        let mut moves = Vec::new();
        candidate_moves(PieceKind::Pawn, Color::White, sq("b7"), &board, &mut moves);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|mv| mv.promotion));
    }
}
