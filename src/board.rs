//! BacktrackChess - Board Representation Module
//!
//! This module provides the board, moves and undo records. It includes FEN
//! parsing and generation, in-place move execution with undo, forking, and a
//! text rendering of the position.

use crate::error::{ChessError, ChessResult};
use crate::piece::Piece;
use crate::types::*;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Represents a chess move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Set when a pawn lands on the farthest rank
    pub promotion: bool,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: bool) -> Self {
        Move { from, to, promotion }
    }

    /// Coordinate notation (e.g., "e2e4", "e7e8q")
    pub fn to_uci(&self) -> String {
        let mut uci = format!("{}{}", self.from, self.to);
        if self.promotion {
            uci.push('q');
        }
        uci
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// Information needed to undo a move
#[derive(Clone, Copy, Debug)]
pub struct UndoInfo {
    pub captured: Option<Piece>,
    pub promoted: bool,
    /// False when the origin was empty and nothing moved
    pub moved: bool,
    pub side_to_move: Color,
}

/// Chess board representation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// 64 slots (0=a1, 1=b1, ..., 63=h8)
    squares: [Option<Piece>; 64],
    /// Color to move
    pub side_to_move: Color,
}

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            let file = file as u8;
            for (color, back, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let (Some(b), Some(p)) = (Square::new(file, back), Square::new(file, pawns)) {
                    board.put(color, kind, b);
                    board.put(color, PieceKind::Pawn, p);
                }
            }
        }
        board
    }

    /// Board with no pieces, White to move
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
        }
    }

    /// Create a board from a FEN string. Castling, en passant and move
    /// counters are accepted but ignored.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let placement = parts.first().ok_or_else(|| ChessError::InvalidFen {
            reason: "empty string".to_string(),
        })?;

        let mut board = Board::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidFen {
                reason: format!("expected 8 ranks, found {}", ranks.len()),
            });
        }

        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    if file > 8 {
                        return Err(ChessError::InvalidFen {
                            reason: format!("rank {} overflows", rank + 1),
                        });
                    }
                    continue;
                }
                let (color, kind) = Piece::from_fen(c).ok_or_else(|| ChessError::InvalidFen {
                    reason: format!("unknown piece letter {c:?}"),
                })?;
                let sq = Square::new(file, rank).ok_or_else(|| ChessError::InvalidFen {
                    reason: format!("rank {} overflows", rank + 1),
                })?;
                board.put(color, kind, sq);
                file += 1;
            }
            if file != 8 {
                return Err(ChessError::InvalidFen {
                    reason: format!("rank {} has {} files", rank + 1, file),
                });
            }
        }

        board.side_to_move = match parts.get(1) {
            None | Some(&"w") => Color::White,
            Some(&"b") => Color::Black,
            Some(other) => {
                return Err(ChessError::InvalidFen {
                    reason: format!("unknown side to move {other:?}"),
                })
            }
        };

        Ok(board)
    }

    /// Generate FEN string from current board state
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen());
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push_str(" - - 0 1");

        fen
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()].as_ref()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Place a new piece, replacing any occupant
    pub fn put(&mut self, color: Color, kind: PieceKind, sq: Square) {
        self.squares[sq.index()] = Some(Piece::new(color, kind, sq));
    }

    /// Take the piece off a square
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Occupied squares and their pieces, in index order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    /// Pieces of one color, in index order
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Execute a move on the board. Returns UndoInfo for undoing the move later.
    ///
    /// The move must come from `MoveGenerator::moves_for` or
    /// `MoveGenerator::validate_move`; no legality check is made here. The
    /// turn passes to the opponent of the piece that moved, which need not be
    /// `side_to_move` when a search is run for the other color. An empty
    /// origin only passes the turn.
    pub fn make_move(&mut self, mv: &Move) -> UndoInfo {
        let mut undo = UndoInfo {
            captured: None,
            promoted: false,
            moved: false,
            side_to_move: self.side_to_move,
        };

        let Some(mut piece) = self.squares[mv.from.index()].take() else {
            self.side_to_move = self.side_to_move.opponent();
            return undo;
        };

        debug_assert!(
            self.squares[mv.to.index()].map_or(true, |target| target.color != piece.color),
            "{mv} captures its own piece"
        );
        undo.captured = self.squares[mv.to.index()].take();
        undo.moved = true;

        piece.square = mv.to;
        if piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank() {
            piece.promote();
            undo.promoted = true;
        }
        self.side_to_move = piece.color.opponent();
        self.squares[mv.to.index()] = Some(piece);

        undo
    }

    /// Undo a move using saved UndoInfo
    pub fn unmake_move(&mut self, mv: &Move, undo: &UndoInfo) {
        self.side_to_move = undo.side_to_move;
        if !undo.moved {
            return;
        }

        if let Some(mut piece) = self.squares[mv.to.index()].take() {
            piece.square = mv.from;
            if undo.promoted {
                piece.kind = PieceKind::Pawn;
            }
            self.squares[mv.from.index()] = Some(piece);
        }
        self.squares[mv.to.index()] = undo.captured;
    }

    /// Fork: the position after `mv`, leaving `self` untouched. Same
    /// preconditions as `make_move`.
    pub fn apply(&self, mv: &Move) -> Board {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }

    /// Find the king's square for the specified color
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    #[inline]
    pub fn has_king(&self, color: Color) -> bool {
        self.find_king(color).is_some()
    }

    /// A side has won once the opposing king is off the board
    pub fn winner(&self) -> Option<Color> {
        match (self.has_king(Color::White), self.has_king(Color::Black)) {
            (true, false) => Some(Color::White),
            (false, true) => Some(Color::Black),
            _ => None,
        }
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for rank in (0..8).rev() {
            let mut row = format!("{} |", rank + 1);
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    None => row.push_str("   |"),
                    Some(piece) => row.push_str(&format!(" {} |", piece.to_fen())),
                }
            }
            lines.push(row);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn starting_position_matches_fen() {
        let board = Board::new();
        assert_eq!(board, Board::from_fen(STARTING_FEN).unwrap());
        assert_eq!(board.to_fen(), STARTING_FEN);
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.find_king(Color::White), Some(sq("e1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
    }

    #[test]
    fn pieces_know_their_square() {
        let board = Board::new();
        for sq in Square::all() {
            if let Some(piece) = board.piece_at(sq) {
                assert_eq!(piece.square, sq);
            }
        }
    }

    #[test]
    fn fen_rejects_malformed_input() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("8/8/8 w").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/7 w").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/7x w").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 x").is_err());
    }

    #[test]
    fn make_unmake_restores_capture() {
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let before = board.clone();
        let mv = Move::new(sq("e4"), sq("d5"), false);
        let undo = board.make_move(&mv);
        assert_eq!(undo.captured.map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(board.piece_at(sq("d5")).map(|p| p.color), Some(Color::White));
        assert_eq!(board.piece_at(sq("d5")).map(|p| p.square), Some(sq("d5")));
        assert!(board.is_empty(sq("e4")));
        assert_eq!(board.side_to_move, Color::Black);
        board.unmake_move(&mv, &undo);
        assert_eq!(board, before);
    }

    #[test]
    fn promotion_is_undone() {
        let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = board.clone();
        let mv = Move::new(sq("a7"), sq("a8"), true);
        let undo = board.make_move(&mv);
        assert!(undo.promoted);
        assert_eq!(board.piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Queen));
        board.unmake_move(&mv, &undo);
        assert_eq!(board, before);
    }

    #[test]
    fn turn_follows_the_piece_that_moved() {
        // Searching for Black while White is nominally to move
        let board = Board::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1").unwrap();
        let next = board.apply(&Move::new(sq("d5"), sq("d4"), false));
        assert_eq!(next.side_to_move, Color::White);
        assert_eq!(next.piece_at(sq("d4")).map(|p| p.color), Some(Color::Black));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "captures its own piece")]
    fn friendly_capture_is_rejected_in_debug_builds() {
        let mut board = Board::new();
        board.make_move(&Move::new(sq("a1"), sq("a2"), false));
    }

    #[test]
    fn apply_forks() {
        let board = Board::new();
        let mv = Move::new(sq("g1"), sq("f3"), false);
        let next = board.apply(&mv);
        assert_eq!(board, Board::new());
        assert_eq!(next.piece_at(sq("f3")).map(|p| p.kind), Some(PieceKind::Knight));
        assert!(next.is_empty(sq("g1")));
    }

    #[test]
    fn winner_after_king_capture() {
        let mut board = Board::from_fen("8/8/8/8/8/8/1k6/K7 b - - 0 1").unwrap();
        assert_eq!(board.winner(), None);
        board.make_move(&Move::new(sq("b2"), sq("a1"), false));
        assert_eq!(board.winner(), Some(Color::Black));
    }

    #[test]
    fn display_has_labels() {
        let text = Board::new().to_string();
        assert!(text.starts_with("  +---"));
        assert!(text.contains("8 | r | n | b | q | k | b | n | r |"));
        assert!(text.ends_with("    a   b   c   d   e   f   g   h"));
    }
}
