//! BacktrackChess - Game Module
//!
//! Turn-taking loop between two players, each either a human typing moves or
//! the search engine. A game ends when a king is captured, when the side to
//! move has no moves, when the turn limit is reached, or when a human quits.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::board::{Board, Move};
use crate::error::{ChessError, ChessResult};
use crate::evaluation::score;
use crate::move_generator::MoveGenerator;
use crate::search::SearchEngine;
use crate::types::*;

/// Default number of full turns before the game is called a draw
pub const DEFAULT_MAX_TURNS: u32 = 10000;

/// Who plays one color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Ai { depth: u32 },
}

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The other king was captured
    Won(Color),
    /// This color had no moves on its turn
    Stalemate(Color),
    TurnLimit,
    Aborted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(color) => write!(f, "{color} won by capturing the king"),
            Outcome::Stalemate(color) => write!(f, "Draw: {color} has no moves"),
            Outcome::TurnLimit => write!(f, "Draw: turn limit reached"),
            Outcome::Aborted => write!(f, "Game aborted"),
        }
    }
}

pub struct Game {
    board: Board,
    players: [PlayerKind; 2],
    /// Completed full turns (incremented after Black moves)
    turn: u32,
    max_turns: u32,
    engine: SearchEngine,
    move_generator: MoveGenerator,
}

impl Game {
    pub fn new(board: Board, white: PlayerKind, black: PlayerKind, engine: SearchEngine) -> Self {
        Game {
            board,
            players: [white, black],
            turn: 0,
            max_turns: DEFAULT_MAX_TURNS,
            engine,
            move_generator: MoveGenerator::new(),
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Play until the game ends
    pub fn play<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> ChessResult<Outcome> {
        writeln!(output, "{}", self.board)?;
        loop {
            if let Some(outcome) = self.do_turn(input, output)? {
                info!(%outcome, turn = self.turn, score = score(&self.board), "game over");
                writeln!(output, "{outcome}. Score: {}", score(&self.board))?;
                return Ok(outcome);
            }
        }
    }

    /// Play one move for the side to move. Returns the outcome if the game
    /// ended.
    pub fn do_turn<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> ChessResult<Option<Outcome>> {
        let color = self.board.side_to_move;

        // A position loaded without one of the kings is already decided
        if let Some(winner) = self.board.winner() {
            return Ok(Some(Outcome::Won(winner)));
        }
        if self.turn >= self.max_turns {
            return Ok(Some(Outcome::TurnLimit));
        }
        if self.move_generator.moves_for(&self.board, color).is_empty() {
            return Ok(Some(Outcome::Stalemate(color)));
        }

        writeln!(output)?;
        let mv = match self.players[color.index()] {
            PlayerKind::Human => match self.human_move(color, input, output)? {
                Some(mv) => mv,
                None => return Ok(Some(Outcome::Aborted)),
            },
            PlayerKind::Ai { depth } => {
                let result = self.engine.best_move(&self.board, color, depth);
                let Some(mv) = result.best_move else {
                    return Ok(Some(Outcome::Stalemate(color)));
                };
                let piece = self.board.piece_at(mv.from).map(|p| p.summary()).unwrap_or_default();
                writeln!(output, "{color} moves {piece} {mv} (expected score {})", result.score)?;
                mv
            }
        };

        self.board.make_move(&mv);
        info!(%color, %mv, score = score(&self.board), "move played");
        writeln!(output, "{}", self.board)?;

        for side in [Color::White, Color::Black] {
            if self.move_generator.is_in_check(&self.board, side) {
                writeln!(output, "{side} is in check!")?;
            }
        }

        if let Some(winner) = self.board.winner() {
            return Ok(Some(Outcome::Won(winner)));
        }

        if color == Color::Black {
            self.turn += 1;
        }
        writeln!(
            output,
            "{}'s turn, turn {}, score {}, pieces {}",
            self.board.side_to_move,
            self.turn + 1,
            score(&self.board),
            self.board.piece_count()
        )?;

        Ok(None)
    }

    /// Prompt until a valid move is entered. `None` on "quit" or end of input.
    fn human_move<R: BufRead, W: Write>(&self, color: Color, input: &mut R, output: &mut W) -> ChessResult<Option<Move>> {
        loop {
            write!(output, "{color} to move (e.g. e2e4 or 4 1 4 3): ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();

            match line {
                "" => continue,
                "quit" => return Ok(None),
                "d" => {
                    writeln!(output, "{}", self.board)?;
                    continue;
                }
                "moves" => {
                    let moves: Vec<String> = self
                        .move_generator
                        .moves_for(&self.board, color)
                        .iter()
                        .map(Move::to_uci)
                        .collect();
                    writeln!(output, "{}", moves.join(" "))?;
                    continue;
                }
                _ => {}
            }

            let requested = parse_move_input(line)
                .and_then(|(from, to)| self.move_generator.validate_move(&self.board, color, from, to));
            match requested {
                Ok(mv) => return Ok(Some(mv)),
                Err(err) => {
                    warn!(%err, input = line, "rejected move");
                    writeln!(output, "{err}")?;
                }
            }
        }
    }
}

/// Parse "e2e4", "e2 e4", "e7e8q" or four coordinates "4 1 4 3"
/// (file and rank, 0..7) into origin and destination squares
pub fn parse_move_input(line: &str) -> ChessResult<(Square, Square)> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() == 4 {
        let mut coords = [0u8; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| ChessError::InvalidSquare {
                name: part.to_string(),
            })?;
        }
        let square = |file: u8, rank: u8| {
            Square::new(file, rank).ok_or_else(|| ChessError::InvalidSquare {
                name: format!("({file}, {rank})"),
            })
        };
        return Ok((square(coords[0], coords[1])?, square(coords[2], coords[3])?));
    }

    let compact: String = parts.concat();
    let promotion = compact.strip_suffix(|c: char| c.eq_ignore_ascii_case(&'q'));
    let squares = promotion.unwrap_or(&compact);
    if !squares.is_ascii() || squares.len() != 4 {
        return Err(ChessError::InvalidSquare {
            name: line.to_string(),
        });
    }
    let from = Square::parse(&squares[..2])?;
    let to = Square::parse(&squares[2..])?;

    // The queen suffix is only meaningful on a last-rank arrival
    if promotion.is_some() && to.rank() != Color::White.promotion_rank() && to.rank() != Color::Black.promotion_rank() {
        return Err(ChessError::IllegalMove { from, to });
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn parses_both_notations() {
        assert_eq!(parse_move_input("e2e4").unwrap(), (sq("e2"), sq("e4")));
        assert_eq!(parse_move_input("e2 e4").unwrap(), (sq("e2"), sq("e4")));
        assert_eq!(parse_move_input("a7a8q").unwrap(), (sq("a7"), sq("a8")));
        assert_eq!(parse_move_input("4 1 4 3").unwrap(), (sq("e2"), sq("e4")));
        assert!(parse_move_input("4 1 4 8").is_err());
        assert!(parse_move_input("x 1 4 3").is_err());
        assert!(parse_move_input("e2").is_err());
        assert!(parse_move_input("z2e4").is_err());
    }

    #[test]
    fn queen_suffix_needs_a_last_rank_destination() {
        assert_eq!(parse_move_input("e7e8Q").unwrap(), (sq("e7"), sq("e8")));
        assert_eq!(parse_move_input("b2a1q").unwrap(), (sq("b2"), sq("a1")));
        assert!(matches!(
            parse_move_input("e2e4q"),
            Err(ChessError::IllegalMove { .. })
        ));
        assert!(parse_move_input("e2 e4 q").is_err());
    }

    #[test]
    fn human_input_is_reprompted_until_valid() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let mut game = Game::new(board, PlayerKind::Human, PlayerKind::Human, SearchEngine::default());
        let mut input = Cursor::new("e7e5\ne2e5\ne2e4\n");
        let mut output = Vec::new();
        assert_eq!(game.do_turn(&mut input, &mut output).unwrap(), None);
        assert!(game.board().piece_at(sq("e4")).is_some());
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("No piece at square e7"));
        assert!(text.contains("Illegal move: from e2 to e5"));
    }

    #[test]
    fn end_of_input_aborts() {
        let mut game = Game::new(Board::new(), PlayerKind::Human, PlayerKind::Human, SearchEngine::default());
        let mut output = Vec::new();
        let outcome = game.play(&mut Cursor::new(""), &mut output).unwrap();
        assert_eq!(outcome, Outcome::Aborted);
    }

    #[test]
    fn ai_captures_king_and_wins() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1").unwrap();
        let mut game = Game::new(board, PlayerKind::Ai { depth: 1 }, PlayerKind::Human, SearchEngine::default());
        let mut output = Vec::new();
        let outcome = game.play(&mut Cursor::new(""), &mut output).unwrap();
        assert_eq!(outcome, Outcome::Won(Color::White));
    }

    #[test]
    fn side_without_moves_is_stalemated() {
        // Black king boxed in by its own immobile pawns
        let board = Board::from_fen("7K/8/8/8/8/8/pp6/kp6 b - - 0 1").unwrap();
        let mut game = Game::new(board, PlayerKind::Ai { depth: 2 }, PlayerKind::Ai { depth: 2 }, SearchEngine::default());
        let mut output = Vec::new();
        let outcome = game.play(&mut Cursor::new(""), &mut output).unwrap();
        assert_eq!(outcome, Outcome::Stalemate(Color::Black));
    }

    #[test]
    fn missing_king_is_a_win_before_any_move() {
        let fen = "8/8/8/8/8/8/8/4RK2 w - - 0 1";
        for white in [PlayerKind::Ai { depth: 2 }, PlayerKind::Human] {
            let mut game = Game::new(Board::from_fen(fen).unwrap(), white, PlayerKind::Human, SearchEngine::default());
            let mut output = Vec::new();
            let outcome = game.play(&mut Cursor::new("e1e8\n"), &mut output).unwrap();
            assert_eq!(outcome, Outcome::Won(Color::White), "{white:?}");
            assert_eq!(game.board(), &Board::from_fen(fen).unwrap());
            let text = String::from_utf8(output).unwrap();
            assert!(!text.contains("to move"));
        }
    }

    #[test]
    fn missing_king_on_the_mover_side_loses() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        let mut game = Game::new(board, PlayerKind::Ai { depth: 1 }, PlayerKind::Ai { depth: 1 }, SearchEngine::default());
        let mut output = Vec::new();
        let outcome = game.play(&mut Cursor::new(""), &mut output).unwrap();
        assert_eq!(outcome, Outcome::Won(Color::Black));
    }

    #[test]
    fn turn_limit_ends_game() {
        let mut game = Game::new(
            Board::new(),
            PlayerKind::Ai { depth: 1 },
            PlayerKind::Ai { depth: 1 },
            SearchEngine::default(),
        )
        .with_max_turns(2);
        let mut output = Vec::new();
        let outcome = game.play(&mut Cursor::new(""), &mut output).unwrap();
        assert_eq!(outcome, Outcome::TurnLimit);
        assert_eq!(game.turn(), 2);
    }
}
