//! BacktrackChess - Search Engine Module
//!
//! Depth-limited backtracking minimax over pseudo-legal moves:
//! - White maximizes the material score, Black minimizes it
//! - Every node below the requested depth is fully expanded (no pruning)
//! - Moves are applied and undone on a private copy of the caller's board
//! - Ties go to the first move in enumeration order, or to a seeded random
//!   pick among the tied root moves
//! - The root move list can be split across worker threads

use std::thread;
use std::time::Instant;

use rand::prelude::*;
use tracing::{debug, trace};

use crate::board::{Board, Move};
use crate::evaluation::score;
use crate::move_generator::MoveGenerator;
use crate::types::*;

/// How to choose among root moves that share the best score
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// First in enumeration order (reproducible)
    #[default]
    First,
    /// Uniformly among the tied moves, from a seeded generator
    Random { seed: u64 },
}

/// Search engine options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Worker threads for the root move list; 0 means one per logical CPU
    pub threads: usize,
    pub tie_break: TieBreak,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            threads: 1,
            tie_break: TieBreak::First,
        }
    }
}

/// Outcome of a search: the chosen move (if any) and its backed-up score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
}

impl SearchResult {
    fn leaf(board: &Board) -> Self {
        SearchResult {
            best_move: None,
            score: score(board),
        }
    }
}

pub struct SearchEngine {
    move_generator: MoveGenerator,
    config: SearchConfig,
    rng: Option<StdRng>,
    pub nodes_searched: u64,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.tie_break {
            TieBreak::First => None,
            TieBreak::Random { seed } => Some(StdRng::seed_from_u64(seed)),
        };
        SearchEngine {
            move_generator: MoveGenerator::new(),
            config,
            rng,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of worker threads the root will be split across
    pub fn thread_count(&self) -> usize {
        match self.config.threads {
            0 => num_cpus::get().max(1),
            n => n,
        }
    }

    /// Choose a move for `color` by looking `depth` plies ahead.
    ///
    /// Returns no move when `depth` is 0, when a king is already gone, or
    /// when `color` has no moves; the score is then the current material.
    /// `board` is never modified.
    pub fn best_move(&mut self, board: &Board, color: Color, depth: u32) -> SearchResult {
        let start = Instant::now();
        self.nodes_searched = 1;

        if depth == 0 || is_terminal(board) {
            return SearchResult::leaf(board);
        }

        let moves = self.move_generator.moves_for(board, color);
        if moves.is_empty() {
            debug!(%color, depth, "no moves available");
            return SearchResult::leaf(board);
        }

        let threads = self.thread_count().min(moves.len());
        let (scores, nodes) = if threads > 1 {
            root_scores_parallel(&self.move_generator, board, color, depth, &moves, threads)
        } else {
            let mut work = board.clone();
            let mut nodes = 0;
            let scores = root_scores(&self.move_generator, &mut work, color, depth, &moves, &mut nodes);
            (scores, nodes)
        };
        self.nodes_searched += nodes;

        for (mv, s) in moves.iter().zip(&scores) {
            trace!(%mv, score = *s, "root move");
        }

        let (index, best_score) = self.select(color, &scores);
        let result = SearchResult {
            best_move: moves.get(index).copied(),
            score: best_score,
        };

        debug!(
            %color,
            depth,
            nodes = self.nodes_searched,
            threads,
            best = %result.best_move.map(|m| m.to_uci()).unwrap_or_default(),
            score = result.score,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        result
    }

    /// Index and value of the chosen root score
    fn select(&mut self, color: Color, scores: &[i32]) -> (usize, i32) {
        let mut best_index = 0;
        for (i, &s) in scores.iter().enumerate().skip(1) {
            if improves(color, s, scores[best_index]) {
                best_index = i;
            }
        }
        let best_score = scores.get(best_index).copied().unwrap_or_default();

        if let Some(rng) = self.rng.as_mut() {
            let tied: Vec<usize> = (0..scores.len()).filter(|&i| scores[i] == best_score).collect();
            if let Some(&pick) = tied.choose(rng) {
                return (pick, best_score);
            }
        }

        (best_index, best_score)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(SearchConfig::default())
    }
}

/// One-shot search with the default configuration
pub fn best_move(board: &Board, color: Color, depth: u32) -> SearchResult {
    SearchEngine::default().best_move(board, color, depth)
}

/// A position is over once either king has been captured
#[inline]
fn is_terminal(board: &Board) -> bool {
    !board.has_king(Color::White) || !board.has_king(Color::Black)
}

/// Strictly better for `color`; equal scores keep the earlier move
#[inline]
fn improves(color: Color, candidate: i32, incumbent: i32) -> bool {
    match color {
        Color::White => candidate > incumbent,
        Color::Black => candidate < incumbent,
    }
}

/// Backed-up score of every root move, in move order
fn root_scores(
    move_generator: &MoveGenerator,
    board: &mut Board,
    color: Color,
    depth: u32,
    moves: &[Move],
    nodes: &mut u64,
) -> Vec<i32> {
    moves
        .iter()
        .map(|mv| {
            let undo = board.make_move(mv);
            let s = minimax(move_generator, board, color.opponent(), depth - 1, nodes);
            board.unmake_move(mv, &undo);
            s
        })
        .collect()
}

/// Split the root moves into contiguous chunks, one per worker. Each worker
/// owns a board copy, and chunks are concatenated back in order so the
/// result matches the single-threaded search exactly.
fn root_scores_parallel(
    move_generator: &MoveGenerator,
    board: &Board,
    color: Color,
    depth: u32,
    moves: &[Move],
    threads: usize,
) -> (Vec<i32>, u64) {
    let chunk_size = moves.len().div_ceil(threads);

    thread::scope(|scope| {
        let handles: Vec<_> = moves
            .chunks(chunk_size)
            .map(|chunk| {
                let mut work = board.clone();
                scope.spawn(move || {
                    let mut nodes = 0;
                    let scores = root_scores(move_generator, &mut work, color, depth, chunk, &mut nodes);
                    (scores, nodes)
                })
            })
            .collect();

        let mut scores = Vec::with_capacity(moves.len());
        let mut nodes = 0;
        for handle in handles {
            let (chunk_scores, chunk_nodes) = handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            scores.extend(chunk_scores);
            nodes += chunk_nodes;
        }
        (scores, nodes)
    })
}

/// Backed-up material score of `board` with `color` to move
fn minimax(move_generator: &MoveGenerator, board: &mut Board, color: Color, depth: u32, nodes: &mut u64) -> i32 {
    *nodes += 1;

    if depth == 0 || is_terminal(board) {
        return score(board);
    }

    let moves = move_generator.moves_for(board, color);
    let mut best: Option<i32> = None;

    for mv in &moves {
        let undo = board.make_move(mv);
        let s = minimax(move_generator, board, color.opponent(), depth - 1, nodes);
        board.unmake_move(mv, &undo);

        best = match best {
            Some(b) if !improves(color, s, b) => Some(b),
            _ => Some(s),
        };
    }

    // No moves: stalemate by lack of moves, scored as it stands
    best.unwrap_or_else(|| score(board))
}
