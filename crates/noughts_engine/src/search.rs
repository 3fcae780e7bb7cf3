//! Exhaustive minimax search for the side to move.
//!
//! Scores are always from the point of view of the mark the search was asked
//! to move for (the maximizing mark): a forced win is [`WIN_SCORE`], a forced
//! loss is `-WIN_SCORE` and a draw under best play is [`DRAW_SCORE`].

use crate::rules::{has_won, is_full};
use crate::types::{Board, CELL_COUNT, Player, Square};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Score of a position won by the maximizing mark.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// How terminal positions are scored.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Scoring {
    /// Every win is worth the same regardless of how many plies it takes.
    ///
    /// The search has no preference for quicker wins or slower losses.
    #[default]
    Flat,
    /// A win `depth` plies below the root is worth `WIN_SCORE - depth`, a loss
    /// `depth - WIN_SCORE`, so sooner wins and later losses are preferred.
    DepthAdjusted,
}

impl Scoring {
    fn win(self, depth: u8) -> i32 {
        match self {
            Scoring::Flat => WIN_SCORE,
            Scoring::DepthAdjusted => WIN_SCORE - i32::from(depth),
        }
    }

    /// Depth only matters to the cache when it changes the score.
    fn cache_depth(self, depth: u8) -> u8 {
        match self {
            Scoring::Flat => 0,
            Scoring::DepthAdjusted => depth,
        }
    }
}

/// A root move and its game-theoretic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// Cell index (0-8) of the move.
    pub index: usize,
    /// Score of the move for the side that makes it.
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeKey {
    board: Board,
    to_move: Player,
    maximizer: Player,
    depth: u8,
}

/// Minimax searcher with optional transposition cache.
///
/// Moves are tried in increasing cell order and only a strictly better score
/// replaces the current best, so ties go to the lowest index.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    scoring: Scoring,
    cache: Option<HashMap<NodeKey, i32>>,
    nodes: u64,
    cache_hits: u64,
}

impl Searcher {
    /// Creates a searcher without a cache.
    pub fn new(scoring: Scoring) -> Self {
        Self {
            scoring,
            ..Self::default()
        }
    }

    /// Enables the transposition cache. Chosen moves and scores are unchanged.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(HashMap::new());
        self
    }

    /// Returns the scoring mode.
    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    /// Nodes visited by the most recent search.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes
    }

    /// Cache hits during the most recent search.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Picks the best move for `mark`, lowest index on ties.
    ///
    /// # Panics
    ///
    /// If `board` is already won or full.
    pub fn best_move(&mut self, board: &Board, mark: Player) -> SearchResult {
        self.analyse(board, mark).0
    }

    /// Best move together with the score of every legal move, from one search.
    ///
    /// # Panics
    ///
    /// If `board` is already won or full.
    #[instrument(skip(self, board), fields(board = %board.notation(), scoring = %self.scoring))]
    pub fn analyse(&mut self, board: &Board, mark: Player) -> (SearchResult, Vec<SearchResult>) {
        let moves = self.score_moves(board, mark);
        let mut candidates = moves.iter().copied();
        let first = candidates
            .next()
            .expect("non-terminal board has an empty cell");
        let best = candidates.fold(first, |best, candidate| {
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        });

        debug!(
            index = best.index,
            score = best.score,
            nodes = self.nodes,
            cache_hits = self.cache_hits,
            "Search complete"
        );
        (best, moves)
    }

    /// Scores every legal move for `mark`, in increasing cell order.
    ///
    /// # Panics
    ///
    /// If `board` is already won or full.
    pub fn score_moves(&mut self, board: &Board, mark: Player) -> Vec<SearchResult> {
        assert!(
            !has_won(board, Player::X) && !has_won(board, Player::O) && !is_full(board),
            "search called on terminal board {}",
            board.notation()
        );

        self.nodes = 0;
        self.cache_hits = 0;

        let mut scratch = *board;
        let mut results = Vec::with_capacity(CELL_COUNT);
        for index in board.empty_cells() {
            scratch.set(index, Square::Occupied(mark));
            let score = self.minimax(&mut scratch, mark.opponent(), mark, 1);
            scratch.set(index, Square::Empty);
            results.push(SearchResult { index, score });
        }
        results
    }

    /// Value of `board` for `maximizer` with `to_move` about to play.
    ///
    /// Every placement is undone before returning, so `board` comes back as it went in.
    fn minimax(&mut self, board: &mut Board, to_move: Player, maximizer: Player, depth: u8) -> i32 {
        self.nodes += 1;

        if has_won(board, maximizer) {
            return self.scoring.win(depth);
        }
        if has_won(board, maximizer.opponent()) {
            return -self.scoring.win(depth);
        }
        if is_full(board) {
            return DRAW_SCORE;
        }

        let key = NodeKey {
            board: *board,
            to_move,
            maximizer,
            depth: self.scoring.cache_depth(depth),
        };
        if let Some(cache) = &self.cache
            && let Some(&score) = cache.get(&key)
        {
            self.cache_hits += 1;
            return score;
        }

        let maximizing = to_move == maximizer;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for index in 0..CELL_COUNT {
            if !board.is_empty(index) {
                continue;
            }
            board.set(index, Square::Occupied(to_move));
            let score = self.minimax(board, to_move.opponent(), maximizer, depth + 1);
            board.set(index, Square::Empty);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        if let Some(cache) = &mut self.cache {
            cache.insert(key, best);
        }
        best
    }
}

/// Best move for `mark` with flat scoring and no cache.
///
/// Pure: the caller's board is not modified.
///
/// # Panics
///
/// If `board` is already won or full.
pub fn best_move(board: &Board, mark: Player) -> SearchResult {
    Searcher::default().best_move(board, mark)
}
