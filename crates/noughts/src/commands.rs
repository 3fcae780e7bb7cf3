//! One-shot analysis commands.

use anyhow::Result;
use noughts_engine::{
    Board, GameSession, GameStatus, Mark, Move, SearchResult, Searcher, check_winner, is_full,
};
use serde::Serialize;
use tracing::{info, instrument};

/// Best move and every move's score for one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Board in compact notation.
    pub board: String,
    /// Mark to move.
    pub mark: Mark,
    /// Chosen move.
    pub best: SearchResult,
    /// Scores of all legal moves, in cell order.
    pub moves: Vec<SearchResult>,
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Best move for {}: cell {} (score {})",
            self.mark,
            self.best.index + 1,
            self.best.score
        )?;
        for result in &self.moves {
            writeln!(f, "  cell {}: {}", result.index + 1, result.score)?;
        }
        Ok(())
    }
}

/// Analyses `board` for `mark`, or for the side implied by the mark counts.
///
/// # Errors
///
/// The position is already won or full.
#[instrument(skip(board, searcher), fields(board = %board.notation()))]
pub fn suggest(board: &Board, mark: Option<Mark>, searcher: &mut Searcher) -> Result<Suggestion> {
    if let Some(winner) = check_winner(board) {
        anyhow::bail!("Game is already over: {} has won", winner);
    }
    if is_full(board) {
        anyhow::bail!("Game is already over: the board is full");
    }

    let mark = mark.unwrap_or_else(|| board.implied_to_move());
    let (best, moves) = searcher.analyse(board, mark);
    info!(index = best.index, score = best.score, "Suggestion ready");

    Ok(Suggestion {
        board: board.notation(),
        mark,
        best,
        moves,
    })
}

/// A game the computer played against itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfPlayReport {
    /// Moves in order.
    pub moves: Vec<Move>,
    /// Board after each move, in compact notation.
    pub positions: Vec<String>,
    /// Final status.
    pub status: GameStatus,
}

impl std::fmt::Display for SelfPlayReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (turn, (mov, position)) in self.moves.iter().zip(&self.positions).enumerate() {
            writeln!(f, "{:>2}. {:<20} {}", turn + 1, mov.to_string(), position)?;
        }
        writeln!(f, "Result: {}", self.status)
    }
}

/// Lets the computer play both marks from an empty board.
#[instrument(skip(searcher), fields(scoring = %searcher.scoring()))]
pub fn self_play(searcher: &mut Searcher) -> Result<SelfPlayReport> {
    let mut session = GameSession::new();
    let mut positions = Vec::new();

    while !session.is_over() {
        let result = searcher.best_move(session.board(), session.to_move());
        session.apply_move(result.index)?;
        positions.push(session.board().notation());
    }

    info!(status = %session.status(), "Self-play finished");
    Ok(SelfPlayReport {
        moves: session.history().to_vec(),
        positions,
        status: session.status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_infers_side_to_move() {
        let board: Board = "X........".parse().unwrap();
        let suggestion = suggest(&board, None, &mut Searcher::default()).unwrap();
        assert_eq!(suggestion.mark, Mark::O);
        assert_eq!(suggestion.best.index, 4);
        assert_eq!(suggestion.moves.len(), 8);
        assert!(suggestion.to_string().starts_with("Best move for O: cell 5 (score 0)"));
    }

    #[test]
    fn test_suggest_searches_once() {
        let board: Board = "X...O....".parse().unwrap();
        let mut suggesting = Searcher::default().with_cache();
        suggest(&board, Some(Mark::X), &mut suggesting).unwrap();

        let mut scoring = Searcher::default().with_cache();
        scoring.score_moves(&board, Mark::X);
        assert_eq!(suggesting.nodes_visited(), scoring.nodes_visited());
        assert_eq!(suggesting.cache_hits(), scoring.cache_hits());
    }

    #[test]
    fn test_suggest_refuses_finished_games() {
        let won: Board = "XXXOO....".parse().unwrap();
        assert!(suggest(&won, None, &mut Searcher::default()).is_err());

        let drawn: Board = "XOXXOOOXX".parse().unwrap();
        assert!(suggest(&drawn, None, &mut Searcher::default()).is_err());
    }

    #[test]
    fn test_suggestion_serializes() {
        let board: Board = "XX.OO....".parse().unwrap();
        let suggestion = suggest(&board, Some(Mark::X), &mut Searcher::default()).unwrap();
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["best"]["index"], 2);
        assert_eq!(json["best"]["score"], 10);
        assert_eq!(json["mark"], "X");
    }

    #[test]
    fn test_self_play_draws() {
        let report = self_play(&mut Searcher::default().with_cache()).unwrap();
        assert_eq!(report.status, GameStatus::Draw);
        assert_eq!(report.moves.len(), 9);
        assert_eq!(report.positions.last().map(String::len), Some(9));
    }
}
