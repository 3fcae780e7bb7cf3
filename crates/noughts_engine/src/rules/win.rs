//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Player, Square};
use tracing::instrument;

/// The eight winning lines as cell-index triples.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns true iff `player` holds all three cells of some winning line.
pub fn has_won(board: &Board, player: Player) -> bool {
    let mark = Square::Occupied(player);
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == Some(mark)))
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise. X is checked first; a board where both marks hold a
/// line cannot arise from legal play.
#[instrument(skip(board), fields(board = %board.notation()))]
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| has_won(board, player))
}
