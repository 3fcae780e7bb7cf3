//! Game session: one board, turn order and status.

use crate::action::{Move, MoveError};
use crate::position::Position;
use crate::rules;
use crate::types::{Board, GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A single game from the first move to a win or draw.
///
/// The session is the only place turn order is enforced: every accepted move
/// is made by [`GameSession::to_move`], which then flips to the opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<Move>,
}

impl GameSession {
    /// Starts a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Places the current player's mark at `index` (0-8) and returns the new status.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] once the game has finished, otherwise the
    /// errors of [`rules::apply_move`]. The session is unchanged on error.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn apply_move(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        if self.is_over() {
            warn!(index, status = %self.status, "Move after game over");
            return Err(MoveError::GameOver);
        }

        let player = self.to_move;
        rules::apply_move(&mut self.board, index, player)?;
        if let Some(position) = Position::from_index(index) {
            self.history.push(Move::new(player, position));
        }

        self.status = if rules::has_won(&self.board, player) {
            GameStatus::Won(player)
        } else if rules::is_full(&self.board) {
            GameStatus::Draw
        } else {
            self.to_move = player.opponent();
            GameStatus::InProgress
        };

        match self.status {
            GameStatus::InProgress => debug!(index, next = %self.to_move, "Move accepted"),
            status => info!(index, %status, moves = self.history.len(), "Game finished"),
        }
        Ok(self.status)
    }

    /// Discards this game and starts a fresh one.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
