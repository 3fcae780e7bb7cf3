//! Move records and move errors.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Reasons a move is rejected. The board is never modified when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell index is outside 0-8.
    #[display("Cell {} is off the board (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The cell already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl MoveError {
    /// True for the board-level illegal move errors (bad index or occupied cell).
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, MoveError::OutOfRange(_) | MoveError::Occupied(_))
    }
}

impl std::error::Error for MoveError {}
