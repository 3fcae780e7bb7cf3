//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::{HumanPlayer, parse_action};

use crate::mode::Opponent;
use anyhow::Result;
use noughts_engine::GameSession;

/// What a player wants to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Place the current mark on a cell (0-8; larger indices are rejected by the engine).
    Place(usize),
    /// Abandon the current game and start a fresh one.
    Restart,
    /// Switch opponent mode; `None` toggles. Resets the score tally.
    SwitchMode(Option<Opponent>),
    /// Show the score tally.
    Scores,
    /// Blank input: nothing to do.
    Continue,
    /// Leave the program.
    Quit,
    /// Input that matched no command.
    Unrecognized(String),
}

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets the next action from this player for the given game.
    async fn get_move(&mut self, session: &GameSession) -> Result<PlayerAction>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
