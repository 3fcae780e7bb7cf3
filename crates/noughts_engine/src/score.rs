//! Running win/draw tally for a play session.

use crate::types::{GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Wins per mark and draws across the games of one play session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl ScoreTally {
    /// Creates a zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Games won by X.
    pub fn x_wins(&self) -> u32 {
        self.x_wins
    }

    /// Games won by O.
    pub fn o_wins(&self) -> u32 {
        self.o_wins
    }

    /// Games drawn.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Games won by `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Total finished games counted.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Counts a finished game. `InProgress` is ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Player::X) => self.x_wins += 1,
            GameStatus::Won(Player::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => return,
        }
        debug!(tally = %self, "Outcome recorded");
    }

    /// Zeroes every counter.
    #[instrument(skip(self), fields(tally = %self))]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X: {}  O: {}  Draws: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}
