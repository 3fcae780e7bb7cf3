//! Computer player backed by the minimax search.

use super::{Player, PlayerAction};
use anyhow::Result;
use noughts_engine::{GameSession, Searcher};
use std::time::Duration;
use tracing::{debug, instrument};

/// Perfect-play computer opponent.
pub struct ComputerPlayer {
    name: String,
    searcher: Searcher,
    delay: Duration,
}

impl ComputerPlayer {
    /// Creates a computer player that waits `delay` before answering.
    pub fn new(name: impl Into<String>, searcher: Searcher, delay: Duration) -> Self {
        Self {
            name: name.into(),
            searcher,
            delay,
        }
    }
}

#[async_trait::async_trait]
impl Player for ComputerPlayer {
    #[instrument(skip_all, fields(player = %self.name, mark = %session.to_move()))]
    async fn get_move(&mut self, session: &GameSession) -> Result<PlayerAction> {
        if session.is_over() {
            anyhow::bail!("No valid moves available");
        }

        // Lets the human see their own move land first
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = self.searcher.best_move(session.board(), session.to_move());
        debug!(
            index = result.index,
            score = result.score,
            nodes = self.searcher.nodes_visited(),
            "Computer chose position"
        );
        Ok(PlayerAction::Place(result.index))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
