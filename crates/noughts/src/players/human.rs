//! Human player reading typed lines.

use super::{Player, PlayerAction};
use crate::mode::Opponent;
use anyhow::Result;
use noughts_engine::{GameSession, Position};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Human player fed by lines of text (usually stdin).
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<String>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _session: &GameSession) -> Result<PlayerAction> {
        match self.input_rx.recv().await {
            Some(line) => {
                let action = parse_action(&line);
                debug!(player = %self.name, ?action, "Input parsed");
                Ok(action)
            }
            None => {
                debug!(player = %self.name, "Input closed, treating as quit");
                Ok(PlayerAction::Quit)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Interprets one line of input.
///
/// Cells are numbered 1-9 for people, so `5` places on index 4. Position
/// labels such as `center` or `top-left` work too.
#[instrument]
pub fn parse_action(line: &str) -> PlayerAction {
    let input = line.trim().to_lowercase();
    let mut words = input.split_whitespace();
    let Some(first) = words.next() else {
        return PlayerAction::Continue;
    };

    if let Ok(number) = first.parse::<usize>()
        && number >= 1
    {
        return PlayerAction::Place(number - 1);
    }

    match (first, words.next()) {
        ("r" | "restart" | "new", None) => PlayerAction::Restart,
        ("s" | "score" | "scores", None) => PlayerAction::Scores,
        ("q" | "quit" | "exit", None) => PlayerAction::Quit,
        ("m" | "mode", None) => PlayerAction::SwitchMode(None),
        ("m" | "mode", Some(target)) => match target.parse::<Opponent>() {
            Ok(mode) => PlayerAction::SwitchMode(Some(mode)),
            Err(_) => PlayerAction::Unrecognized(line.trim().to_string()),
        },
        _ => Position::from_label(&input)
            .map(|pos| PlayerAction::Place(pos.to_index()))
            .unwrap_or_else(|| PlayerAction::Unrecognized(line.trim().to_string())),
    }
}
