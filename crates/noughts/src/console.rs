//! Plain-text console front end.

use crate::orchestrator::GameEvent;
use anyhow::Result;
use noughts_engine::GameStatus;
use std::io::{BufRead, Write};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Reads stdin lines on a dedicated thread and forwards them to `tx`.
///
/// Blocking stdin reads stay off the async runtime so shutdown never waits on them.
pub fn spawn_stdin_reader(tx: mpsc::UnboundedSender<String>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        debug!("Input receiver dropped");
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    return;
                }
            }
        }
        debug!("Stdin closed");
    })
}

/// Text shown for one event.
pub fn render(event: &GameEvent) -> String {
    match event {
        GameEvent::RoundStarted { mode } => format!(
            "\n=== New game: {} ===\nType 1-9 to play, r restart, m switch mode, s scores, q quit.",
            mode.name()
        ),
        GameEvent::AwaitingMove { mark, board } => {
            format!("\n{}\n\nPlayer {}'s turn:", board, mark)
        }
        GameEvent::ComputerThinking { mark } => format!("Computer ({}) is thinking...", mark),
        GameEvent::MoveMade { mark, position } => {
            format!("{} takes {} ({})", mark, position, position.to_index() + 1)
        }
        GameEvent::MoveRejected { reason } => format!("Illegal move: {}", reason),
        GameEvent::InputIgnored { input } => format!("Unrecognized input {:?}", input),
        GameEvent::GameOver {
            status,
            board,
            tally,
        } => {
            let headline = match status {
                GameStatus::Won(mark) => format!("Player {} Wins!", mark),
                GameStatus::Draw => "Draw!".to_string(),
                GameStatus::InProgress => status.to_string(),
            };
            format!(
                "\n{}\n\n{}\nScore - {}\nPress Enter for the next round, q to quit.",
                board, headline, tally
            )
        }
        GameEvent::ModeChanged { mode } => format!("Mode: {} (scores reset)", mode.name()),
        GameEvent::Scores { tally } => format!("Score - {}", tally),
        GameEvent::Quit { tally } => format!("Final score - {}\nBye!", tally),
    }
}

/// Writes rendered events to `out` until every sender is dropped.
pub async fn run_renderer(
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
    mut out: impl Write,
) -> Result<()> {
    while let Some(event) = event_rx.recv().await {
        writeln!(out, "{}", render(&event))?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Opponent;
    use noughts_engine::{Mark, Position, ScoreTally};

    #[test]
    fn test_render_move_uses_one_based_cell() {
        let text = render(&GameEvent::MoveMade {
            mark: Mark::X,
            position: Position::Center,
        });
        assert_eq!(text, "X takes Center (5)");
    }

    #[test]
    fn test_render_game_over() {
        let mut tally = ScoreTally::new();
        tally.record(GameStatus::Won(Mark::O));
        let text = render(&GameEvent::GameOver {
            status: GameStatus::Won(Mark::O),
            board: "board".to_string(),
            tally,
        });
        assert!(text.contains("Player O Wins!"));
        assert!(text.contains("X: 0  O: 1  Draws: 0"));
    }

    #[tokio::test]
    async fn test_renderer_drains_until_senders_drop() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(GameEvent::ModeChanged {
            mode: Opponent::Human,
        })
        .unwrap();
        tx.send(GameEvent::Scores {
            tally: ScoreTally::new(),
        })
        .unwrap();
        drop(tx);

        let mut out = Vec::new();
        run_renderer(rx, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Mode: Human vs Human (scores reset)\nScore - X: 0  O: 0  Draws: 0\n"
        );
    }
}
