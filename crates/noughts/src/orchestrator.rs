//! Game orchestration between players.

use crate::mode::Opponent;
use crate::players::{Player, PlayerAction};
use anyhow::Result;
use noughts_engine::{GameSession, GameStatus, Mark, Position, ScoreTally};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh game began.
    RoundStarted {
        /// Current opponent mode.
        mode: Opponent,
    },
    /// A human is expected to move.
    AwaitingMove {
        /// Mark to place.
        mark: Mark,
        /// Board rendered as a grid.
        board: String,
    },
    /// The computer is choosing its move.
    ComputerThinking {
        /// Mark the computer plays.
        mark: Mark,
    },
    /// A mark was placed.
    MoveMade {
        /// Mark placed.
        mark: Mark,
        /// Where it was placed.
        position: Position,
    },
    /// A move was refused; nothing changed.
    MoveRejected {
        /// Why the move is illegal.
        reason: String,
    },
    /// Input matched no command.
    InputIgnored {
        /// The raw input.
        input: String,
    },
    /// The game reached a win or a draw.
    GameOver {
        /// Final status.
        status: GameStatus,
        /// Final board rendered as a grid.
        board: String,
        /// Tally including this game.
        tally: ScoreTally,
    },
    /// Opponent mode switched; the tally was reset.
    ModeChanged {
        /// New opponent mode.
        mode: Opponent,
    },
    /// Current tally on request.
    Scores {
        /// The tally.
        tally: ScoreTally,
    },
    /// The player quit.
    Quit {
        /// Tally at exit.
        tally: ScoreTally,
    },
}

/// Runs games between a human and either another human or the computer.
///
/// Owns the current [`GameSession`] and the session-wide [`ScoreTally`].
/// In [`Opponent::Human`] mode the human player supplies moves for both marks.
pub struct Orchestrator {
    session: GameSession,
    tally: ScoreTally,
    mode: Opponent,
    computer_mark: Mark,
    human: Box<dyn Player>,
    computer: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        mode: Opponent,
        computer_mark: Mark,
        human: Box<dyn Player>,
        computer: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session: GameSession::new(),
            tally: ScoreTally::new(),
            mode,
            computer_mark,
            human,
            computer,
            event_tx,
        }
    }

    /// Returns the current game.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the running tally.
    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    /// Returns the opponent mode.
    pub fn mode(&self) -> Opponent {
        self.mode
    }

    fn is_computer_turn(&self) -> bool {
        self.mode == Opponent::Computer && self.session.to_move() == self.computer_mark
    }

    fn emit(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }

    /// Runs rounds until the human quits, returning the final tally.
    ///
    /// After a game ends, any input other than quit, mode or scores starts
    /// the next round.
    #[instrument(skip(self), fields(mode = %self.mode, computer = %self.computer_mark))]
    pub async fn run(&mut self) -> Result<ScoreTally> {
        info!("Starting game orchestration");
        self.start_new_game()?;

        loop {
            if self.session.is_over() {
                let action = self.human.get_move(&self.session).await?;
                match action {
                    PlayerAction::Quit => return self.quit(),
                    PlayerAction::SwitchMode(mode) => self.switch_mode(mode)?,
                    PlayerAction::Scores => self.emit(GameEvent::Scores { tally: self.tally })?,
                    _ => self.start_new_game()?,
                }
                continue;
            }

            let mark = self.session.to_move();
            let computer_turn = self.is_computer_turn();
            if computer_turn {
                self.emit(GameEvent::ComputerThinking { mark })?;
            } else {
                self.emit(GameEvent::AwaitingMove {
                    mark,
                    board: self.session.board().display(),
                })?;
            }

            let player = if computer_turn {
                &mut self.computer
            } else {
                &mut self.human
            };
            debug!(player = %player.name(), %mark, "Waiting for move");
            let action = player.get_move(&self.session).await?;

            match action {
                PlayerAction::Place(index) => self.place(index)?,
                PlayerAction::Restart => self.start_new_game()?,
                PlayerAction::SwitchMode(mode) => self.switch_mode(mode)?,
                PlayerAction::Scores => self.emit(GameEvent::Scores { tally: self.tally })?,
                PlayerAction::Continue => {}
                PlayerAction::Quit => return self.quit(),
                PlayerAction::Unrecognized(input) => {
                    self.emit(GameEvent::InputIgnored { input })?
                }
            }
        }
    }

    /// Applies a move for the side to play and records a finished game.
    #[instrument(skip(self))]
    fn place(&mut self, index: usize) -> Result<()> {
        let mark = self.session.to_move();
        match self.session.apply_move(index) {
            Ok(status) => {
                if let Some(position) = Position::from_index(index) {
                    self.emit(GameEvent::MoveMade { mark, position })?;
                }
                if status.is_terminal() {
                    self.tally.record(status);
                    info!(%status, tally = %self.tally, "Round finished");
                    self.emit(GameEvent::GameOver {
                        status,
                        board: self.session.board().display(),
                        tally: self.tally,
                    })?;
                }
            }
            Err(e) => {
                warn!(index, error = %e, "Move rejected");
                self.emit(GameEvent::MoveRejected {
                    reason: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// Discards the current game; the tally is kept.
    #[instrument(skip(self))]
    pub fn start_new_game(&mut self) -> Result<()> {
        self.session.restart();
        self.emit(GameEvent::RoundStarted { mode: self.mode })
    }

    /// Changes opponent mode (toggling on `None`), zeroes the tally and restarts.
    #[instrument(skip(self))]
    pub fn switch_mode(&mut self, mode: Option<Opponent>) -> Result<()> {
        self.mode = mode.unwrap_or_else(|| self.mode.toggled());
        self.tally.reset();
        info!(mode = %self.mode, "Opponent mode changed");
        self.emit(GameEvent::ModeChanged { mode: self.mode })?;
        self.start_new_game()
    }

    fn quit(&self) -> Result<ScoreTally> {
        info!(tally = %self.tally, "Player quit");
        self.emit(GameEvent::Quit { tally: self.tally })?;
        Ok(self.tally)
    }
}
