//! Noughts - tic-tac-toe against a friend or a perfect-play computer.
//!
//! # Architecture
//!
//! - **Engine**: board rules, game sessions and minimax search live in
//!   [`noughts_engine`].
//! - **Players**: a [`Player`] produces actions; [`HumanPlayer`] reads typed
//!   lines, [`ComputerPlayer`] runs the search.
//! - **Orchestrator**: runs rounds, owns the [`ScoreTally`] and reports
//!   [`GameEvent`]s to the console.
//! - **Config**: TOML file plus command-line overrides.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;
mod console;
mod mode;
mod orchestrator;
mod players;

pub use cli::{Cli, Command};
pub use commands::{SelfPlayReport, Suggestion, self_play, suggest};
pub use config::{ConfigError, GameConfig};
pub use console::{render, run_renderer, spawn_stdin_reader};
pub use mode::Opponent;
pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{ComputerPlayer, HumanPlayer, Player, PlayerAction, parse_action};

pub use noughts_engine::ScoreTally;
