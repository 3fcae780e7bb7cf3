//! Game configuration loaded from TOML.

use crate::mode::Opponent;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_engine::{Mark, Scoring, Searcher};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Opponent mode at startup.
    #[serde(default)]
    mode: Opponent,

    /// Mark the computer plays in computer mode (X always moves first).
    #[serde(default = "default_computer_mark")]
    computer_mark: Mark,

    /// Pause before the computer's move is applied, in milliseconds.
    #[serde(default = "default_move_delay_ms")]
    move_delay_ms: u64,

    /// How the search scores terminal positions.
    #[serde(default)]
    scoring: Scoring,

    /// Reuse search results across positions and moves.
    #[serde(default = "default_transposition_cache")]
    transposition_cache: bool,
}

fn default_computer_mark() -> Mark {
    Mark::O
}

fn default_move_delay_ms() -> u64 {
    500
}

fn default_transposition_cache() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Opponent::default(),
            computer_mark: default_computer_mark(),
            move_delay_ms: default_move_delay_ms(),
            scoring: Scoring::default(),
            transposition_cache: default_transposition_cache(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode, scoring = %config.scoring, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of the file values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        mode: Option<Opponent>,
        computer_mark: Option<Mark>,
        move_delay_ms: Option<u64>,
        scoring: Option<Scoring>,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(mark) = computer_mark {
            self.computer_mark = mark;
        }
        if let Some(delay) = move_delay_ms {
            self.move_delay_ms = delay;
        }
        if let Some(scoring) = scoring {
            self.scoring = scoring;
        }
        debug!(config = ?self, "Overrides applied");
        self
    }

    /// The computer's move delay as a duration.
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Builds a searcher with the configured scoring and cache.
    pub fn searcher(&self) -> Searcher {
        let searcher = Searcher::new(self.scoring);
        if self.transposition_cache {
            searcher.with_cache()
        } else {
            searcher
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
