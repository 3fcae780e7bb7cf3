//! Command-line interface for noughts.

use crate::mode::Opponent;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};
use noughts_engine::{Mark, Scoring};
use std::path::PathBuf;
use std::str::FromStr;
use strum::VariantNames;

/// Noughts - tic-tac-toe against a friend or a perfect-play computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Opponent
        #[arg(long, ignore_case = true, value_parser = variant_parser::<Opponent>())]
        mode: Option<Opponent>,

        /// Mark the computer plays (X moves first)
        #[arg(long, ignore_case = true, value_parser = variant_parser::<Mark>())]
        computer_mark: Option<Mark>,

        /// Pause before the computer's move, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Search scoring
        #[arg(long, ignore_case = true, value_parser = variant_parser::<Scoring>())]
        scoring: Option<Scoring>,
    },

    /// Show the best move for a position
    Suggest {
        /// Nine cells row by row using X, O and . (e.g. "XX.OO....")
        board: String,

        /// Mark to move (inferred from the mark counts if omitted)
        #[arg(long, ignore_case = true, value_parser = variant_parser::<Mark>())]
        mark: Option<Mark>,

        /// Search scoring
        #[arg(long, ignore_case = true, value_parser = variant_parser::<Scoring>())]
        scoring: Option<Scoring>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Let the computer play itself from an empty board
    SelfPlay {
        /// Search scoring
        #[arg(long, ignore_case = true, value_parser = variant_parser::<Scoring>())]
        scoring: Option<Scoring>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Accepts the enum's strum names and lists them in `--help`.
fn variant_parser<T>() -> impl TypedValueParser<Value = T>
where
    T: VariantNames + FromStr + Clone + Send + Sync + 'static,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    PossibleValuesParser::new(T::VARIANTS.iter().copied()).try_map(|value| value.parse::<T>())
}
