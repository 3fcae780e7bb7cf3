//! Noughts - console tic-tac-toe.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use noughts::{
    Cli, Command, ComputerPlayer, GameConfig, HumanPlayer, Orchestrator, run_renderer,
    self_play, spawn_stdin_reader, suggest,
};
use noughts_engine::Board;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(default_filter(&cli.command));

    let config = GameConfig::load(&cli.config)?;

    match cli.command {
        Command::Play {
            mode,
            computer_mark,
            delay_ms,
            scoring,
        } => run_play(config.with_overrides(mode, computer_mark, delay_ms, scoring)).await,
        Command::Suggest {
            board,
            mark,
            scoring,
            json,
        } => run_suggest(config.with_overrides(None, None, None, scoring), &board, mark, json),
        Command::SelfPlay { scoring, json } => {
            run_self_play(config.with_overrides(None, None, None, scoring), json)
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
///
/// Interactive play stays at `warn` so log lines do not break up the board.
fn default_filter(command: &Command) -> &'static str {
    match command {
        Command::Play { .. } => "warn",
        Command::Suggest { .. } | Command::SelfPlay { .. } => {
            "warn,noughts=info,noughts_engine=info"
        }
    }
}

/// Logs go to stderr so they never mix with the board on stdout.
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run an interactive game in the terminal
#[instrument(skip_all, fields(mode = %config.mode()))]
async fn run_play(config: GameConfig) -> Result<()> {
    info!("Starting noughts");

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // The reader thread exits with the process; it is never joined.
    let _reader = spawn_stdin_reader(input_tx);
    let renderer = tokio::spawn(run_renderer(event_rx, std::io::stdout()));

    let human = Box::new(HumanPlayer::new("Human", input_rx));
    let computer = Box::new(ComputerPlayer::new(
        "Computer",
        config.searcher(),
        config.move_delay(),
    ));
    let mut orchestrator = Orchestrator::new(
        *config.mode(),
        *config.computer_mark(),
        human,
        computer,
        event_tx,
    );

    let result = orchestrator.run().await;
    // Closing the event channel lets the renderer finish
    drop(orchestrator);
    renderer.await??;

    let tally = result?;
    info!(%tally, "Session finished");
    Ok(())
}

/// Print the best move for a position
#[instrument(skip(config))]
fn run_suggest(
    config: GameConfig,
    board: &str,
    mark: Option<noughts_engine::Mark>,
    json: bool,
) -> Result<()> {
    let board: Board = board.parse()?;
    let suggestion = suggest(&board, mark, &mut config.searcher())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
    } else {
        println!("{}", board.display());
        println!();
        print!("{}", suggestion);
    }
    Ok(())
}

/// Print a computer-vs-computer game
#[instrument(skip(config))]
fn run_self_play(config: GameConfig, json: bool) -> Result<()> {
    let report = self_play(&mut config.searcher())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
