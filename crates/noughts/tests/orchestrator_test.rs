//! Tests for round orchestration, scoring and mode switching.

use noughts::{ComputerPlayer, GameEvent, HumanPlayer, Opponent, Orchestrator};
use noughts_engine::{GameStatus, Mark, Position, Searcher};
use std::time::Duration;
use tokio::sync::mpsc;

struct Harness {
    orchestrator: Orchestrator,
    event_rx: mpsc::UnboundedReceiver<GameEvent>,
}

fn harness(mode: Opponent, computer_mark: Mark, input: &[&str]) -> Harness {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    for line in input {
        input_tx.send(line.to_string()).unwrap();
    }
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let orchestrator = Orchestrator::new(
        mode,
        computer_mark,
        Box::new(HumanPlayer::new("Human", input_rx)),
        Box::new(ComputerPlayer::new(
            "Computer",
            Searcher::default().with_cache(),
            Duration::ZERO,
        )),
        event_tx,
    );
    Harness {
        orchestrator,
        event_rx,
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn moves(events: &[GameEvent]) -> Vec<(Mark, Position)> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::MoveMade { mark, position } => Some((*mark, *position)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_computer_answers_corner_with_center() {
    let mut h = harness(Opponent::Computer, Mark::O, &["1", "q"]);
    let tally = h.orchestrator.run().await.unwrap();
    assert_eq!(tally.games(), 0);

    let events = drain(&mut h.event_rx);
    assert_eq!(
        moves(&events),
        vec![(Mark::X, Position::TopLeft), (Mark::O, Position::Center)]
    );
    assert!(events.contains(&GameEvent::ComputerThinking { mark: Mark::O }));
    assert_eq!(h.orchestrator.session().to_move(), Mark::X);
}

#[tokio::test]
async fn test_computer_moves_first_when_playing_x() {
    let mut h = harness(Opponent::Computer, Mark::X, &["q"]);
    h.orchestrator.run().await.unwrap();

    let events = drain(&mut h.event_rx);
    // Every opening draws, so the lowest index is chosen
    assert_eq!(moves(&events), vec![(Mark::X, Position::TopLeft)]);
    assert!(matches!(
        events.last(),
        Some(GameEvent::Quit { .. })
    ));
}

#[tokio::test]
async fn test_illegal_move_is_reported_and_ignored() {
    let mut h = harness(Opponent::Human, Mark::O, &["5", "5", "12", "hello", "q"]);
    h.orchestrator.run().await.unwrap();

    let events = drain(&mut h.event_rx);
    let rejections: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::MoveRejected { reason } => Some(reason.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(rejections.len(), 2);
    assert!(rejections[0].contains("occupied"));
    assert!(rejections[1].contains("off the board"));
    assert!(events.contains(&GameEvent::InputIgnored {
        input: "hello".to_string()
    }));

    // Only the first move landed and it is still O's turn
    assert_eq!(h.orchestrator.session().history().len(), 1);
    assert_eq!(h.orchestrator.session().to_move(), Mark::O);
}

#[tokio::test]
async fn test_win_is_tallied_and_next_round_starts() {
    let input = ["1", "4", "2", "5", "3", "", "q"];
    let mut h = harness(Opponent::Human, Mark::O, &input);
    let tally = h.orchestrator.run().await.unwrap();

    assert_eq!(tally.x_wins(), 1);
    assert_eq!(tally.o_wins(), 0);
    assert_eq!(tally.draws(), 0);

    let events = drain(&mut h.event_rx);
    let game_over = events
        .iter()
        .find_map(|event| match event {
            GameEvent::GameOver { status, tally, .. } => Some((*status, *tally)),
            _ => None,
        })
        .unwrap();
    assert_eq!(game_over.0, GameStatus::Won(Mark::X));
    assert_eq!(game_over.1.x_wins(), 1);

    let rounds = events
        .iter()
        .filter(|event| matches!(event, GameEvent::RoundStarted { .. }))
        .count();
    assert_eq!(rounds, 2);
    assert!(h.orchestrator.session().history().is_empty());
}

#[tokio::test]
async fn test_draw_is_tallied() {
    let input = ["1", "5", "3", "2", "8", "4", "6", "9", "7", "q"];
    let mut h = harness(Opponent::Human, Mark::O, &input);
    let tally = h.orchestrator.run().await.unwrap();
    assert_eq!(tally.draws(), 1);
    assert_eq!(tally.games(), 1);
}

#[tokio::test]
async fn test_switching_mode_resets_scores() {
    let input = ["1", "4", "2", "5", "3", "m", "q"];
    let mut h = harness(Opponent::Human, Mark::O, &input);
    let tally = h.orchestrator.run().await.unwrap();

    assert_eq!(tally.games(), 0);
    assert_eq!(h.orchestrator.mode(), Opponent::Computer);

    let events = drain(&mut h.event_rx);
    assert!(events.contains(&GameEvent::ModeChanged {
        mode: Opponent::Computer
    }));
}

#[tokio::test]
async fn test_restart_keeps_scores() {
    let input = ["1", "4", "2", "5", "3", "", "5", "r", "scores", "q"];
    let mut h = harness(Opponent::Human, Mark::O, &input);
    let tally = h.orchestrator.run().await.unwrap();

    assert_eq!(tally.x_wins(), 1);
    assert!(h.orchestrator.session().history().is_empty());

    let events = drain(&mut h.event_rx);
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::Scores { tally } if tally.x_wins() == 1
    )));
}

#[tokio::test]
async fn test_closed_input_quits_with_tally() {
    let input = ["1", "4", "2", "5", "3", "", "5"];
    let mut h = harness(Opponent::Human, Mark::O, &input);
    let tally = h.orchestrator.run().await.unwrap();
    assert_eq!(tally.x_wins(), 1);

    let events = drain(&mut h.event_rx);
    assert!(matches!(
        events.last(),
        Some(GameEvent::Quit { tally }) if tally.x_wins() == 1
    ));
}
