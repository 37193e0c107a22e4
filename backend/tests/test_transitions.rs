//! Card transition tests
//!
//! Moves go through the engine so snapshots, history and allocation release
//! are exercised together.

use kanban_simulator_core_rs::rng::ScriptedRng;
use kanban_simulator_core_rs::{
    Card, Column, EngineConfig, GameEngine, HistoryKind, MoveError,
};

fn engine_with(cards: Vec<Card>) -> GameEngine {
    let mut engine = GameEngine::with_random_source(
        EngineConfig {
            seed_cards: false,
            ..EngineConfig::default()
        },
        Box::new(ScriptedRng::new(3)),
    );
    engine.init();
    let mut state = engine.state().clone();
    state.cards = cards;
    engine.load_state(state).unwrap();
    engine
}

fn set_day(engine: &mut GameEngine, day: u32) {
    let mut state = engine.state().clone();
    state.day = day;
    engine.load_state(state).unwrap();
}

fn card(id: &str, column: Column, effort: u32) -> Card {
    Card::new(id.to_string(), format!("Card {}", id), effort, 300, 0).with_column(column)
}

// ============================================================================
// WIP limits
// ============================================================================

#[test]
fn test_ready_limit_then_retry() {
    let mut engine = engine_with(vec![
        card("R1", Column::Ready, 2),
        card("R2", Column::Ready, 2),
        card("R3", Column::Ready, 2),
        card("X", Column::Backlog, 2),
    ]);
    assert!(!engine.can_pull_from_backlog());

    let err = engine.move_card("X", Column::Ready).unwrap_err();
    assert_eq!(
        err,
        MoveError::WipLimitReached {
            column: Column::Ready,
            limit: 3
        }
    );
    assert_eq!(err.to_string(), "WIP limit reached in Ready (3 cards)");
    assert_eq!(engine.card("X").unwrap().current_column(), Column::Backlog);

    engine.move_card("R1", Column::Analysis).unwrap();
    assert!(engine.can_pull_from_backlog());
    engine.move_card("X", Column::Ready).unwrap();
    assert_eq!(engine.state().count_in(Column::Ready), 3);
}

#[test]
fn test_rejected_move_records_nothing() {
    let mut engine = engine_with(vec![card("A", Column::Backlog, 2)]);
    let history_before = engine.state().history.len();
    let snapshots_before = engine.state().metrics.cfd.len();

    let err = engine.move_card("A", Column::Analysis).unwrap_err();
    assert_eq!(
        err,
        MoveError::SkipsColumns {
            from: Column::Backlog,
            to: Column::Analysis
        }
    );
    assert_eq!(engine.state().history.len(), history_before);
    assert_eq!(engine.state().metrics.cfd.len(), snapshots_before);
}

#[test]
fn test_unknown_card() {
    let mut engine = engine_with(Vec::new());
    assert_eq!(
        engine.move_card("NOPE", Column::Ready),
        Err(MoveError::CardNotFound("NOPE".to_string()))
    );
}

// ============================================================================
// Stage completion
// ============================================================================

#[test]
fn test_incomplete_work_blocks_advance() {
    let mut engine = engine_with(vec![card("A", Column::Analysis, 6).with_effort_done(4)]);

    let err = engine.move_card("A", Column::Development).unwrap_err();
    assert_eq!(err, MoveError::IncompleteWork { done: 4, required: 6 });
    assert_eq!(err.to_string(), "Incomplete work: 4/6 done in this stage");
}

#[test]
fn test_advance_starts_a_fresh_stage() {
    let mut engine = engine_with(vec![card("A", Column::Analysis, 6).with_effort_done(6)]);
    engine.allocate_specialists("A", Column::Analysis, 2).unwrap();

    let moved = engine.move_card("A", Column::Development).unwrap();
    assert_eq!(moved.from, Column::Analysis);
    assert_eq!(moved.card.effort_done(), 0);
    assert_eq!(moved.card.current_column(), Column::Development);
    assert_eq!(
        engine.state().specialist_allocations.get("A", Column::Analysis),
        0
    );
    assert_eq!(engine.state().specialist_allocations.total_allocated(), 0);

    let latest = engine.state().history.latest().unwrap();
    assert_eq!(latest.kind, HistoryKind::Move);
    assert_eq!(latest.details, "Analysis → Development");
}

#[test]
fn test_backward_moves_allowed() {
    let mut engine = engine_with(vec![
        card("D", Column::Development, 8).with_effort_done(3),
        card("R", Column::Ready, 2),
    ]);

    engine.move_card("D", Column::Analysis).unwrap();
    assert_eq!(engine.card("D").unwrap().effort_done(), 0);
    engine.move_card("R", Column::Backlog).unwrap();
    assert_eq!(engine.card("R").unwrap().current_column(), Column::Backlog);
}

#[test]
fn test_valid_destinations() {
    let engine = engine_with(vec![
        card("A", Column::Analysis, 4),
        card("B", Column::Analysis, 4).with_effort_done(4),
    ]);

    // Incomplete: only backward moves
    assert_eq!(
        engine.valid_destinations("A"),
        vec![Column::Backlog, Column::Ready]
    );
    assert_eq!(
        engine.valid_destinations("B"),
        vec![Column::Backlog, Column::Ready, Column::Development]
    );
}

// ============================================================================
// Deployment
// ============================================================================

#[test]
fn test_on_time_deployment() {
    let mut engine = engine_with(vec![card("T", Column::Testing, 3).with_effort_done(3)]);
    set_day(&mut engine, 2);

    let moved = engine.move_card("T", Column::Deployed).unwrap();
    let deployment = moved.deployment.unwrap();
    assert_eq!(deployment.days_late, 0);
    assert_eq!(deployment.penalty, 0);
    assert_eq!(deployment.final_value, 300);
    assert_eq!(deployment.lead_time, 2);

    let card = engine.card("T").unwrap();
    assert_eq!(card.completed_day(), Some(2));
    assert_eq!(card.final_value(), Some(300));
    assert_eq!(engine.state().metrics.lead_times.len(), 1);
    assert_eq!(engine.state().history.latest().unwrap().kind, HistoryKind::Complete);
}

#[test]
fn test_late_deployment_penalised() {
    // Value 500, effort 3: deadline day 8
    let mut engine = engine_with(vec![
        Card::new("L".into(), "Late".into(), 3, 500, 0)
            .with_column(Column::Testing)
            .with_effort_done(3),
    ]);
    set_day(&mut engine, 18);

    let deployment = engine.move_card("L", Column::Deployed).unwrap().deployment.unwrap();
    assert_eq!(deployment.days_late, 10);
    assert_eq!(deployment.final_value, 250);
    assert_eq!(deployment.penalty, 250);

    let latest = engine.state().history.latest().unwrap();
    assert_eq!(latest.kind, HistoryKind::Penalty);
    assert!(latest.details.contains("Penalty: $250"));
}

#[test]
fn test_deployed_is_terminal() {
    let mut engine = engine_with(vec![card("T", Column::Testing, 1).with_effort_done(1)]);
    set_day(&mut engine, 1);
    engine.move_card("T", Column::Deployed).unwrap();

    set_day(&mut engine, 6);
    for to in Column::ALL {
        let err = engine.move_card("T", to).unwrap_err();
        assert_eq!(err, MoveError::AlreadyDeployed);
    }
    let card = engine.card("T").unwrap();
    assert_eq!(card.completed_day(), Some(1));
    assert_eq!(card.final_value(), Some(300));
    assert!(engine.valid_destinations("T").is_empty());
}

#[test]
fn test_deployed_column_is_unlimited() {
    let mut cards: Vec<Card> = (0..3)
        .map(|i| card(&format!("T{}", i), Column::Testing, 1).with_effort_done(1))
        .collect();
    cards.push(card("X", Column::Development, 1).with_effort_done(1));
    let mut engine = engine_with(cards);

    for i in 0..3 {
        engine.move_card(&format!("T{}", i), Column::Deployed).unwrap();
    }
    assert_eq!(engine.state().count_in(Column::Deployed), 3);
    engine.move_card("X", Column::Testing).unwrap();
}
