//! Metrics tests
//!
//! Snapshot recording after every state-changing operation, the derived
//! series and the aggregate scoreboard.

use kanban_simulator_core_rs::rng::ScriptedRng;
use kanban_simulator_core_rs::{Card, Column, EngineConfig, GameEngine, NewCard};

fn engine_with(cards: Vec<Card>) -> GameEngine {
    let mut engine = GameEngine::with_random_source(
        EngineConfig {
            seed_cards: false,
            ..EngineConfig::default()
        },
        Box::new(ScriptedRng::new(1)),
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

fn finished_in_testing(id: &str, value: i64) -> Card {
    Card::new(id.to_string(), format!("Card {}", id), 2, value, 0)
        .with_column(Column::Testing)
        .with_effort_done(2)
}

#[test]
fn test_snapshot_after_each_operation() {
    let mut engine = engine_with(vec![Card::new("A".into(), "a".into(), 3, 200, 0)]);
    assert_eq!(engine.state().metrics.cfd.len(), 1);

    engine.move_card("A", Column::Ready).unwrap();
    assert_eq!(engine.state().metrics.cfd.len(), 2);

    engine.add_card(NewCard::titled("Rear camera")).unwrap();
    assert_eq!(engine.state().metrics.cfd.len(), 3);

    engine.process_day().unwrap();
    let metrics = &engine.state().metrics;
    assert_eq!(metrics.cfd.len(), 4);
    assert_eq!(metrics.financial.len(), 4);
    assert_eq!(metrics.throughput.len(), 4);

    let latest = metrics.latest_cfd().unwrap();
    assert_eq!(latest.day, 1);
    assert_eq!(latest.ready, 1);
    assert_eq!(latest.backlog, 1);
    assert_eq!(latest.total(), 2);
}

#[test]
fn test_financial_and_throughput_after_deploy() {
    let mut engine = engine_with(vec![finished_in_testing("T", 400)]);
    set_day(&mut engine, 2);
    engine.move_card("T", Column::Deployed).unwrap();

    let metrics = &engine.state().metrics;
    let financial = metrics.latest_financial().unwrap();
    assert_eq!(financial.day, 2);
    assert_eq!(financial.value, 400);
    assert_eq!(financial.cost, 600);
    assert_eq!(financial.profit, -200);

    let throughput = metrics.latest_throughput().unwrap();
    assert_eq!(throughput.completed, 1);
    assert_eq!(throughput.cumulative, 1);

    assert_eq!(metrics.lead_times[0].card_id, "T");
    assert_eq!(metrics.lead_times[0].lead_time, 2);
    assert_eq!(metrics.lead_times[0].value, 400);
}

#[test]
fn test_throughput_counts_only_todays_deployments() {
    let mut engine = engine_with(vec![finished_in_testing("A", 200), finished_in_testing("B", 200)]);
    set_day(&mut engine, 1);
    engine.move_card("A", Column::Deployed).unwrap();

    engine.process_day().unwrap();
    engine.move_card("B", Column::Deployed).unwrap();

    let throughput = engine.state().metrics.latest_throughput().unwrap();
    assert_eq!(throughput.day, 2);
    assert_eq!(throughput.completed, 1);
    assert_eq!(throughput.cumulative, 2);
}

#[test]
fn test_scoreboard() {
    let mut engine = engine_with(vec![
        finished_in_testing("A", 300),
        finished_in_testing("B", 500),
        Card::new("R1".into(), "r".into(), 2, 100, 0).with_column(Column::Ready),
        Card::new("R2".into(), "r".into(), 2, 100, 0).with_column(Column::Ready),
        Card::new("R3".into(), "r".into(), 2, 100, 0).with_column(Column::Ready),
    ]);
    set_day(&mut engine, 2);
    engine.move_card("A", Column::Deployed).unwrap();
    set_day(&mut engine, 3);
    engine.move_card("B", Column::Deployed).unwrap();
    set_day(&mut engine, 4);

    let metrics = engine.metrics();
    assert_eq!(metrics.deployed_count, 2);
    assert_eq!(metrics.total_value, 800);
    assert_eq!(metrics.avg_lead_time, 2.5);
    assert_eq!(metrics.throughput, 0.5);
    // Ready is at its limit
    assert_eq!(metrics.blocked_count, 3);
    assert_eq!(metrics.total_cost, 0);
    assert_eq!(metrics.profit, 800);
}

#[test]
fn test_cost_follows_processed_days() {
    let mut engine = engine_with(vec![
        Card::new("A".into(), "a".into(), 40, 200, 0).with_column(Column::Analysis),
    ]);
    engine.allocate_specialists("A", Column::Analysis, 2).unwrap();

    engine.process_day().unwrap();
    engine.allocate_specialists("A", Column::Analysis, 1).unwrap();
    engine.process_day().unwrap();

    assert_eq!(engine.state().daily_cost_history, vec![200, 100]);
    let metrics = engine.metrics();
    assert_eq!(metrics.total_cost, 300);
    assert_eq!(metrics.profit, -300);
}
