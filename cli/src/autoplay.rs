//! Greedy autoplayer
//!
//! Each turn, before the day is processed:
//! 1. Advance every card whose stage is finished, rightmost column first
//! 2. Pull backlog cards into `ready` by priority, then value
//! 3. Spread each work column's specialists over its unfinished cards
//!    (one each, leftovers to the first); finished cards get none

use kanban_simulator_core_rs::rules::MAX_SPECIALISTS_PER_COLUMN;
use kanban_simulator_core_rs::{Card, Column, DayError, DayResult, GameEngine};
use std::cmp::Reverse;

/// What the autoplayer did before processing a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnPlan {
    pub advanced: usize,
    pub pulled: usize,
    pub staffed: u32,
}

/// Plan a turn, then process the day
pub fn play_day(engine: &mut GameEngine) -> Result<(TurnPlan, DayResult), DayError> {
    let plan = plan_turn(engine);
    let result = engine.process_day()?;
    Ok((plan, result))
}

pub fn plan_turn(engine: &mut GameEngine) -> TurnPlan {
    let plan = TurnPlan {
        advanced: advance_finished(engine),
        pulled: pull_from_backlog(engine),
        staffed: staff_work_columns(engine),
    };
    tracing::debug!(
        day = engine.current_day(),
        advanced = plan.advanced,
        pulled = plan.pulled,
        staffed = plan.staffed,
        "turn planned"
    );
    plan
}

fn ids_where(engine: &GameEngine, column: Column, keep: impl Fn(&Card) -> bool) -> Vec<String> {
    engine
        .state()
        .cards_in(column)
        .filter(|c| keep(c))
        .map(|c| c.id().to_string())
        .collect()
}

fn advance_finished(engine: &mut GameEngine) -> usize {
    let mut advanced = 0;
    for column in [Column::Testing, Column::Development, Column::Analysis, Column::Ready] {
        let Some(next) = column.next() else {
            continue;
        };
        let finished = ids_where(engine, column, |c| {
            !column.is_work_column() || c.is_work_complete()
        });
        for id in finished {
            if engine.move_card(&id, next).is_ok() {
                advanced += 1;
            }
        }
    }
    advanced
}

fn pull_from_backlog(engine: &mut GameEngine) -> usize {
    let mut backlog: Vec<&Card> = engine.state().cards_in(Column::Backlog).collect();
    backlog.sort_by_key(|c| (Reverse(c.priority().order()), Reverse(c.value())));
    let queue: Vec<String> = backlog.iter().map(|c| c.id().to_string()).collect();

    let mut pulled = 0;
    for id in queue {
        if !engine.can_pull_from_backlog() {
            break;
        }
        if engine.move_card(&id, Column::Ready).is_ok() {
            pulled += 1;
        }
    }
    pulled
}

/// Target specialist count per card in a work column
fn staffing(engine: &GameEngine, column: Column) -> Vec<(String, u8)> {
    let cap = usize::from(MAX_SPECIALISTS_PER_COLUMN);
    let open = ids_where(engine, column, |c| !c.is_work_complete());
    let extra = cap.saturating_sub(open.len());

    let mut targets: Vec<(String, u8)> = ids_where(engine, column, Card::is_work_complete)
        .into_iter()
        .map(|id| (id, 0))
        .collect();
    for (i, id) in open.into_iter().enumerate() {
        let count = match i {
            0 => 1 + extra,
            i if i < cap => 1,
            _ => 0,
        };
        targets.push((id, count as u8));
    }
    targets
}

fn allocated(engine: &GameEngine, id: &str, column: Column) -> u8 {
    engine.state().specialist_allocations.get(id, column)
}

fn allocate(engine: &mut GameEngine, id: &str, column: Column, count: u8) {
    if let Err(err) = engine.allocate_specialists(id, column, count) {
        tracing::debug!(card = id, %column, count, reason = %err, "allocation rejected");
    }
}

fn staff_work_columns(engine: &mut GameEngine) -> u32 {
    let mut staffed = 0;
    for column in Column::WORK {
        let targets = staffing(engine, column);

        // Lower first so raises stay within the column cap
        for (id, target) in &targets {
            if allocated(engine, id, column) > *target {
                allocate(engine, id, column, *target);
            }
        }
        for (id, target) in &targets {
            if allocated(engine, id, column) < *target {
                allocate(engine, id, column, *target);
            }
        }
        staffed += targets
            .iter()
            .map(|(id, _)| u32::from(allocated(engine, id, column)))
            .sum::<u32>();
    }
    staffed
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_simulator_core_rs::{EngineConfig, ScriptedRng};

    fn engine_with(cards: Vec<Card>) -> GameEngine {
        let mut engine = GameEngine::with_random_source(
            EngineConfig {
                seed_cards: false,
                ..EngineConfig::default()
            },
            Box::new(ScriptedRng::new(2)),
        );
        engine.init();
        let mut state = engine.state().clone();
        state.cards = cards;
        engine.load_state(state).unwrap();
        engine
    }

    fn card(id: &str, column: Column, effort: u32) -> Card {
        Card::new(id.to_string(), id.to_string(), effort, 200, 0).with_column(column)
    }

    #[test]
    fn test_pulls_highest_priority_first() {
        let mut engine = GameEngine::with_random_source(EngineConfig::default(), Box::new(ScriptedRng::new(2)));
        engine.init();

        let plan = plan_turn(&mut engine);
        assert_eq!(plan.pulled, 3);

        let state = engine.state();
        let lowest_pulled = state.cards_in(Column::Ready).map(|c| c.priority().order()).min().unwrap();
        let highest_left = state.cards_in(Column::Backlog).map(|c| c.priority().order()).max().unwrap();
        assert!(lowest_pulled >= highest_left);
    }

    #[test]
    fn test_advances_finished_cards() {
        let mut engine = engine_with(vec![
            card("T", Column::Testing, 2).with_effort_done(2),
            card("A", Column::Analysis, 4),
        ]);
        let plan = plan_turn(&mut engine);

        assert_eq!(plan.advanced, 1);
        assert!(engine.card("T").unwrap().is_deployed());
        assert_eq!(engine.card("A").unwrap().current_column(), Column::Analysis);
    }

    #[test]
    fn test_spreads_specialists() {
        let mut engine = engine_with(vec![card("A", Column::Analysis, 9), card("B", Column::Analysis, 9)]);
        let plan = plan_turn(&mut engine);

        let allocations = &engine.state().specialist_allocations;
        assert_eq!(allocations.get("A", Column::Analysis), 2);
        assert_eq!(allocations.get("B", Column::Analysis), 1);
        assert_eq!(plan.staffed, 3);
    }

    #[test]
    fn test_restaffs_when_a_card_finishes() {
        let mut engine = engine_with(vec![card("A", Column::Analysis, 9), card("B", Column::Analysis, 9)]);
        plan_turn(&mut engine);

        // B finishes analysis: it advances and A gets the whole column
        let mut state = engine.state().clone();
        state.cards[1] = card("B", Column::Analysis, 9).with_effort_done(9);
        engine.load_state(state).unwrap();
        plan_turn(&mut engine);

        let allocations = &engine.state().specialist_allocations;
        assert_eq!(engine.card("B").unwrap().current_column(), Column::Development);
        assert_eq!(allocations.get("B", Column::Analysis), 0);
        assert_eq!(allocations.get("A", Column::Analysis), 3);
        assert_eq!(allocations.get("B", Column::Development), 3);
    }

    #[test]
    fn test_rejected_allocation_leaves_staffing_unchanged() {
        let mut engine = engine_with(vec![card("A", Column::Analysis, 9)]);
        allocate(&mut engine, "A", Column::Analysis, 2);
        allocate(&mut engine, "A", Column::Testing, 1);
        allocate(&mut engine, "missing", Column::Analysis, 1);

        let allocations = &engine.state().specialist_allocations;
        assert_eq!(allocations.get("A", Column::Analysis), 2);
        assert_eq!(allocations.get("A", Column::Testing), 0);
        assert_eq!(allocations.total_allocated(), 2);
    }

    #[test]
    fn test_play_day_processes() {
        let mut engine = engine_with(vec![card("A", Column::Ready, 2)]);
        let (plan, result) = play_day(&mut engine).unwrap();
        assert_eq!(plan.advanced, 1);
        assert_eq!(result.day, 1);
        // 2 dice × 3 specialists × specialty 2
        assert!(engine.card("A").unwrap().is_work_complete());
    }
}
