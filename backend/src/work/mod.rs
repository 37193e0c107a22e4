//! Work resolver
//!
//! Applies one day of specialist effort to the cards in a work column.
//!
//! # Algorithm
//!
//! For the column's agent and that agent's dice roll:
//! 1. Absent agent → no work in the column, an absence entry is logged
//! 2. For each resident card with unfinished work:
//!    - 0 specialists allocated → reported idle
//!    - otherwise `calculate_work` units are applied, capped at the requirement
//! 3. A card whose stage just completed:
//!    - in testing, bug-free, and the detection draw succeeds → rework
//!      (back to development, testing allocation released)
//!    - otherwise a work-complete entry is logged; bug-free cards finishing
//!      testing become ready for deployment
//!
//! # Critical Invariants
//!
//! - `effort_done <= effort_required` after every application
//! - Cards are never advanced here; only rework moves a card

use crate::models::column::{AgentType, Column};
use crate::models::history::HistoryKind;
use crate::models::state::GameState;
use crate::rng::RandomSource;
use crate::rules::{self, TESTER_BUG_DETECTION};
use serde::{Deserialize, Serialize};

/// Work applied to one card on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub agent: AgentType,
    pub card_id: String,
    /// Card title
    pub card: String,
    pub dice: u8,
    pub specialists: u8,
    /// Units actually applied after capping
    pub work: u32,
    /// `"done/required"` after the work
    pub progress: String,
}

impl WorkEntry {
    /// History line for this entry: `(action, details)`
    pub fn describe(&self) -> (String, String) {
        (
            format!("{} ({}x) worked on \"{}\"", self.agent, self.specialists, self.card),
            format!("Dice: {}, Progress: {}", self.dice, self.progress),
        )
    }
}

/// Outcome of resolving one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReport {
    pub entries: Vec<WorkEntry>,
    /// Cards with no specialists allocated
    pub idle_cards: Vec<String>,
    /// Cards whose stage completed today
    pub completed: Vec<String>,
    /// Cards sent back to development after a detected bug
    pub reworked: Vec<String>,
    pub agent_absent: bool,
}

/// Resolve one day of work in `column` with the given dice roll
///
/// Non-work columns produce an empty report.
pub fn resolve_column(
    state: &mut GameState,
    column: Column,
    dice: u8,
    rng: &mut dyn RandomSource,
) -> ColumnReport {
    let mut report = ColumnReport::default();
    let Some(agent) = column.agent() else {
        return report;
    };

    let resident: Vec<String> = state.cards_in(column).map(|c| c.id().to_string()).collect();
    if resident.is_empty() {
        return report;
    }

    if state.is_absent(agent) {
        let remaining = state.absence_remaining(agent);
        state.log(
            HistoryKind::Absence,
            format!("{} absent", agent),
            format!("Unavailable for {} more day(s)", remaining),
        );
        report.agent_absent = true;
        return report;
    }

    let day = state.day;
    for card_id in resident {
        let specialists = state.specialist_allocations.get(&card_id, column);

        let Some(card) = state.card_mut(&card_id) else {
            continue;
        };
        if card.is_work_complete() {
            continue;
        }
        if specialists == 0 {
            report.idle_cards.push(card_id);
            continue;
        }

        let work = rules::calculate_work(agent, column, dice, specialists);
        let applied = card.apply_work(work);
        report.entries.push(WorkEntry {
            agent,
            card_id: card_id.clone(),
            card: card.title().to_string(),
            dice,
            specialists,
            work: applied,
            progress: card.progress(),
        });
        tracing::debug!(card = %card_id, %column, dice, specialists, work = applied, "work applied");

        if !card.is_work_complete() {
            continue;
        }

        let title = card.title().to_string();
        let bug_found =
            column == Column::Testing && !card.has_bug() && rng.chance(TESTER_BUG_DETECTION);

        if bug_found {
            card.send_back_for_rework(day);
            state.specialist_allocations.clear(&card_id, Column::Testing);
            state.log(
                HistoryKind::Bug,
                format!("Bug found in \"{}\"", title),
                "Tester found a problem - back to development",
            );
            tracing::debug!(card = %card_id, "bug detected in testing");
            report.reworked.push(card_id);
        } else {
            if column == Column::Testing && !card.has_bug() {
                card.mark_ready_for_deployment();
            }
            state.log(
                HistoryKind::Work,
                format!("\"{}\" ready to advance", title),
                format!("Work complete in {}", column),
            );
            report.completed.push(card_id);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::Card;
    use crate::rng::ScriptedRng;

    fn state_with(card: Card) -> GameState {
        let mut state = GameState::fresh();
        state.day = 1;
        state.cards.push(card);
        state
    }

    #[test]
    fn test_specialty_work_doubles_and_caps() {
        let mut state = state_with(Card::new("D".into(), "Dev".into(), 10, 200, 0).with_column(Column::Development));
        state.specialist_allocations.set("D", Column::Development, 2);
        let mut rng = ScriptedRng::new(4);

        let report = resolve_column(&mut state, Column::Development, 4, &mut rng);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].work, 10);
        assert_eq!(report.entries[0].progress, "10/10");
        assert_eq!(report.completed, vec!["D".to_string()]);
    }

    #[test]
    fn test_unallocated_card_is_idle() {
        let mut state = state_with(Card::new("A".into(), "An".into(), 5, 200, 0).with_column(Column::Analysis));
        let mut rng = ScriptedRng::new(4);

        let report = resolve_column(&mut state, Column::Analysis, 6, &mut rng);
        assert!(report.entries.is_empty());
        assert_eq!(report.idle_cards, vec!["A".to_string()]);
        assert_eq!(state.card("A").unwrap().effort_done(), 0);
    }

    #[test]
    fn test_absent_agent_does_no_work() {
        let mut state = state_with(Card::new("T".into(), "Test".into(), 5, 200, 0).with_column(Column::Testing));
        state.specialist_allocations.set("T", Column::Testing, 1);
        state.set_absent(AgentType::Tester, 1);
        let mut rng = ScriptedRng::new(4);

        let report = resolve_column(&mut state, Column::Testing, 0, &mut rng);
        assert!(report.agent_absent);
        assert_eq!(state.card("T").unwrap().effort_done(), 0);
        assert_eq!(state.history.latest().unwrap().kind, HistoryKind::Absence);
    }

    #[test]
    fn test_bug_detection_sends_card_back() {
        let mut state = state_with(Card::new("T".into(), "Test".into(), 4, 200, 0).with_column(Column::Testing));
        state.specialist_allocations.set("T", Column::Testing, 1);
        let mut rng = ScriptedRng::new(4).with_outcomes([true]);

        let report = resolve_column(&mut state, Column::Testing, 2, &mut rng);
        let card = state.card("T").unwrap();
        assert_eq!(report.reworked, vec!["T".to_string()]);
        assert_eq!(card.current_column(), Column::Development);
        assert!(card.has_bug());
        assert_eq!(card.effort_done(), 0);
        assert_eq!(state.specialist_allocations.get("T", Column::Testing), 0);
    }

    #[test]
    fn test_clean_testing_marks_ready() {
        let mut state = state_with(Card::new("T".into(), "Test".into(), 4, 200, 0).with_column(Column::Testing));
        state.specialist_allocations.set("T", Column::Testing, 1);
        let mut rng = ScriptedRng::new(4).with_outcomes([false]);

        resolve_column(&mut state, Column::Testing, 2, &mut rng);
        let card = state.card("T").unwrap();
        assert_eq!(card.current_column(), Column::Testing);
        assert!(card.ready_for_deployment());
    }

    #[test]
    fn test_completed_card_not_reworked_again() {
        let mut state = state_with(
            Card::new("T".into(), "Test".into(), 4, 200, 0)
                .with_column(Column::Testing)
                .with_effort_done(4),
        );
        state.specialist_allocations.set("T", Column::Testing, 1);
        let mut rng = ScriptedRng::new(4).with_outcomes([true]);

        let report = resolve_column(&mut state, Column::Testing, 6, &mut rng);
        assert!(report.entries.is_empty());
        assert!(report.reworked.is_empty());
        assert_eq!(state.card("T").unwrap().current_column(), Column::Testing);
    }
}
