//! Random event types
//!
//! # Design Principles
//!
//! 1. **Self-contained**: an event carries everything needed to apply it
//! 2. **Two kinds only**: a bug spawn or a specialist absence
//! 3. **Logged**: every applied event is summarized into the history log

use crate::models::card::Card;
use crate::models::column::AgentType;
use crate::models::history::HistoryKind;
use crate::models::state::GameState;
use serde::{Deserialize, Serialize};

/// A random event generated for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RandomEvent {
    /// A new bug card enters the backlog
    BugSpawned { card: Card },

    /// A specialist becomes unavailable for `days` days
    SpecialistAbsent {
        agent: AgentType,
        days: u32,
        reason: String,
    },
}

/// `{type, title, description}` view of an event, as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub title: String,
    pub description: String,
}

impl RandomEvent {
    pub fn kind(&self) -> HistoryKind {
        match self {
            RandomEvent::BugSpawned { .. } => HistoryKind::Bug,
            RandomEvent::SpecialistAbsent { .. } => HistoryKind::Absence,
        }
    }

    pub fn title(&self) -> String {
        match self {
            RandomEvent::BugSpawned { .. } => "New bug reported".to_string(),
            RandomEvent::SpecialistAbsent { agent, .. } => format!("{} absent", agent),
        }
    }

    pub fn description(&self) -> String {
        match self {
            RandomEvent::BugSpawned { card } => {
                format!("Bug card \"{}\" added to the backlog", card.title())
            }
            RandomEvent::SpecialistAbsent { days, reason, .. } => {
                format!("Reason: {} - Duration: {} day(s)", reason, days)
            }
        }
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            kind: self.kind(),
            title: self.title(),
            description: self.description(),
        }
    }

    /// Apply this event to the state
    pub fn apply(&self, state: &mut GameState) {
        match self {
            RandomEvent::BugSpawned { card } => state.cards.push(card.clone()),
            RandomEvent::SpecialistAbsent { agent, days, .. } => state.set_absent(*agent, *days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_applies_countdown() {
        let mut state = GameState::fresh();
        let event = RandomEvent::SpecialistAbsent {
            agent: AgentType::Tester,
            days: 2,
            reason: "personal leave".to_string(),
        };
        event.apply(&mut state);

        assert_eq!(state.absence_remaining(AgentType::Tester), 2);
        assert_eq!(event.title(), "Tester absent");
        assert_eq!(
            event.description(),
            "Reason: personal leave - Duration: 2 day(s)"
        );
    }

    #[test]
    fn test_summary_serializes_type_field() {
        let event = RandomEvent::SpecialistAbsent {
            agent: AgentType::Analyst,
            days: 1,
            reason: "sick leave".to_string(),
        };
        let json = serde_json::to_value(event.summary()).unwrap();
        assert_eq!(json["type"], "absence");
        assert_eq!(json["title"], "Analyst absent");
    }
}
