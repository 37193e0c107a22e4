//! Game State
//!
//! Root aggregate of a running game: the day counter, every card, agent
//! state and absences, specialist allocations, history, metric series,
//! the day's dice and the daily cost history.
//!
//! # Critical Invariants
//!
//! 1. **Card Uniqueness**: each card id appears exactly once in `cards`
//! 2. **Effort Bounds**: every card has `effort_done <= effort_required`
//! 3. **Monotonic Day**: `day` only ever increases within one game
//! 4. **Append-only Series**: metric series and cost history only grow
//!
//! The state is owned exclusively by [`GameEngine`](crate::GameEngine) and is
//! replaced wholesale by init, restart and import.

use crate::metrics::MetricsSeries;
use crate::models::agent::AgentState;
use crate::models::allocation::SpecialistAllocation;
use crate::models::card::Card;
use crate::models::column::{AgentType, Column};
use crate::models::history::{HistoryEntry, HistoryKind, HistoryLog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete game state
///
/// # Example
///
/// ```rust
/// use kanban_simulator_core_rs::{Card, Column, GameState};
///
/// let mut state = GameState::fresh();
/// state.cards.push(Card::new("C001".to_string(), "Dashboard".to_string(), 3, 200, 0));
///
/// assert_eq!(state.count_in(Column::Backlog), 1);
/// assert!(!state.is_running);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    /// Days processed so far (0 before the first day)
    pub day: u32,

    /// All cards, in creation order
    pub cards: Vec<Card>,

    pub agents: BTreeMap<AgentType, AgentState>,

    pub specialist_allocations: SpecialistAllocation,

    /// Remaining days of absence per agent type
    pub agent_absences: BTreeMap<AgentType, u32>,

    pub history: HistoryLog,

    pub metrics: MetricsSeries,

    /// Dice rolled on the latest day (0 for absent agents)
    pub dice_results: BTreeMap<AgentType, u8>,

    /// Specialist cost of each processed day, indexed by day - 1
    pub daily_cost_history: Vec<i64>,

    pub is_running: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl GameState {
    /// Empty board with a full, available roster; not yet running
    pub fn fresh() -> Self {
        Self {
            day: 0,
            cards: Vec::new(),
            agents: AgentType::ALL
                .iter()
                .map(|&agent| (agent, AgentState::new(agent)))
                .collect(),
            specialist_allocations: SpecialistAllocation::new(),
            agent_absences: AgentType::ALL.iter().map(|&agent| (agent, 0)).collect(),
            history: HistoryLog::new(),
            metrics: MetricsSeries::new(),
            dice_results: BTreeMap::new(),
            daily_cost_history: Vec::new(),
            is_running: false,
        }
    }

    // ========================================================================
    // Cards
    // ========================================================================

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub(crate) fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    pub fn has_card(&self, id: &str) -> bool {
        self.card(id).is_some()
    }

    /// Cards currently in a column, in board order
    pub fn cards_in(&self, column: Column) -> impl Iterator<Item = &Card> {
        self.cards
            .iter()
            .filter(move |c| c.current_column() == column)
    }

    pub fn count_in(&self, column: Column) -> usize {
        self.cards_in(column).count()
    }

    pub fn deployed_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards_in(Column::Deployed)
    }

    /// Next free `Cnnn` id, starting from `cards.len() + 1`
    pub fn next_card_id(&self) -> String {
        let mut n = self.cards.len() + 1;
        loop {
            let candidate = format!("C{:03}", n);
            if !self.has_card(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Remaining absence days for an agent (0 when present)
    pub fn absence_remaining(&self, agent: AgentType) -> u32 {
        self.agent_absences.get(&agent).copied().unwrap_or(0)
    }

    pub fn is_absent(&self, agent: AgentType) -> bool {
        self.absence_remaining(agent) > 0
    }

    /// Agent types not currently absent
    pub fn available_agents(&self) -> Vec<AgentType> {
        AgentType::ALL
            .iter()
            .copied()
            .filter(|&agent| !self.is_absent(agent))
            .collect()
    }

    /// Mark an agent absent for `days` days
    pub(crate) fn set_absent(&mut self, agent: AgentType, days: u32) {
        self.agent_absences.insert(agent, days);
        self.agents
            .entry(agent)
            .or_insert_with(|| AgentState::new(agent))
            .mark_absent();
    }

    /// Count absences down by one day
    ///
    /// Returns the agents whose absence ended today.
    pub(crate) fn tick_absences(&mut self) -> Vec<AgentType> {
        let mut returned = Vec::new();
        for (&agent, remaining) in self.agent_absences.iter_mut() {
            if *remaining > 0 {
                *remaining -= 1;
                if *remaining == 0 {
                    returned.push(agent);
                }
            }
        }
        for &agent in &returned {
            if let Some(state) = self.agents.get_mut(&agent) {
                state.mark_available();
            }
        }
        returned
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Record a history entry stamped with the current day
    pub(crate) fn log(&mut self, kind: HistoryKind, action: impl Into<String>, details: impl Into<String>) {
        let entry = HistoryEntry::new(self.day, kind, action, details);
        self.history.record(entry);
    }
}
