//! Game Engine
//!
//! Owns the canonical [`GameState`] and the injected random source, and
//! exposes every operation a player (or a host UI) can perform.
//!
//! # Architecture
//!
//! ```text
//! For each processed day:
//! 1. Advance the day counter
//! 2. Count absences down; returning agents become available
//! 3. Generate and apply random events (bug spawn, absence)
//! 4. Roll dice for present agents (absent agents record 0)
//! 5. Resolve work in analysis, development, testing
//! 6. Charge the day's specialist cost
//! 7. Record CFD, financial and throughput snapshots
//! 8. Log dice summary, events and per-card work
//! ```
//!
//! # Example
//!
//! ```rust
//! use kanban_simulator_core_rs::{Column, EngineConfig, GameEngine};
//!
//! let mut engine = GameEngine::start(EngineConfig {
//!     rng_seed: Some(12345),
//!     ..EngineConfig::default()
//! });
//!
//! engine.move_card("C001", Column::Ready).unwrap();
//! let result = engine.process_day().unwrap();
//! assert_eq!(result.day, 1);
//! ```

use crate::events::{generate_random_events, types::EventSummary};
use crate::metrics;
use crate::models::card::{Card, Category, Priority};
use crate::models::column::{AgentType, Column};
use crate::models::history::HistoryKind;
use crate::models::state::GameState;
use crate::orchestrator::checkpoint::{self, CheckpointError};
use crate::rng::{RandomSource, RngManager};
use crate::rules::{
    self, calculate_metrics, GameMetrics, DAILY_COST_PER_SPECIALIST, DEFAULT_HORIZON_DAYS,
    MAX_SPECIALISTS_PER_COLUMN,
};
use crate::transitions::{self, MoveError, MoveSuccess};
use crate::work::{resolve_column, WorkEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Engine configuration
///
/// The rule table itself is fixed; only the random seed, the game length
/// and the starting deck are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the xorshift source (None = seed from OS entropy)
    pub rng_seed: Option<u64>,

    /// Day after which `DayResult::horizon_reached` is reported
    pub horizon_days: u32,

    /// Start with the twenty seed cards (false = empty board)
    pub seed_cards: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
            seed_cards: true,
        }
    }
}

/// Input for [`GameEngine::add_card`]; unset fields take the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    /// Default: medium
    pub priority: Option<Priority>,
    /// Default: feature
    pub category: Option<Category>,
    /// Default: 5
    pub effort: Option<u32>,
    /// Default: 100
    pub value: Option<i64>,
}

impl NewCard {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

pub const DEFAULT_NEW_CARD_EFFORT: u32 = 5;
pub const DEFAULT_NEW_CARD_VALUE: i64 = 100;

// ============================================================================
// Results and Errors
// ============================================================================

/// Everything that happened in one processed day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResult {
    pub day: u32,
    pub dice_results: BTreeMap<AgentType, u8>,
    pub work_report: Vec<WorkEntry>,
    pub events: Vec<EventSummary>,
    pub daily_cost: i64,
    /// Cards left without specialists in their work column
    pub idle_cards: Vec<String>,
    /// Agents whose absence ended today
    pub returned_agents: Vec<AgentType>,
    pub horizon_reached: bool,
}

/// A successful specialist allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSuccess {
    pub card_id: String,
    pub column: Column,
    pub count: u8,
}

/// Idle capacity in a work column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistWarning {
    pub column: Column,
    pub idle_cards: usize,
    pub free_specialists: u8,
}

impl fmt::Display for SpecialistWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} card(s) without specialists and {} specialist(s) free",
            self.column, self.idle_cards, self.free_specialists
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayError {
    #[error("Game is not running")]
    NotRunning,

    #[error("Day counter cannot advance past day {0}")]
    DayLimitReached(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("Card {0} not found")]
    CardNotFound(String),

    #[error("{0} is not a work column")]
    NotWorkColumn(Column),

    #[error("Card is not in {0}")]
    CardNotInColumn(Column),

    #[error("At most {max} specialists per column")]
    CountOutOfRange { count: u8, max: u8 },

    #[error("At most {max} specialists in the column. Already allocated: {allocated}")]
    ColumnCapacityExceeded { max: u8, allocated: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddCardError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Effort must be at least 1")]
    InvalidEffort,

    #[error("Value must not be negative")]
    NegativeValue,
}

// ============================================================================
// Engine
// ============================================================================

/// The game engine
///
/// Single owner of the game state. All mutation is synchronous and
/// completes fully before returning; callers needing shared access must
/// serialize it themselves.
#[derive(Debug)]
pub struct GameEngine {
    config: EngineConfig,
    state: GameState,
    rng: Box<dyn RandomSource>,
}

impl GameEngine {
    /// Create an engine that has not started yet
    ///
    /// The random source is the xorshift generator, seeded from the config
    /// or from OS entropy.
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };
        Self::with_random_source(config, Box::new(rng))
    }

    /// Create an engine with an injected random source
    pub fn with_random_source(config: EngineConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            state: GameState::fresh(),
            rng,
        }
    }

    /// Create and initialize an engine
    pub fn start(config: EngineConfig) -> Self {
        let mut engine = Self::new(config);
        engine.init();
        engine
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Replace the state with a fresh running game
    pub fn init(&mut self) {
        let mut state = GameState::fresh();
        if self.config.seed_cards {
            state.cards = rules::seed_cards();
        }
        state.is_running = true;
        metrics::record_snapshot(&mut state);
        let count = state.cards.len();
        state.log(
            HistoryKind::System,
            "Game started",
            format!("{} cards in the backlog", count),
        );
        self.state = state;

        tracing::info!(cards = count, horizon = self.config.horizon_days, "game initialized");
    }

    /// Start over with the same configuration
    ///
    /// The random source continues from where it was.
    pub fn restart(&mut self) {
        tracing::info!(day = self.state.day, "restarting game");
        self.init();
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_day(&self) -> u32 {
        self.state.day
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.state.card(card_id)
    }

    // ========================================================================
    // Day Processing
    // ========================================================================

    /// Simulate one day
    pub fn process_day(&mut self) -> Result<DayResult, DayError> {
        if !self.state.is_running {
            return Err(DayError::NotRunning);
        }

        let day = self
            .state
            .day
            .checked_add(1)
            .ok_or(DayError::DayLimitReached(self.state.day))?;
        self.state.day = day;

        // 1. Absences
        let returned_agents = self.state.tick_absences();
        for agent in &returned_agents {
            self.state.log(
                HistoryKind::Info,
                format!("{} returned", agent),
                "Specialist available again",
            );
        }

        // 2. Random events
        let events = generate_random_events(&self.state, self.rng.as_mut());
        for event in &events {
            event.apply(&mut self.state);
        }

        // 3. Dice
        let mut dice_results = BTreeMap::new();
        for agent in AgentType::ALL {
            let dice = if self.state.is_absent(agent) {
                0
            } else {
                let dice = self.rng.roll_die();
                if let Some(agent_state) = self.state.agents.get_mut(&agent) {
                    agent_state.record_roll(dice);
                }
                dice
            };
            dice_results.insert(agent, dice);
        }
        self.state.dice_results = dice_results.clone();

        // 4. Work
        let mut work_report = Vec::new();
        let mut idle_cards = Vec::new();
        for column in Column::WORK {
            let dice = column
                .agent()
                .and_then(|agent| dice_results.get(&agent).copied())
                .unwrap_or(0);
            let report = resolve_column(&mut self.state, column, dice, self.rng.as_mut());
            work_report.extend(report.entries);
            idle_cards.extend(report.idle_cards);
        }

        // 5. Cost
        let daily_cost =
            i64::from(self.state.specialist_allocations.total_allocated()) * DAILY_COST_PER_SPECIALIST;
        self.state.daily_cost_history.push(daily_cost);

        // 6. Metrics
        metrics::record_snapshot(&mut self.state);

        // 7. History
        let dice_summary = dice_results
            .iter()
            .map(|(agent, dice)| format!("{}: {}", agent, dice))
            .collect::<Vec<_>>()
            .join(", ");
        self.state.log(HistoryKind::Dice, format!("Day {}", day), dice_summary);

        let events: Vec<EventSummary> = events.iter().map(|e| e.summary()).collect();
        for event in &events {
            self.state.log(event.kind, event.title.clone(), event.description.clone());
        }
        for entry in &work_report {
            let (action, details) = entry.describe();
            self.state.log(HistoryKind::Work, action, details);
        }

        if !idle_cards.is_empty() {
            tracing::warn!(day, idle = idle_cards.len(), "cards without specialists");
        }
        tracing::info!(
            day,
            events = events.len(),
            worked = work_report.len(),
            daily_cost,
            "day processed"
        );

        Ok(DayResult {
            day,
            dice_results,
            work_report,
            events,
            daily_cost,
            idle_cards,
            returned_agents,
            horizon_reached: day >= self.config.horizon_days,
        })
    }

    // ========================================================================
    // Card and Specialist Operations
    // ========================================================================

    /// Move a card, recording a metrics snapshot on success
    pub fn move_card(&mut self, card_id: &str, to: Column) -> Result<MoveSuccess, MoveError> {
        let result = transitions::move_card(&mut self.state, card_id, to);
        match &result {
            Ok(_) => metrics::record_snapshot(&mut self.state),
            Err(err) => tracing::debug!(card = %card_id, %to, reason = %err, "move rejected"),
        }
        result
    }

    /// Assign `count` specialists to a card in its current work column
    ///
    /// The column total (other resident cards plus this one) may not exceed
    /// `MAX_SPECIALISTS_PER_COLUMN`. A count of 0 releases the card's
    /// specialists.
    pub fn allocate_specialists(
        &mut self,
        card_id: &str,
        column: Column,
        count: u8,
    ) -> Result<AllocationSuccess, AllocationError> {
        let card = self
            .state
            .card(card_id)
            .ok_or_else(|| AllocationError::CardNotFound(card_id.to_string()))?;

        if !column.is_work_column() {
            return Err(AllocationError::NotWorkColumn(column));
        }
        if card.current_column() != column {
            return Err(AllocationError::CardNotInColumn(column));
        }
        if count > MAX_SPECIALISTS_PER_COLUMN {
            return Err(AllocationError::CountOutOfRange {
                count,
                max: MAX_SPECIALISTS_PER_COLUMN,
            });
        }

        let allocated = self.state.specialist_allocations.total_in_column(
            &self.state.cards,
            column,
            Some(card_id),
        );
        if allocated + u32::from(count) > u32::from(MAX_SPECIALISTS_PER_COLUMN) {
            return Err(AllocationError::ColumnCapacityExceeded {
                max: MAX_SPECIALISTS_PER_COLUMN,
                allocated,
            });
        }

        let title = card.title().to_string();
        self.state.specialist_allocations.set(card_id, column, count);
        self.state.log(
            HistoryKind::Allocation,
            format!("Specialists allocated to \"{}\"", title),
            format!("{}x specialist(s) in {}", count, column),
        );
        tracing::debug!(card = %card_id, %column, count, "specialists allocated");

        Ok(AllocationSuccess {
            card_id: card_id.to_string(),
            column,
            count,
        })
    }

    /// Add a card to the backlog
    pub fn add_card(&mut self, new_card: NewCard) -> Result<Card, AddCardError> {
        let title = new_card.title.trim();
        if title.is_empty() {
            return Err(AddCardError::EmptyTitle);
        }
        let effort = new_card.effort.unwrap_or(DEFAULT_NEW_CARD_EFFORT);
        if effort == 0 {
            return Err(AddCardError::InvalidEffort);
        }
        let value = new_card.value.unwrap_or(DEFAULT_NEW_CARD_VALUE);
        if value < 0 {
            return Err(AddCardError::NegativeValue);
        }

        let card = Card::new(
            self.state.next_card_id(),
            title.to_string(),
            effort,
            value,
            self.state.day,
        )
        .with_description(new_card.description.trim())
        .with_category(new_card.category.unwrap_or_default())
        .with_priority(new_card.priority.unwrap_or_default());

        self.state.cards.push(card.clone());
        self.state.log(
            HistoryKind::Add,
            format!("New card: \"{}\"", card.title()),
            format!("Effort: {}, Value: ${}", effort, value),
        );
        metrics::record_snapshot(&mut self.state);
        tracing::debug!(card = %card.id(), effort, value, "card added");

        Ok(card)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn metrics(&self) -> GameMetrics {
        calculate_metrics(&self.state)
    }

    pub fn can_pull_from_backlog(&self) -> bool {
        rules::can_pull_from_backlog(&self.state.cards)
    }

    /// Columns the card could move to right now
    pub fn valid_destinations(&self, card_id: &str) -> Vec<Column> {
        transitions::valid_destinations(&self.state, card_id)
    }

    /// Non-deployed cards that have not moved for the stale threshold
    pub fn stale_cards(&self) -> Vec<&Card> {
        let day = self.state.day;
        self.state
            .cards
            .iter()
            .filter(|c| !c.is_deployed() && rules::is_stale(c, day))
            .collect()
    }

    /// Work columns with unallocated cards and free specialist capacity
    pub fn unallocated_specialist_warnings(&self) -> Vec<SpecialistWarning> {
        let allocations = &self.state.specialist_allocations;
        Column::WORK
            .iter()
            .filter_map(|&column| {
                let resident: Vec<&Card> = self.state.cards_in(column).collect();
                if resident.is_empty() {
                    return None;
                }
                let idle_cards = resident
                    .iter()
                    .filter(|c| allocations.get(c.id(), column) == 0)
                    .count();
                let allocated = allocations.total_in_column(&self.state.cards, column, None);
                let free = u32::from(MAX_SPECIALISTS_PER_COLUMN).saturating_sub(allocated);
                (idle_cards > 0 && free > 0).then(|| SpecialistWarning {
                    column,
                    idle_cards,
                    free_specialists: free as u8,
                })
            })
            .collect()
    }

    // ========================================================================
    // Export / Import
    // ========================================================================

    /// Pretty JSON of the full state plus the rules fingerprint
    pub fn export_state(&self) -> Result<String, CheckpointError> {
        checkpoint::export_state(&self.state)
    }

    /// Replace the state with an exported one
    ///
    /// On failure the current state is left untouched.
    pub fn import_state(&mut self, json: &str) -> Result<(), CheckpointError> {
        match checkpoint::import_state(json) {
            Ok(state) => {
                tracing::info!(day = state.day, cards = state.cards.len(), "state imported");
                self.state = state;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(reason = %err, "import rejected");
                Err(err)
            }
        }
    }

    /// Replace the state with an in-memory one, under the import checks
    ///
    /// The current game is kept when validation fails.
    pub fn load_state(&mut self, mut state: GameState) -> Result<(), CheckpointError> {
        checkpoint::validate_state(&state)?;
        state.history.enforce_capacity();
        state.is_running = true;
        tracing::debug!(day = state.day, cards = state.cards.len(), "state loaded");
        self.state = state;
        Ok(())
    }
}
