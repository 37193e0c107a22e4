//! Rule table
//!
//! Fixed game constants plus the pure functions derived from them:
//! deadlines, criticality, work, late penalties, lead time and staleness.
//! Nothing here holds mutable state.
//!
//! # Formulas
//!
//! ```text
//! deadline    = round(max(10 - 0.005·value, 3, 0.5·effort))
//! work        = dice × base_efficiency × specialists (× 2 in specialty column)
//! final_value = round(value × (1 - min(0.1·days_late, 0.5)))   if days_late > 0
//! ```

pub mod metrics;
pub mod seed;
pub mod validation;

pub use metrics::{calculate_metrics, GameMetrics};
pub use seed::{seed_cards, SeedCard, SAMPLE_CARDS};
pub use validation::{can_pull_from_backlog, validate_move, MoveError};

use crate::models::card::{Card, Category, Priority};
use crate::models::column::{AgentType, Column};
use crate::orchestrator::checkpoint::{compute_fingerprint, CheckpointError};
use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Constants
// ============================================================================

/// Specialist cost per allocated specialist per day
pub const DAILY_COST_PER_SPECIALIST: i64 = 100;

/// Flat running cost per day used by the financial series (a team of three)
pub const FLAT_DAILY_COST: i64 = 300;

/// Default number of days in a game
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Days without movement after which a card is stale
pub const STALE_THRESHOLD: u32 = 5;

/// Maximum specialists per work column (shared by all cards in it)
pub const MAX_SPECIALISTS_PER_COLUMN: u8 = 3;

pub const BUG_CHANCE_PER_DAY: f64 = 0.15;
pub const ABSENCE_CHANCE_PER_DAY: f64 = 0.10;
pub const TESTER_BUG_DETECTION: f64 = 0.30;
pub const ABSENCE_DURATION_MIN: u32 = 1;
pub const ABSENCE_DURATION_MAX: u32 = 2;

pub const DEADLINE_BASE_DAYS: f64 = 10.0;
pub const DEADLINE_DAYS_PER_100_VALUE: f64 = -0.5;
pub const DEADLINE_MIN_DAYS: f64 = 3.0;
pub const DEADLINE_DAYS_PER_EFFORT: f64 = 0.5;

pub const LATE_PENALTY_PER_DAY: f64 = 0.1;
pub const MAX_LATE_PENALTY: f64 = 0.5;

/// Value range of a spawned bug card, inclusive
pub const BUG_VALUE_RANGE: (i64, i64) = (1, 3);

/// Effort range of a spawned bug card, inclusive
pub const BUG_EFFORT_RANGE: (u32, u32) = (5, 15);

pub const BUG_TITLES: [&str; 6] = [
    "Validation error",
    "Critical production bug",
    "Performance problem",
    "Broken interface",
    "Security flaw",
    "Data inconsistency",
];

pub const ABSENCE_REASONS: [&str; 3] = ["sick leave", "time off in lieu", "personal leave"];

/// WIP limit of a column (`None` = unlimited)
pub fn wip_limit(column: Column) -> Option<usize> {
    match column {
        Column::Backlog => None,
        Column::Ready => Some(3),
        Column::Analysis => Some(3),
        Column::Development => Some(4),
        Column::Testing => Some(3),
        Column::Deployed => None,
    }
}

/// Efficiency profile of an agent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub base_efficiency: u32,
    pub specialty_column: Column,
    pub specialty_multiplier: u32,
}

pub fn agent_profile(agent: AgentType) -> AgentProfile {
    AgentProfile {
        base_efficiency: 1,
        specialty_column: agent.specialty_column(),
        specialty_multiplier: 2,
    }
}

// ============================================================================
// Rule Table
// ============================================================================

/// Serializable view of every constant in the rule table
///
/// Used for display and for the rules fingerprint stored in exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTable {
    pub daily_cost_per_specialist: i64,
    pub flat_daily_cost: i64,
    pub stale_threshold: u32,
    pub max_specialists_per_column: u8,
    pub wip_limits: BTreeMap<Column, Option<usize>>,
    pub agents: BTreeMap<AgentType, AgentProfile>,
    pub bug_chance_per_day: f64,
    pub absence_chance_per_day: f64,
    pub tester_bug_detection: f64,
    pub absence_duration: (u32, u32),
    pub deadline_base_days: f64,
    pub deadline_days_per_100_value: f64,
    pub deadline_min_days: f64,
    pub deadline_days_per_effort: f64,
    pub late_penalty_per_day: f64,
    pub max_late_penalty: f64,
    pub column_order: Vec<Column>,
    pub work_columns: Vec<Column>,
    pub priorities: Vec<Priority>,
    pub categories: Vec<Category>,
}

impl RuleTable {
    /// The one rule table the game runs on
    pub fn standard() -> Self {
        Self {
            daily_cost_per_specialist: DAILY_COST_PER_SPECIALIST,
            flat_daily_cost: FLAT_DAILY_COST,
            stale_threshold: STALE_THRESHOLD,
            max_specialists_per_column: MAX_SPECIALISTS_PER_COLUMN,
            wip_limits: Column::ALL.iter().map(|&c| (c, wip_limit(c))).collect(),
            agents: AgentType::ALL
                .iter()
                .map(|&a| (a, agent_profile(a)))
                .collect(),
            bug_chance_per_day: BUG_CHANCE_PER_DAY,
            absence_chance_per_day: ABSENCE_CHANCE_PER_DAY,
            tester_bug_detection: TESTER_BUG_DETECTION,
            absence_duration: (ABSENCE_DURATION_MIN, ABSENCE_DURATION_MAX),
            deadline_base_days: DEADLINE_BASE_DAYS,
            deadline_days_per_100_value: DEADLINE_DAYS_PER_100_VALUE,
            deadline_min_days: DEADLINE_MIN_DAYS,
            deadline_days_per_effort: DEADLINE_DAYS_PER_EFFORT,
            late_penalty_per_day: LATE_PENALTY_PER_DAY,
            max_late_penalty: MAX_LATE_PENALTY,
            column_order: Column::ALL.to_vec(),
            work_columns: Column::WORK.to_vec(),
            priorities: Priority::ALL.to_vec(),
            categories: Category::ALL.to_vec(),
        }
    }
}

/// SHA-256 fingerprint of the standard rule table
///
/// Stored in exports so a saved game is only loaded under the same rules.
pub fn rules_fingerprint() -> Result<String, CheckpointError> {
    compute_fingerprint(&RuleTable::standard())
}

// ============================================================================
// Pure Rule Functions
// ============================================================================

/// Delivery window in days for a card of the given value and effort
///
/// # Example
/// ```
/// use kanban_simulator_core_rs::rules::calculate_deadline;
///
/// assert_eq!(calculate_deadline(600, 10), 7);
/// assert_eq!(calculate_deadline(2000, 2), 3);
/// ```
pub fn calculate_deadline(value: i64, effort: u32) -> u32 {
    let by_value = DEADLINE_BASE_DAYS + (value as f64 / 100.0) * DEADLINE_DAYS_PER_100_VALUE;
    let by_effort = f64::from(effort) * DEADLINE_DAYS_PER_EFFORT;
    by_value.max(DEADLINE_MIN_DAYS).max(by_effort).round() as u32
}

/// Value-based priority
pub fn calculate_criticality(value: i64) -> Priority {
    match value {
        v if v >= 600 => Priority::Urgent,
        v if v >= 400 => Priority::High,
        v if v >= 200 => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Work units produced by `specialists` of `agent` in `column`
pub fn calculate_work(agent: AgentType, column: Column, dice: u8, specialists: u8) -> u32 {
    let profile = agent_profile(agent);
    let work = u32::from(dice) * profile.base_efficiency * u32::from(specialists);
    if column == profile.specialty_column {
        work * profile.specialty_multiplier
    } else {
        work
    }
}

/// Value after the late-delivery penalty
///
/// # Example
/// ```
/// use kanban_simulator_core_rs::rules::calculate_late_penalty;
///
/// assert_eq!(calculate_late_penalty(0, 500), 500);
/// assert_eq!(calculate_late_penalty(3, 500), 350);
/// assert_eq!(calculate_late_penalty(10, 500), 250);
/// ```
pub fn calculate_late_penalty(days_late: i64, original_value: i64) -> i64 {
    if days_late <= 0 {
        return original_value;
    }
    let penalty = (days_late as f64 * LATE_PENALTY_PER_DAY).min(MAX_LATE_PENALTY);
    (original_value as f64 * (1.0 - penalty)).round() as i64
}

/// `completed_day - started_day`, or 0 if either is unset
pub fn calculate_lead_time(card: &Card) -> u32 {
    match (card.started_day(), card.completed_day()) {
        (Some(started), Some(completed)) => completed.saturating_sub(started),
        _ => 0,
    }
}

pub fn is_stale(card: &Card, current_day: u32) -> bool {
    current_day.saturating_sub(card.last_moved_day()) >= STALE_THRESHOLD
}
