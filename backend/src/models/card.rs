//! Card model
//!
//! Represents a unit of work moving across the board.
//! Each card has:
//! - Identity, title, description, category and priority
//! - Effort required and effort done for the current stage
//! - Original value and final (post-penalty) value
//! - Deadline and lifecycle days (created, started, completed, last moved)
//! - Bug and ready-for-deployment flags
//!
//! # Critical Invariants
//!
//! 1. `effort_done <= effort_required` at all times
//! 2. `started_day` and `completed_day` are set at most once
//! 3. A deployed card is never mutated again
//!
//! Mutation is crate-private: cards change only through the work resolver
//! and the transition validator.

use crate::models::column::Column;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card priority
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    /// Sort order, 1 (low) to 4 (urgent)
    pub fn order(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Card category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Feature,
    Bug,
    Improvement,
    TechDebt,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Feature,
        Category::Bug,
        Category::Improvement,
        Category::TechDebt,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Feature => "Feature",
            Category::Bug => "Bug",
            Category::Improvement => "Improvement",
            Category::TechDebt => "Tech Debt",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A work item on the board
///
/// # Example
/// ```
/// use kanban_simulator_core_rs::{Card, Column, Priority};
///
/// let card = Card::new("C100".to_string(), "Rear camera".to_string(), 4, 250, 0)
///     .with_priority(Priority::High);
///
/// assert_eq!(card.current_column(), Column::Backlog);
/// assert_eq!(card.effort_done(), 0);
/// assert_eq!(card.deadline(), 9); // 10 - 0.005 * 250 = 8.75 → 9
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: String,

    title: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    category: Category,

    #[serde(default)]
    priority: Priority,

    /// Priority the card was authored with, before value-based criticality
    #[serde(default)]
    original_priority: Priority,

    /// Work units needed to clear the current stage
    effort_required: u32,

    /// Work units accumulated in the current stage
    #[serde(default)]
    effort_done: u32,

    /// Original monetary value
    value: i64,

    /// Value after any late-delivery penalty, frozen at deployment
    final_value: Option<i64>,

    current_column: Column,

    /// Absolute day number by which the card should be deployed
    deadline: u32,

    #[serde(default)]
    created_day: u32,

    /// Day the card first entered `ready`
    started_day: Option<u32>,

    /// Day the card reached `deployed`
    completed_day: Option<u32>,

    #[serde(default)]
    last_moved_day: u32,

    #[serde(default)]
    has_bug: bool,

    #[serde(default)]
    ready_for_deployment: bool,
}

impl Card {
    /// Create a new backlog card
    ///
    /// Priority starts as the value-based criticality and the deadline is
    /// `created_day + calculate_deadline(value, effort_required)`.
    pub fn new(
        id: String,
        title: String,
        effort_required: u32,
        value: i64,
        created_day: u32,
    ) -> Self {
        let priority = rules::calculate_criticality(value);
        Self {
            id,
            title,
            description: String::new(),
            category: Category::Feature,
            priority,
            original_priority: priority,
            effort_required,
            effort_done: 0,
            value,
            final_value: None,
            current_column: Column::Backlog,
            deadline: created_day.saturating_add(rules::calculate_deadline(value, effort_required)),
            created_day,
            started_day: None,
            completed_day: None,
            last_moved_day: created_day,
            has_bug: false,
            ready_for_deployment: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set both the current and original priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self.original_priority = priority;
        self
    }

    /// Keep the current priority but record the authored one
    pub fn with_original_priority(mut self, priority: Priority) -> Self {
        self.original_priority = priority;
        self
    }

    pub fn with_bug(mut self, has_bug: bool) -> Self {
        self.has_bug = has_bug;
        self
    }

    /// Place a freshly built card directly in a column (scenario setup)
    ///
    /// Entering `ready` or later marks the card as started on its creation
    /// day. Placing a card in `deployed` is ignored; deployment only happens
    /// through a move.
    pub fn with_column(mut self, column: Column) -> Self {
        if column == Column::Deployed {
            return self;
        }
        self.current_column = column;
        if column != Column::Backlog && self.started_day.is_none() {
            self.started_day = Some(self.created_day);
        }
        self
    }

    /// Pre-load stage progress, clamped to `effort_required`
    pub fn with_effort_done(mut self, effort_done: u32) -> Self {
        self.effort_done = effort_done.min(self.effort_required);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn original_priority(&self) -> Priority {
        self.original_priority
    }

    pub fn effort_required(&self) -> u32 {
        self.effort_required
    }

    pub fn effort_done(&self) -> u32 {
        self.effort_done
    }

    pub fn remaining_effort(&self) -> u32 {
        self.effort_required.saturating_sub(self.effort_done)
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn final_value(&self) -> Option<i64> {
        self.final_value
    }

    /// Value credited for this card: the final value once deployed
    pub fn delivered_value(&self) -> i64 {
        self.final_value.unwrap_or(self.value)
    }

    pub fn current_column(&self) -> Column {
        self.current_column
    }

    pub fn deadline(&self) -> u32 {
        self.deadline
    }

    pub fn created_day(&self) -> u32 {
        self.created_day
    }

    pub fn started_day(&self) -> Option<u32> {
        self.started_day
    }

    pub fn completed_day(&self) -> Option<u32> {
        self.completed_day
    }

    pub fn last_moved_day(&self) -> u32 {
        self.last_moved_day
    }

    pub fn has_bug(&self) -> bool {
        self.has_bug
    }

    pub fn ready_for_deployment(&self) -> bool {
        self.ready_for_deployment
    }

    pub fn is_deployed(&self) -> bool {
        self.current_column == Column::Deployed
    }

    /// True when the current stage's work is finished
    pub fn is_work_complete(&self) -> bool {
        self.effort_done >= self.effort_required
    }

    /// Days from `ready` to `deployed`, 0 while unfinished
    pub fn lead_time(&self) -> u32 {
        rules::calculate_lead_time(self)
    }

    /// Progress label, e.g. `"8/12"`
    pub fn progress(&self) -> String {
        format!("{}/{}", self.effort_done, self.effort_required)
    }

    // ========================================================================
    // Mutation (crate-private)
    // ========================================================================

    /// Add work units, capped at `effort_required`
    ///
    /// Returns the units actually applied.
    pub(crate) fn apply_work(&mut self, units: u32) -> u32 {
        if self.is_deployed() {
            return 0;
        }
        let before = self.effort_done;
        self.effort_done = self.effort_done.saturating_add(units).min(self.effort_required);
        self.effort_done - before
    }

    /// Change column, starting a fresh stage
    pub(crate) fn move_to(&mut self, column: Column, day: u32) {
        let backward = column.index() < self.current_column.index();
        self.current_column = column;
        self.last_moved_day = day;
        self.effort_done = 0;
        if backward {
            self.ready_for_deployment = false;
        }
        if column == Column::Ready && self.started_day.is_none() {
            self.started_day = Some(day);
        }
    }

    /// Send a card that failed testing back to development
    pub(crate) fn send_back_for_rework(&mut self, day: u32) {
        self.has_bug = true;
        self.effort_done = 0;
        self.ready_for_deployment = false;
        self.current_column = Column::Development;
        self.last_moved_day = day;
    }

    pub(crate) fn mark_ready_for_deployment(&mut self) {
        self.ready_for_deployment = true;
    }

    /// Freeze completion day and final value
    ///
    /// Only the first call has any effect.
    pub(crate) fn record_completion(&mut self, day: u32, final_value: i64) {
        if self.completed_day.is_none() {
            self.completed_day = Some(day);
            self.final_value = Some(final_value);
        }
    }
}
