//! History log for the game's audit trail.
//!
//! Every engine action (day processed, card moved, specialists allocated,
//! random event, ...) appends a [`HistoryEntry`]. The log keeps the newest
//! entry first and holds at most [`HISTORY_CAPACITY`] entries; the oldest
//! entry is evicted on overflow.
//!
//! # Example
//!
//! ```rust
//! use kanban_simulator_core_rs::models::{HistoryEntry, HistoryKind, HistoryLog};
//!
//! let mut log = HistoryLog::new();
//! log.record(HistoryEntry::new(1, HistoryKind::Dice, "Day 1", "Analyst: 4"));
//! log.record(HistoryEntry::new(1, HistoryKind::Move, "\"ECU update\" moved", "Backlog → Ready"));
//!
//! assert_eq!(log.latest().unwrap().kind, HistoryKind::Move);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of entries retained
pub const HISTORY_CAPACITY: usize = 100;

/// Kind of action recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    /// Game lifecycle (start, import)
    System,
    /// Daily dice summary
    Dice,
    /// Bug card spawned or bug detected in testing
    Bug,
    /// Specialist absent
    Absence,
    /// Specialist returned from absence
    Info,
    /// Work applied or stage completed
    Work,
    Allocation,
    Move,
    /// Card deployed on time
    Complete,
    /// Card deployed late
    Penalty,
    /// Card added to the backlog
    Add,
}

/// One audit-trail entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub day: u32,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub action: String,
    pub details: String,
}

impl HistoryEntry {
    pub fn new(
        day: u32,
        kind: HistoryKind,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            day,
            kind,
            action: action.into(),
            details: details.into(),
        }
    }
}

/// Bounded, newest-first history log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Add an entry at the front, evicting the oldest beyond capacity
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.enforce_capacity();
    }

    /// Drop the oldest entries until the log fits its capacity
    pub(crate) fn enforce_capacity(&mut self) {
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries recorded on a given day, newest first
    pub fn entries_on_day(&self, day: u32) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|e| e.day == day).collect()
    }

    /// Entries of a given kind, newest first
    pub fn entries_of_kind(&self, kind: HistoryKind) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32, kind: HistoryKind) -> HistoryEntry {
        HistoryEntry::new(day, kind, format!("action {}", day), "")
    }

    #[test]
    fn test_newest_first() {
        let mut log = HistoryLog::new();
        log.record(entry(1, HistoryKind::Dice));
        log.record(entry(2, HistoryKind::Work));

        let days: Vec<u32> = log.entries().map(|e| e.day).collect();
        assert_eq!(days, vec![2, 1]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = HistoryLog::new();
        for day in 0..(HISTORY_CAPACITY as u32 + 5) {
            log.record(entry(day, HistoryKind::Dice));
        }

        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.latest().unwrap().day, HISTORY_CAPACITY as u32 + 4);
        // Days 0..=4 were evicted
        assert!(log.entries_on_day(4).is_empty());
        assert_eq!(log.entries_on_day(5).len(), 1);
    }

    #[test]
    fn test_query_by_kind() {
        let mut log = HistoryLog::new();
        log.record(entry(1, HistoryKind::Bug));
        log.record(entry(1, HistoryKind::Move));
        log.record(entry(2, HistoryKind::Bug));

        assert_eq!(log.entries_of_kind(HistoryKind::Bug).len(), 2);
        assert_eq!(log.entries_on_day(1).len(), 2);
    }

    #[test]
    fn test_serializes_as_list() {
        let mut log = HistoryLog::new();
        log.record(entry(3, HistoryKind::Allocation));
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["type"], "allocation");
        assert_eq!(json[0]["day"], 3);
    }
}
