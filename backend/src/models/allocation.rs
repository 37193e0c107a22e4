//! Specialist allocation
//!
//! Maps card id → work column → specialist count. The per-column cap is
//! enforced when an allocation is made, not retroactively.

use crate::models::card::Card;
use crate::models::column::Column;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Specialist counts per card and work column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialistAllocation {
    by_card: BTreeMap<String, BTreeMap<Column, u8>>,
}

impl SpecialistAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Specialists assigned to a card in a column (0 when unset)
    pub fn get(&self, card_id: &str, column: Column) -> u8 {
        self.by_card
            .get(card_id)
            .and_then(|columns| columns.get(&column))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn set(&mut self, card_id: &str, column: Column, count: u8) {
        self.by_card
            .entry(card_id.to_string())
            .or_default()
            .insert(column, count);
    }

    /// Release a card's specialists in one column
    pub(crate) fn clear(&mut self, card_id: &str, column: Column) {
        if let Some(columns) = self.by_card.get_mut(card_id) {
            columns.insert(column, 0);
        }
    }

    /// Specialists assigned in `column` to cards currently resident there
    ///
    /// `excluding` skips one card id, used when re-allocating that card.
    pub fn total_in_column(&self, cards: &[Card], column: Column, excluding: Option<&str>) -> u32 {
        cards
            .iter()
            .filter(|c| c.current_column() == column)
            .filter(|c| Some(c.id()) != excluding)
            .map(|c| u32::from(self.get(c.id(), column)))
            .sum()
    }

    /// Every specialist recorded across all cards and columns
    pub fn total_allocated(&self) -> u32 {
        self.by_card
            .values()
            .flat_map(|columns| columns.values())
            .map(|&count| u32::from(count))
            .sum()
    }

    /// Allocations for one card
    pub fn for_card(&self, card_id: &str) -> Option<&BTreeMap<Column, u8>> {
        self.by_card.get(card_id)
    }

    pub fn is_empty(&self) -> bool {
        self.total_allocated() == 0
    }
}
