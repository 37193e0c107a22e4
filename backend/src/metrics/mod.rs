//! Metrics recorder
//!
//! Derives chart series from the board and appends them to the game state:
//! - **CFD**: per-column card counts
//! - **Financial**: delivered value, flat running cost, profit
//! - **Throughput**: cards deployed that day and cumulatively
//! - **Lead times**: one entry per deployment
//!
//! # Critical Invariants
//!
//! - Series are append-only; an entry is never rewritten once recorded
//! - Each snapshot is a full board count, so several entries may share a day
//!   when cards move between day ticks

use crate::models::card::Card;
use crate::models::column::Column;
use crate::models::state::GameState;
use crate::rules;
use serde::{Deserialize, Serialize};

/// Cumulative flow diagram entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CfdEntry {
    pub day: u32,
    pub backlog: usize,
    pub ready: usize,
    pub analysis: usize,
    pub development: usize,
    pub testing: usize,
    pub deployed: usize,
}

impl CfdEntry {
    /// Count for a single column
    pub fn count(&self, column: Column) -> usize {
        match column {
            Column::Backlog => self.backlog,
            Column::Ready => self.ready,
            Column::Analysis => self.analysis,
            Column::Development => self.development,
            Column::Testing => self.testing,
            Column::Deployed => self.deployed,
        }
    }

    pub fn total(&self) -> usize {
        Column::ALL.iter().map(|&c| self.count(c)).sum()
    }
}

/// Financial series entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub day: u32,
    /// Delivered value (final values of deployed cards)
    pub value: i64,
    /// `day × FLAT_DAILY_COST`
    pub cost: i64,
    pub profit: i64,
}

/// Throughput series entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThroughputEntry {
    pub day: u32,
    /// Cards whose completion day is exactly `day`
    pub completed: usize,
    /// All deployed cards so far
    pub cumulative: usize,
}

/// Lead time of a deployed card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTimeEntry {
    pub card_id: String,
    pub title: String,
    pub lead_time: u32,
    /// Final (post-penalty) value
    pub value: i64,
}

/// All recorded series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsSeries {
    pub cfd: Vec<CfdEntry>,
    pub lead_times: Vec<LeadTimeEntry>,
    pub financial: Vec<FinancialEntry>,
    pub throughput: Vec<ThroughputEntry>,
}

impl MetricsSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest_cfd(&self) -> Option<&CfdEntry> {
        self.cfd.last()
    }

    pub fn latest_financial(&self) -> Option<&FinancialEntry> {
        self.financial.last()
    }

    pub fn latest_throughput(&self) -> Option<&ThroughputEntry> {
        self.throughput.last()
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Count cards per column
pub fn cfd_entry(cards: &[Card], day: u32) -> CfdEntry {
    let mut entry = CfdEntry {
        day,
        ..Default::default()
    };
    for card in cards {
        match card.current_column() {
            Column::Backlog => entry.backlog += 1,
            Column::Ready => entry.ready += 1,
            Column::Analysis => entry.analysis += 1,
            Column::Development => entry.development += 1,
            Column::Testing => entry.testing += 1,
            Column::Deployed => entry.deployed += 1,
        }
    }
    entry
}

pub fn financial_entry(cards: &[Card], day: u32) -> FinancialEntry {
    let value: i64 = cards
        .iter()
        .filter(|c| c.is_deployed())
        .map(Card::delivered_value)
        .sum();
    let cost = i64::from(day) * rules::FLAT_DAILY_COST;
    FinancialEntry {
        day,
        value,
        cost,
        profit: value - cost,
    }
}

pub fn throughput_entry(cards: &[Card], day: u32) -> ThroughputEntry {
    let deployed = cards.iter().filter(|c| c.is_deployed());
    let (completed, cumulative) = deployed.fold((0, 0), |(today, total), card| {
        let today = if card.completed_day() == Some(day) {
            today + 1
        } else {
            today
        };
        (today, total + 1)
    });
    ThroughputEntry {
        day,
        completed,
        cumulative,
    }
}

// ============================================================================
// Recording
// ============================================================================

/// Append one CFD, financial and throughput entry for the current day
pub fn record_snapshot(state: &mut GameState) {
    let day = state.day;
    let cfd = cfd_entry(&state.cards, day);
    let financial = financial_entry(&state.cards, day);
    let throughput = throughput_entry(&state.cards, day);

    state.metrics.cfd.push(cfd);
    state.metrics.financial.push(financial);
    state.metrics.throughput.push(throughput);
}

/// Append a lead-time entry for a card that was just deployed
pub fn record_lead_time(state: &mut GameState, card: &Card) {
    state.metrics.lead_times.push(LeadTimeEntry {
        card_id: card.id().to_string(),
        title: card.title().to_string(),
        lead_time: card.lead_time(),
        value: card.delivered_value(),
    });
}
