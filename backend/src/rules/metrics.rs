//! Aggregate game metrics
//!
//! A single scoreboard computed on demand from the current state. The
//! per-day chart series live in [`crate::metrics`].

use crate::models::column::Column;
use crate::models::state::GameState;
use crate::rules::{wip_limit, DAILY_COST_PER_SPECIALIST};
use serde::{Deserialize, Serialize};

/// Scoreboard for the current state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetrics {
    /// Delivered value of deployed cards (final value when set)
    pub total_value: i64,
    pub total_cost: i64,
    pub profit: i64,
    /// Mean lead time of deployed cards, one decimal place
    pub avg_lead_time: f64,
    /// Deployed cards per day, two decimal places
    pub throughput: f64,
    /// Cards sitting in columns at or over their WIP limit
    pub blocked_count: usize,
    pub deployed_count: usize,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Compute the scoreboard
///
/// Total cost is the sum of recorded daily costs. Before any day has been
/// processed it falls back to `day × allocated specialists × 100`.
pub fn calculate_metrics(state: &GameState) -> GameMetrics {
    let deployed: Vec<_> = state.deployed_cards().collect();

    let total_value: i64 = deployed.iter().map(|c| c.delivered_value()).sum();

    let total_cost = if state.daily_cost_history.is_empty() {
        i64::from(state.day)
            * i64::from(state.specialist_allocations.total_allocated())
            * DAILY_COST_PER_SPECIALIST
    } else {
        state.daily_cost_history.iter().sum()
    };

    let lead_times: Vec<u32> = deployed
        .iter()
        .filter(|c| c.started_day().is_some() && c.completed_day().is_some())
        .map(|c| c.lead_time())
        .collect();
    let avg_lead_time = if lead_times.is_empty() {
        0.0
    } else {
        let sum: u32 = lead_times.iter().sum();
        round_to(f64::from(sum) / lead_times.len() as f64, 1)
    };

    let throughput = if state.day > 0 {
        round_to(deployed.len() as f64 / f64::from(state.day), 2)
    } else {
        0.0
    };

    let blocked_count = Column::ALL
        .iter()
        .filter_map(|&column| {
            let limit = wip_limit(column)?;
            let count = state.count_in(column);
            (count >= limit).then_some(count)
        })
        .sum();

    GameMetrics {
        total_value,
        total_cost,
        profit: total_value - total_cost,
        avg_lead_time,
        throughput,
        blocked_count,
        deployed_count: deployed.len(),
    }
}
