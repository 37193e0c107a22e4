//! Transition validator
//!
//! Applies validated card moves over the fixed column order
//! `backlog → ready → analysis → development → testing → deployed`.
//!
//! # Critical Invariants
//!
//! 1. **Terminal Deployment**: nothing leaves `deployed`
//! 2. **No Skipping**: forward moves advance exactly one column
//! 3. **Complete Before Advance**: leaving a work column forward requires the
//!    stage's work to be done
//! 4. **Deploy Once**: `completed_day` and `final_value` are frozen on the
//!    single move into `deployed`
//!
//! Bug rework (`testing → development`) bypasses this module; the work
//! resolver applies it directly.

use crate::metrics;
use crate::models::card::Card;
use crate::models::column::Column;
use crate::models::history::HistoryKind;
use crate::models::state::GameState;
use crate::rules::{self, validate_move};
use serde::{Deserialize, Serialize};

pub use crate::rules::MoveError;

/// Outcome of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub lead_time: u32,
    pub final_value: i64,
    /// Value lost to the late penalty
    pub penalty: i64,
    /// Days past the deadline (0 when on time)
    pub days_late: u32,
}

/// A move that was applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSuccess {
    /// The card after the move
    pub card: Card,
    pub from: Column,
    pub to: Column,
    pub deployment: Option<Deployment>,
}

/// Validate and apply a move of `card_id` to `to`
///
/// On failure the state is untouched.
pub fn move_card(state: &mut GameState, card_id: &str, to: Column) -> Result<MoveSuccess, MoveError> {
    let card = state
        .card(card_id)
        .ok_or_else(|| MoveError::CardNotFound(card_id.to_string()))?;
    validate_move(card, to, &state.cards)?;

    let from = card.current_column();
    let day = state.day;

    let card = state
        .card_mut(card_id)
        .ok_or_else(|| MoveError::CardNotFound(card_id.to_string()))?;
    card.move_to(to, day);

    let deployment = if to == Column::Deployed {
        let days_late = i64::from(day) - i64::from(card.deadline());
        let final_value = rules::calculate_late_penalty(days_late, card.value());
        card.record_completion(day, final_value);
        Some(Deployment {
            lead_time: card.lead_time(),
            final_value,
            penalty: card.value() - final_value,
            days_late: days_late.max(0) as u32,
        })
    } else {
        None
    };
    let moved = card.clone();

    if from.is_work_column() {
        state.specialist_allocations.clear(card_id, from);
    }

    match &deployment {
        Some(outcome) => {
            metrics::record_lead_time(state, &moved);
            if outcome.penalty > 0 {
                state.log(
                    HistoryKind::Penalty,
                    format!("\"{}\" delivered late", moved.title()),
                    format!(
                        "Lead time: {} days - LATE! Penalty: ${}, Final value: ${}",
                        outcome.lead_time, outcome.penalty, outcome.final_value
                    ),
                );
            } else {
                state.log(
                    HistoryKind::Complete,
                    format!("\"{}\" completed!", moved.title()),
                    format!(
                        "Lead time: {} days, Value: ${}",
                        outcome.lead_time, outcome.final_value
                    ),
                );
            }
        }
        None => state.log(
            HistoryKind::Move,
            format!("\"{}\" moved", moved.title()),
            format!("{} → {}", from, to),
        ),
    }

    tracing::debug!(card = %card_id, %from, %to, "card moved");

    Ok(MoveSuccess {
        card: moved,
        from,
        to,
        deployment,
    })
}

/// Columns a card could move to right now (no mutation)
pub fn valid_destinations(state: &GameState, card_id: &str) -> Vec<Column> {
    let Some(card) = state.card(card_id) else {
        return Vec::new();
    };
    Column::ALL
        .iter()
        .copied()
        .filter(|&to| validate_move(card, to, &state.cards).is_ok())
        .collect()
}
