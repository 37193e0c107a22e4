//! Move validation
//!
//! Column-order and WIP-limit checks for a proposed card move. Validation is
//! read-only; applying a move lives in [`crate::transitions`].

use crate::models::card::Card;
use crate::models::column::Column;
use crate::rules::wip_limit;
use thiserror::Error;

/// Reason a move was rejected
///
/// The `Display` text is the reason shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Card {0} not found")]
    CardNotFound(String),

    #[error("Deployed cards cannot be moved")]
    AlreadyDeployed,

    #[error("Card is already in this column")]
    SameColumn,

    #[error("Cannot skip columns: {from} → {to}")]
    SkipsColumns { from: Column, to: Column },

    #[error("Incomplete work: {done}/{required} done in this stage")]
    IncompleteWork { done: u32, required: u32 },

    #[error("WIP limit reached in {column} ({limit} cards)")]
    WipLimitReached { column: Column, limit: usize },
}

/// Check whether `card` may move to `to` given the current board
///
/// Checks run in a fixed order: deployed source, same column, forward skip,
/// incomplete work in a work column, destination WIP limit. The WIP check
/// counts the destination's occupants before the move.
pub fn validate_move(card: &Card, to: Column, cards: &[Card]) -> Result<(), MoveError> {
    let from = card.current_column();

    if from == Column::Deployed {
        return Err(MoveError::AlreadyDeployed);
    }
    if from == to {
        return Err(MoveError::SameColumn);
    }

    let forward = to.index() > from.index();
    if forward && to.index() - from.index() > 1 {
        return Err(MoveError::SkipsColumns { from, to });
    }

    if forward && from.is_work_column() && !card.is_work_complete() {
        return Err(MoveError::IncompleteWork {
            done: card.effort_done(),
            required: card.effort_required(),
        });
    }

    if let Some(limit) = wip_limit(to) {
        let occupants = cards.iter().filter(|c| c.current_column() == to).count();
        if occupants >= limit {
            return Err(MoveError::WipLimitReached { column: to, limit });
        }
    }

    Ok(())
}

/// True unless `ready` is already at its WIP limit
pub fn can_pull_from_backlog(cards: &[Card]) -> bool {
    match wip_limit(Column::Ready) {
        Some(limit) => cards.iter().filter(|c| c.current_column() == Column::Ready).count() < limit,
        None => true,
    }
}
