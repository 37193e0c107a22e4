//! Checkpoint - Export/Import Game State
//!
//! Serializes the full game state to pretty JSON and restores it.
//!
//! # Critical Invariants
//!
//! - **Wholesale Replacement**: an import either produces a complete,
//!   validated state or fails; the engine never sees a partial state
//! - **Rules Matching**: a saved game carrying a rules fingerprint can only
//!   be loaded under the same rule table
//! - **Card Integrity**: imported card ids are unique and every card keeps
//!   `effortDone <= effortRequired`
//! - **Deploy Once**: `completedDay` and `finalValue` are present exactly on
//!   deployed cards, and no card completes after the current day
//! - **Day Headroom**: the imported day can still advance
//! - **Bounded History**: imported history is truncated to capacity

use crate::models::card::Card;
use crate::models::state::GameState;
use crate::rules;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;

/// Key under which the rules fingerprint is stored in an export
pub const FINGERPRINT_KEY: &str = "rulesFingerprint";

/// Export/import failure
///
/// The `Display` text is the reason shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid state: 'cards' must be a list")]
    MissingCards,

    #[error("Invalid state: 'day' must be a number")]
    MissingDay,

    #[error("Saved game uses a different rule table (expected {expected}, found {found})")]
    RulesMismatch { expected: String, found: String },

    #[error("Invalid state: {0}")]
    Malformed(String),

    #[error("Invalid state: duplicate card id {0}")]
    DuplicateCardId(String),

    #[error("Invalid state: card {card} has {done}/{required} effort done")]
    EffortOutOfBounds { card: String, done: u32, required: u32 },

    #[error("Invalid state: card {card} {reason}")]
    InconsistentLifecycle { card: String, reason: &'static str },

    #[error("Invalid state: day {0} cannot advance")]
    DayOutOfRange(u32),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

// ============================================================================
// Fingerprinting
// ============================================================================

/// Deterministic SHA-256 hash of any serializable value
///
/// Uses canonical JSON with recursively sorted keys so the hash does not
/// depend on map iteration order.
pub fn compute_fingerprint<T: Serialize>(value: &T) -> Result<String, CheckpointError> {
    let value = serde_json::to_value(value)
        .map_err(|e| CheckpointError::Serialization(e.to_string()))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: std::collections::BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| CheckpointError::Serialization(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Export / Import
// ============================================================================

/// Serialize the state as pretty camelCase JSON plus the rules fingerprint
pub fn export_state(state: &GameState) -> Result<String, CheckpointError> {
    let mut value = serde_json::to_value(state)
        .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.insert(FINGERPRINT_KEY.to_string(), Value::String(rules::rules_fingerprint()?));
    }
    serde_json::to_string_pretty(&value).map_err(|e| CheckpointError::Serialization(e.to_string()))
}

/// Parse and validate an exported state
///
/// Checks, in order: valid JSON, `cards` is a list, `day` is a number, the
/// fingerprint (when present) matches, the document has the state's shape,
/// the day can advance, card ids are unique, effort is within bounds and
/// completion fields appear only on deployed cards. The returned state is
/// marked running with its history truncated to capacity.
pub fn import_state(json: &str) -> Result<GameState, CheckpointError> {
    let mut value: Value =
        serde_json::from_str(json).map_err(|e| CheckpointError::InvalidJson(e.to_string()))?;

    if !value.get("cards").is_some_and(Value::is_array) {
        return Err(CheckpointError::MissingCards);
    }
    if !value.get("day").is_some_and(Value::is_number) {
        return Err(CheckpointError::MissingDay);
    }

    if let Value::Object(map) = &mut value {
        if let Some(found) = map.remove(FINGERPRINT_KEY) {
            let expected = rules::rules_fingerprint()?;
            let found = found.as_str().unwrap_or_default().to_string();
            if found != expected {
                return Err(CheckpointError::RulesMismatch { expected, found });
            }
        }
    }

    let mut state: GameState =
        serde_json::from_value(value).map_err(|e| CheckpointError::Malformed(e.to_string()))?;

    validate_state(&state)?;

    state.history.enforce_capacity();
    state.is_running = true;
    Ok(state)
}

/// Check day headroom and card-level integrity of a state
pub fn validate_state(state: &GameState) -> Result<(), CheckpointError> {
    if state.day.checked_add(1).is_none() {
        return Err(CheckpointError::DayOutOfRange(state.day));
    }

    let mut seen = HashSet::new();
    for card in &state.cards {
        if !seen.insert(card.id()) {
            return Err(CheckpointError::DuplicateCardId(card.id().to_string()));
        }
        if card.effort_done() > card.effort_required() {
            return Err(CheckpointError::EffortOutOfBounds {
                card: card.id().to_string(),
                done: card.effort_done(),
                required: card.effort_required(),
            });
        }
        if let Some(reason) = lifecycle_conflict(card, state.day) {
            return Err(CheckpointError::InconsistentLifecycle {
                card: card.id().to_string(),
                reason,
            });
        }
    }
    Ok(())
}

fn lifecycle_conflict(card: &Card, day: u32) -> Option<&'static str> {
    match (card.is_deployed(), card.completed_day(), card.final_value()) {
        (true, None, _) => Some("is deployed without a completion day"),
        (true, _, None) => Some("is deployed without a final value"),
        (true, Some(completed), Some(_)) if completed > day => {
            Some("completes after the current day")
        }
        (false, Some(_), _) => Some("has a completion day but is not deployed"),
        (false, _, Some(_)) => Some("has a final value but is not deployed"),
        _ => None,
    }
}
