//! Random event generation
//!
//! Two independent draws per day, evaluated once each and in this order:
//! 1. Bug spawn with probability `BUG_CHANCE_PER_DAY`
//! 2. Absence with probability `ABSENCE_CHANCE_PER_DAY`, picking one
//!    currently available agent (no event when everyone is already absent)
//!
//! Generation only reads the state; the caller applies the returned events.

use crate::events::types::RandomEvent;
use crate::models::card::{Card, Category};
use crate::models::state::GameState;
use crate::rng::RandomSource;
use crate::rules::{
    ABSENCE_CHANCE_PER_DAY, ABSENCE_DURATION_MAX, ABSENCE_DURATION_MIN, ABSENCE_REASONS,
    BUG_CHANCE_PER_DAY, BUG_EFFORT_RANGE, BUG_TITLES, BUG_VALUE_RANGE,
};

/// Draw today's random events
pub fn generate_random_events(state: &GameState, rng: &mut dyn RandomSource) -> Vec<RandomEvent> {
    let mut events = Vec::new();

    if rng.chance(BUG_CHANCE_PER_DAY) {
        let card = create_bug_card(state, rng);
        events.push(RandomEvent::BugSpawned { card });
    }

    if rng.chance(ABSENCE_CHANCE_PER_DAY) {
        let available = state.available_agents();
        if !available.is_empty() {
            let agent = available[rng.pick_index(available.len())];
            let days = rng.range(
                i64::from(ABSENCE_DURATION_MIN),
                i64::from(ABSENCE_DURATION_MAX) + 1,
            ) as u32;
            let reason = ABSENCE_REASONS[rng.pick_index(ABSENCE_REASONS.len())].to_string();
            events.push(RandomEvent::SpecialistAbsent {
                agent,
                days,
                reason,
            });
        }
    }

    events
}

/// Build a bug card for the current day
///
/// Title from the bug pool, value and effort from their ranges, id
/// `bug-<12 hex>` taken from a v4-layout uuid built from the source's bytes.
pub fn create_bug_card(state: &GameState, rng: &mut dyn RandomSource) -> Card {
    let title = BUG_TITLES[rng.pick_index(BUG_TITLES.len())];
    let value = rng.range(BUG_VALUE_RANGE.0, BUG_VALUE_RANGE.1 + 1);
    let effort = rng.range(
        i64::from(BUG_EFFORT_RANGE.0),
        i64::from(BUG_EFFORT_RANGE.1) + 1,
    ) as u32;

    let id = loop {
        let candidate = bug_id(rng);
        if !state.has_card(&candidate) {
            break candidate;
        }
    };

    Card::new(id, title.to_string(), effort, value, state.day)
        .with_category(Category::Bug)
        .with_bug(true)
}

fn bug_id(rng: &mut dyn RandomSource) -> String {
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&rng.next_u64().to_le_bytes());
    bytes[8..].copy_from_slice(&rng.next_u64().to_le_bytes());
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    let simple = uuid.simple().to_string();
    format!("bug-{}", &simple[..12])
}
