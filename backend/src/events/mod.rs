//! Random events
//!
//! Each processed day may spawn a bug card and may send one available
//! specialist on leave. Events are generated from the state, then applied
//! to it immediately.

pub mod generator;
pub mod types;

pub use generator::{create_bug_card, generate_random_events};
pub use types::{EventSummary, RandomEvent};
