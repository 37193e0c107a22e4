//! Domain models for the Kanban simulator

pub mod agent;
pub mod allocation;
pub mod card;
pub mod column;
pub mod history;
pub mod state;

// Re-exports
pub use agent::AgentState;
pub use allocation::SpecialistAllocation;
pub use card::{Card, Category, Priority};
pub use column::{AgentType, Column, ParseNameError};
pub use history::{HistoryEntry, HistoryKind, HistoryLog, HISTORY_CAPACITY};
pub use state::GameState;
