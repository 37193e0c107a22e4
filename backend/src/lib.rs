//! Kanban Simulator Core - Rust Engine
//!
//! Day-by-day simulation of a Kanban board: cards flow through six columns
//! driven by dice-based specialist work, WIP limits, random bugs and
//! absences, deadlines and late penalties.
//!
//! # Architecture
//!
//! - **models**: Domain types (Card, Column, Agent, Allocation, History, State)
//! - **rules**: Fixed rule table, pure formulas and aggregate metrics
//! - **rng**: Injectable random sources (seeded xorshift, scripted)
//! - **events**: Random bug spawns and specialist absences
//! - **work**: Daily work resolution per work column
//! - **transitions**: Validated card moves and deployment
//! - **metrics**: CFD, financial, throughput and lead-time series
//! - **orchestrator**: The game engine and export/import
//!
//! # Critical Invariants
//!
//! 1. Every card keeps `effort_done <= effort_required`
//! 2. All randomness goes through the injected [`RandomSource`]
//! 3. Rule violations are returned as errors, never panics

// Module declarations
pub mod events;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod rules;
pub mod transitions;
pub mod work;

// Re-exports for convenience
pub use events::{EventSummary, RandomEvent};
pub use metrics::{CfdEntry, FinancialEntry, LeadTimeEntry, MetricsSeries, ThroughputEntry};
pub use models::{
    AgentState, AgentType, Card, Category, Column, GameState, HistoryEntry, HistoryKind,
    HistoryLog, Priority, SpecialistAllocation,
};
pub use orchestrator::{
    AddCardError, AllocationError, AllocationSuccess, CheckpointError, DayError, DayResult,
    EngineConfig, GameEngine, NewCard, SpecialistWarning,
};
pub use rng::{RandomSource, RngManager, ScriptedRng};
pub use rules::{GameMetrics, MoveError, RuleTable};
pub use transitions::{Deployment, MoveSuccess};
pub use work::WorkEntry;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn kanban_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyGameEngine>()?;
    Ok(())
}
