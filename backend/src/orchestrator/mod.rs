//! Orchestrator - the game engine and its export/import
//!
//! See `engine.rs` for the daily turn and the player operations.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use engine::{
    AddCardError, AllocationError, AllocationSuccess, DayError, DayResult, EngineConfig, GameEngine,
    NewCard, SpecialistWarning,
};

pub use checkpoint::{compute_fingerprint, CheckpointError};
