use anyhow::Result;
use kanban_simulator_core_rs::{EngineConfig, GameEngine};
use std::path::Path;

use super::{play_session, SessionOptions};

/// Start a new game and autoplay it to the horizon
pub fn handle_run(config: EngineConfig, json: bool, export: Option<&Path>) -> Result<()> {
    let days = config.horizon_days;
    tracing::info!(seed = ?config.rng_seed, days, "starting run");

    let mut engine = GameEngine::start(config);
    play_session(&mut engine, SessionOptions { days, json, export })?;
    Ok(())
}
