use anyhow::{Context, Result};
use kanban_simulator_core_rs::{EngineConfig, GameEngine};
use std::path::Path;

use super::{play_session, SessionOptions};

/// Load a saved game and keep playing
///
/// Without `days`, play continues until the configured horizon.
pub fn handle_resume(
    config: EngineConfig,
    state: &Path,
    days: Option<u32>,
    json: bool,
    export: Option<&Path>,
) -> Result<()> {
    let saved = std::fs::read_to_string(state)
        .with_context(|| format!("Failed to read saved game {}", state.display()))?;

    let horizon = config.horizon_days;
    let mut engine = GameEngine::new(config);
    engine
        .import_state(&saved)
        .with_context(|| format!("Failed to load saved game {}", state.display()))?;

    let days = days.unwrap_or_else(|| horizon.saturating_sub(engine.current_day()));
    tracing::info!(day = engine.current_day(), days, "resuming game");

    play_session(&mut engine, SessionOptions { days, json, export })?;
    Ok(())
}
