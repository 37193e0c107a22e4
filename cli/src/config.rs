//! Engine configuration loading
//!
//! A JSON config file provides the base `EngineConfig`; command-line flags
//! override individual fields.

use anyhow::{Context, Result};
use kanban_simulator_core_rs::EngineConfig;
use std::path::Path;

pub fn load_engine_config(
    path: Option<&Path>,
    seed: Option<u64>,
    days: Option<u32>,
) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if seed.is_some() {
        config.rng_seed = seed;
    }
    if let Some(days) = days {
        config.horizon_days = days;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = load_engine_config(None, None, None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"rng_seed": 5, "horizon_days": 12}"#).unwrap();

        let config = load_engine_config(Some(&path), Some(9), None).unwrap();
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.horizon_days, 12);
        assert!(config.seed_cards);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_engine_config(Some(&dir.path().join("nope.json")), None, None).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
