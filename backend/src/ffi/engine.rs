//! PyO3 wrapper for the game engine

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use serde::Serialize;

use crate::models::column::Column;
use crate::orchestrator::{EngineConfig, GameEngine as RustGameEngine, NewCard};

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

fn parse_column(name: &str) -> PyResult<Column> {
    name.parse().map_err(|e: crate::models::ParseNameError| PyValueError::new_err(e.to_string()))
}

/// Python wrapper for the Rust game engine
///
/// # Example (from Python)
///
/// ```python
/// from kanban_simulator_core_rs import GameEngine
///
/// game = GameEngine(seed=12345)
/// game.move_card("C001", "ready")
/// print(game.process_day())
/// ```
#[pyclass(name = "GameEngine")]
pub struct PyGameEngine {
    inner: RustGameEngine,
}

#[pymethods]
impl PyGameEngine {
    /// Create and initialize a game
    #[new]
    #[pyo3(signature = (seed=None, horizon_days=30, seed_cards=true))]
    fn new(seed: Option<u64>, horizon_days: u32, seed_cards: bool) -> Self {
        let config = EngineConfig {
            rng_seed: seed,
            horizon_days,
            seed_cards,
        };
        Self {
            inner: RustGameEngine::start(config),
        }
    }

    fn init(&mut self) {
        self.inner.init();
    }

    fn restart(&mut self) {
        self.inner.restart();
    }

    fn current_day(&self) -> u32 {
        self.inner.current_day()
    }

    /// Process one day; returns the day result as JSON
    ///
    /// Raises RuntimeError when the game is not running.
    fn process_day(&mut self) -> PyResult<String> {
        let result = self
            .inner
            .process_day()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        to_json(&result)
    }

    /// Move a card; raises ValueError with the rejection reason
    fn move_card(&mut self, card_id: &str, to: &str) -> PyResult<String> {
        let to = parse_column(to)?;
        let moved = self
            .inner
            .move_card(card_id, to)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        to_json(&moved)
    }

    fn allocate_specialists(&mut self, card_id: &str, column: &str, count: u8) -> PyResult<String> {
        let column = parse_column(column)?;
        let allocation = self
            .inner
            .allocate_specialists(card_id, column, count)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        to_json(&allocation)
    }

    /// Add a card from a JSON object (`title`, optional `description`,
    /// `priority`, `category`, `effort`, `value`)
    fn add_card(&mut self, card_json: &str) -> PyResult<String> {
        let new_card: NewCard =
            serde_json::from_str(card_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let card = self
            .inner
            .add_card(new_card)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        to_json(&card)
    }

    fn metrics(&self) -> PyResult<String> {
        to_json(&self.inner.metrics())
    }

    fn state(&self) -> PyResult<String> {
        to_json(self.inner.state())
    }

    fn export_state(&self) -> PyResult<String> {
        self.inner
            .export_state()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn import_state(&mut self, json: &str) -> PyResult<()> {
        self.inner
            .import_state(json)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn unallocated_specialist_warnings(&self) -> Vec<String> {
        self.inner
            .unallocated_specialist_warnings()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}
