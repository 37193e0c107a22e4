//! Python bindings (feature `pyo3`)
//!
//! Results cross the boundary as JSON strings in the same camelCase shapes
//! the engine serializes.

pub mod engine;
