//! Python bindings for the cache simulator.
//!
//! This crate exposes the simulator to Python via PyO3. It provides:
//! 1. **Environment:** `CacheEnv` with `reset`/`step` for eviction agents.
//! 2. **Statistics:** `Stats` for episode counters and selective section printing.
//! 3. **Utilities:** Version string, log setup, and conversion helpers for Python↔Rust types.

use pyo3::prelude::*;

/// Python dict to Rust `SimConfig` conversion, observation dicts, and error mapping.
pub mod conversion;
/// Environment binding (`CacheEnv`).
pub mod env;
/// Statistics binding (`Stats`).
pub mod stats;
/// Utility functions (version, logging).
pub mod utils;

/// Registers all simulator classes and functions onto the given Python module.
///
/// Called from the `#[pymodule]` entry point to expose `CacheEnv`, `Stats`, `version`,
/// and `init_logging`.
///
/// # Arguments
///
/// * `m` - The Python module to register types and functions on.
///
/// # Returns
///
/// `Ok(())` on success, or a `PyErr` if registration fails.
pub fn register_simulator_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<env::PyCacheEnv>()?;
    m.add_class::<stats::PyStats>()?;

    m.add_function(wrap_pyfunction!(utils::version, m)?)?;
    m.add_function(wrap_pyfunction!(utils::init_logging, m)?)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_simulator_module(m)?;
    Ok(())
}
