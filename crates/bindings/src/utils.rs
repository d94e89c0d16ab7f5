//! Utility functions exposed to Python.
//!
//! Provides the version string and log setup for the `cachesim` module.

use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable read by [`init_logging`] when no filter is given.
const LOG_ENV: &str = "CACHESIM_LOG";

/// Returns the simulator version string (e.g., for experiment metadata).
///
/// # Returns
///
/// The crate version, such as `"0.3.0"`.
#[pyfunction]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Installs a `tracing` subscriber that writes engine logs to stderr.
///
/// # Arguments
///
/// * `filter` - An `EnvFilter` directive such as `"cachesim_core=debug"`. When omitted,
///   the `CACHESIM_LOG` environment variable is used, falling back to `"warn"`.
///
/// # Returns
///
/// `True` if the subscriber was installed, `False` if one was already active.
#[pyfunction]
#[pyo3(signature = (filter=None))]
pub fn init_logging(filter: Option<String>) -> PyResult<bool> {
    let filter = match filter {
        Some(directive) => EnvFilter::try_new(directive),
        None => EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new("warn")),
    }
    .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok())
}
