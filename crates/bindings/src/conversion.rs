//! Python↔Rust conversions.
//!
//! Converts Python dicts into the core `SimConfig` via JSON serialization, observations
//! into the dict layout agents expect, and engine errors into Python exceptions.

use cachesim_core::common::constants::UNSET;
use cachesim_core::config::SimConfig;
use cachesim_core::sim::Observation;
use cachesim_core::SimError;
use pyo3::exceptions::{PyRuntimeError, PyValueError, PyZeroDivisionError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Converts a Python dict to a simulator `SimConfig`.
///
/// The dict is serialized to JSON and then deserialized into `SimConfig`. Keys must match
/// the Rust config structure (`cache_size`, `allow_skip`, `delay_reward`, `boot`).
///
/// # Arguments
///
/// * `py` - Python interpreter handle.
/// * `dict` - A Python dict such as `{"cache_size": 8, "allow_skip": False}`.
///
/// # Returns
///
/// The deserialized `SimConfig`, or a `ValueError` if the dict is invalid.
pub fn py_dict_to_config(py: Python<'_>, dict: &Bound<'_, PyAny>) -> PyResult<SimConfig> {
    let json = py.import("json")?;
    let dumps = json.getattr("dumps")?;
    let json_str_obj = dumps.call1((dict,))?;
    let json_str: String = json_str_obj.extract()?;

    SimConfig::from_json(&json_str).map_err(sim_err)
}

/// Maps an engine error onto the matching Python exception type.
#[allow(clippy::needless_pass_by_value)]
pub fn sim_err(err: SimError) -> PyErr {
    match err {
        SimError::InvalidState(_) => PyRuntimeError::new_err(err.to_string()),
        SimError::NoData => PyZeroDivisionError::new_err(err.to_string()),
        SimError::Configuration(_) | SimError::InvalidAction { .. } | SimError::Trace(_) => {
            PyValueError::new_err(err.to_string())
        }
    }
}

/// Flattens an optional trace index, using `-1` for unset.
pub fn index_or_unset(index: Option<usize>) -> i64 {
    index.map_or(UNSET, |i| i as i64)
}

/// Builds the observation dict handed to Python agents.
///
/// Keys: `features`, `cache_state`, `cached_times`, `last_used_times`, `access_bits`,
/// `dirty_bits`. Empty slots and unset indices are reported as `-1`.
pub fn observation_to_dict<'py>(
    py: Python<'py>,
    obs: &Observation,
) -> PyResult<Bound<'py, PyDict>> {
    let d = PyDict::new(py);
    d.set_item("features", obs.features.clone())?;
    d.set_item(
        "cache_state",
        obs.cache_state.iter().map(|o| o.to_raw()).collect::<Vec<_>>(),
    )?;
    d.set_item(
        "cached_times",
        obs.cached_times
            .iter()
            .map(|&i| index_or_unset(i))
            .collect::<Vec<_>>(),
    )?;
    d.set_item(
        "last_used_times",
        obs.last_used_times
            .iter()
            .map(|&i| index_or_unset(i))
            .collect::<Vec<_>>(),
    )?;
    d.set_item("access_bits", obs.access_bits.clone())?;
    d.set_item("dirty_bits", obs.dirty_bits.clone())?;
    Ok(d)
}
