//! Cache environment Python binding.
//!
//! Exposes the simulator to Python agents as a gym-style environment: build it from one
//! or more trace files, `reset` to get the first observation, then `step` with an action
//! until `has_finished()`.

use std::path::PathBuf;

use cachesim_core::config::SimConfig;
use cachesim_core::Simulator;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::conversion::{index_or_unset, observation_to_dict, py_dict_to_config, sim_err};
use crate::stats::PyStats;

/// Python-exposed environment: wraps one `Simulator`. Instances share nothing.
#[pyclass(name = "CacheEnv")]
#[derive(Debug)]
pub struct PyCacheEnv {
    pub inner: Simulator,
}

/// Accepts either a single path or a sequence of paths.
fn extract_paths(progs: &Bound<'_, PyAny>) -> PyResult<Vec<PathBuf>> {
    if let Ok(single) = progs.extract::<PathBuf>() {
        return Ok(vec![single]);
    }
    progs.extract::<Vec<PathBuf>>()
}

#[pymethods]
impl PyCacheEnv {
    /// Creates an environment over the given trace file(s).
    ///
    /// # Arguments
    /// * `progs` - A CSV trace path or a list of paths, concatenated in order.
    /// * `cache_size` - Number of cache slots.
    /// * `allow_skip` - Whether action 0 means "skip eviction".
    /// * `delay_reward` - Reserved for policy-specific use; no engine effect.
    /// * `boot` - Keep boot-phase rows.
    ///
    /// # Errors
    /// Returns a `ValueError` if a trace cannot be loaded or is too short.
    #[new]
    #[pyo3(signature = (progs, cache_size, allow_skip=true, delay_reward=false, boot=false))]
    fn new(
        progs: &Bound<'_, PyAny>,
        cache_size: usize,
        allow_skip: bool,
        delay_reward: bool,
        boot: bool,
    ) -> PyResult<Self> {
        let paths = extract_paths(progs)?;
        let config = SimConfig::new(cache_size)
            .with_allow_skip(allow_skip)
            .with_delay_reward(delay_reward)
            .with_boot(boot);
        let inner = Simulator::from_paths(config, &paths).map_err(sim_err)?;
        Ok(Self { inner })
    }

    /// Creates an environment from a config dict such as `{"cache_size": 8}`.
    #[staticmethod]
    fn from_config(
        py: Python<'_>,
        progs: &Bound<'_, PyAny>,
        config_dict: &Bound<'_, PyAny>,
    ) -> PyResult<Self> {
        let paths = extract_paths(progs)?;
        let config = py_dict_to_config(py, config_dict)?;
        let inner = Simulator::from_paths(config, &paths).map_err(sim_err)?;
        Ok(Self { inner })
    }

    /// Starts a new episode and returns the observation dict at the first decision epoch.
    fn reset<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let obs = self.inner.reset();
        observation_to_dict(py, &obs)
    }

    /// Applies `action` and runs to the next decision epoch.
    ///
    /// # Returns
    /// `(observation, reward)`.
    ///
    /// # Errors
    /// `RuntimeError` once the episode has finished; `ValueError` for an invalid action.
    fn step<'py>(&mut self, py: Python<'py>, action: i64) -> PyResult<(Bound<'py, PyDict>, f64)> {
        let (obs, reward) = self.inner.step(action).map_err(sim_err)?;
        Ok((observation_to_dict(py, &obs)?, reward))
    }

    /// Reward terms of the last step as a dict (`hit_count`, `base`, `lookahead`), or
    /// `None` right after `reset`.
    fn last_reward<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyDict>>> {
        let Some(r) = self.inner.last_reward() else {
            return Ok(None);
        };
        let d = PyDict::new(py);
        d.set_item("hit_count", r.hit_count)?;
        d.set_item("base", r.base)?;
        d.set_item("lookahead", r.lookahead)?;
        Ok(Some(d))
    }

    /// Whether the trace has been fully replayed.
    fn has_finished(&self) -> bool {
        self.inner.has_finished()
    }

    /// Alias of `has_finished` kept for agents written against the older interface.
    #[pyo3(name = "hasDone")]
    fn has_done(&self) -> bool {
        self.inner.has_finished()
    }

    /// Fraction of processed requests that missed.
    ///
    /// # Errors
    /// `ZeroDivisionError` before any request has been processed.
    fn miss_rate(&self) -> PyResult<f64> {
        self.inner.miss_rate().map_err(sim_err)
    }

    /// Prints the slot occupants.
    fn display(&self) {
        println!("{}", self.inner.display());
    }

    /// Snapshot of the episode counters.
    fn stats(&self) -> PyStats {
        PyStats::from(self.inner.stats().clone())
    }

    #[getter]
    fn n_actions(&self) -> usize {
        self.inner.n_actions()
    }

    #[getter]
    fn n_features(&self) -> usize {
        self.inner.n_features()
    }

    #[getter]
    fn cache_size(&self) -> usize {
        self.inner.config().cache_size
    }

    #[getter]
    fn allow_skip(&self) -> bool {
        self.inner.config().allow_skip
    }

    #[getter]
    fn delay_reward(&self) -> bool {
        self.inner.delay_reward()
    }

    #[getter]
    fn n_requests(&self) -> usize {
        self.inner.trace().len()
    }

    /// Current trace index; `-1` before the first `reset`.
    #[getter]
    fn cur_index(&self) -> i64 {
        index_or_unset(self.inner.cursor())
    }

    #[getter]
    fn total_count(&self) -> u64 {
        self.inner.stats().total_count
    }

    #[getter]
    fn miss_count(&self) -> u64 {
        self.inner.stats().miss_count
    }

    #[getter]
    fn evict_count(&self) -> u64 {
        self.inner.stats().evict_count
    }

    fn __repr__(&self) -> String {
        format!(
            "CacheEnv(cache_size={}, requests={}, cur_index={}, slots={})",
            self.inner.config().cache_size,
            self.inner.trace().len(),
            index_or_unset(self.inner.cursor()),
            self.inner.display()
        )
    }
}
