//! Statistics Python binding.
//!
//! Exposes episode statistics to Python: getters for request, miss, and eviction
//! counts; `print` / `print_sections` for human-readable output; `to_dict` and
//! `to_json` for export.

use cachesim_core::stats::EpisodeStats;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::conversion::sim_err;

/// Python-exposed statistics: wraps `EpisodeStats` for read and print from Python.
#[pyclass(name = "Stats")]
#[derive(Clone, Debug)]
pub struct PyStats {
    pub inner: EpisodeStats,
}

#[pymethods]
impl PyStats {
    /// Print all stats (full dump).
    fn print(&self) {
        self.inner.print();
    }

    /// Print only the given sections. Options: "summary", "cache".
    /// Pass an empty list for full dump.
    fn print_sections(&self, sections: Vec<String>) {
        self.inner.print_sections(&sections);
    }

    #[getter]
    fn total_count(&self) -> u64 {
        self.inner.total_count
    }
    #[getter]
    fn miss_count(&self) -> u64 {
        self.inner.miss_count
    }
    #[getter]
    fn hit_count(&self) -> u64 {
        self.inner.hit_count()
    }
    #[getter]
    fn evict_count(&self) -> u64 {
        self.inner.evict_count
    }
    #[getter]
    fn epochs(&self) -> u64 {
        self.inner.epochs
    }

    /// Fraction of processed requests that missed; raises `ZeroDivisionError` when empty.
    fn miss_rate(&self) -> PyResult<f64> {
        self.inner.miss_rate().map_err(sim_err)
    }

    /// Fraction of processed requests that hit; raises `ZeroDivisionError` when empty.
    fn hit_rate(&self) -> PyResult<f64> {
        self.inner.hit_rate().map_err(sim_err)
    }

    /// Export all stats as a Python dict (JSON-serializable) for experiment logs.
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let d = PyDict::new(py);
        let s = &self.inner;
        d.set_item("total_count", s.total_count)?;
        d.set_item("miss_count", s.miss_count)?;
        d.set_item("hit_count", s.hit_count())?;
        d.set_item("evict_count", s.evict_count)?;
        d.set_item("epochs", s.epochs)?;
        d.set_item("miss_rate", s.miss_rate().ok())?;
        Ok(d)
    }

    /// Export the raw counters as a JSON string.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Stats(total={}, misses={}, evictions={})",
            self.inner.total_count, self.inner.miss_count, self.inner.evict_count
        )
    }
}

impl From<EpisodeStats> for PyStats {
    fn from(inner: EpisodeStats) -> Self {
        Self { inner }
    }
}
