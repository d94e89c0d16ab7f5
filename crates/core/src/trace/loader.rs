//! Trace Loader.
//!
//! This module turns one or more request logs into a [`Trace`]. It performs:
//! 1. **Reading:** Every source is decoded into rows, in the order given.
//! 2. **Filtering:** Boot-phase rows are dropped unless boot mode is enabled.
//! 3. **Validation:** The concatenated sequences must be aligned and longer than the cache.

use std::path::Path;

use tracing::{debug, info};

use super::record::{CsvTrace, RecordSource, TraceRecord};
use super::Trace;
use crate::common::SimResult;
use crate::config::SimConfig;

/// Builds traces from record sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceLoader {
    boot: bool,
}

impl TraceLoader {
    /// Creates a loader. With `boot == false` only exec-phase rows are kept.
    pub const fn new(boot: bool) -> Self {
        Self { boot }
    }

    /// Creates a loader matching the boot flag of `config`.
    pub const fn from_config(config: &SimConfig) -> Self {
        Self::new(config.boot)
    }

    /// Concatenates `sources` in order and validates the result for `cache_size` slots.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::Trace`] if a source fails to load and
    /// [`crate::SimError::Configuration`] if the result is too short.
    pub fn load<S>(&self, sources: &[S], cache_size: usize) -> SimResult<Trace>
    where
        S: RecordSource,
    {
        let mut kept: Vec<TraceRecord> = Vec::new();
        let mut dropped = 0usize;
        for source in sources {
            let records = source.records()?;
            let before = kept.len();
            for record in records {
                if self.boot || record.exec {
                    kept.push(record);
                } else {
                    dropped += 1;
                }
            }
            debug!(
                source = %source.name(),
                rows = kept.len() - before,
                "trace source loaded"
            );
        }

        let trace = Trace::from_records(&kept, cache_size)?;
        info!(
            sources = sources.len(),
            requests = trace.len(),
            dropped_boot_rows = dropped,
            distinct = trace.distinct_resources(),
            writes = trace.write_count(),
            "trace loaded"
        );
        Ok(trace)
    }

    /// Loads a single source.
    ///
    /// # Errors
    ///
    /// Same as [`TraceLoader::load`].
    pub fn load_one<S>(&self, source: &S, cache_size: usize) -> SimResult<Trace>
    where
        S: RecordSource,
    {
        self.load(std::slice::from_ref(source), cache_size)
    }

    /// Loads CSV files from disk, concatenated in the order given.
    ///
    /// # Errors
    ///
    /// Same as [`TraceLoader::load`].
    pub fn load_paths<P>(&self, paths: &[P], cache_size: usize) -> SimResult<Trace>
    where
        P: AsRef<Path>,
    {
        let sources: Vec<CsvTrace> = paths
            .iter()
            .map(|p| CsvTrace::new(p.as_ref()))
            .collect();
        self.load(&sources, cache_size)
    }
}
