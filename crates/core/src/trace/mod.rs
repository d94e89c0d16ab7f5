//! Request traces.
//!
//! A trace is the immutable input of a simulation: the resource touched by each request
//! and whether that request read or wrote it. This module provides:
//! 1. **Records:** One decoded row of a request log and the sources that yield them.
//! 2. **Loader:** Concatenation of sources with optional boot-phase filtering.
//! 3. **Trace:** The validated pair of aligned sequences.

/// Concatenation and filtering of trace sources.
pub mod loader;

/// Trace rows, the source trait, and the CSV reader.
pub mod record;

use std::collections::HashSet;

use crate::common::{Operation, ResourceId, SimError, SimResult};

pub use loader::TraceLoader;
pub use record::{CsvTrace, RecordSource, TraceRecord};

/// Aligned request and operation sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    requests: Vec<ResourceId>,
    operations: Vec<Operation>,
}

impl Trace {
    /// Builds a trace for a cache of `cache_size` slots.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if the sequences differ in length or hold no
    /// more requests than the cache has slots.
    pub fn new(
        requests: Vec<ResourceId>,
        operations: Vec<Operation>,
        cache_size: usize,
    ) -> SimResult<Self> {
        if requests.len() <= cache_size {
            return Err(SimError::Configuration(format!(
                "the count of requests ({}) is too small for a cache of {} slots, try a longer trace",
                requests.len(),
                cache_size
            )));
        }
        if requests.len() != operations.len() {
            return Err(SimError::Configuration(format!(
                "not every request is assigned an operation ({} requests, {} operations)",
                requests.len(),
                operations.len()
            )));
        }
        Ok(Self {
            requests,
            operations,
        })
    }

    /// Builds a trace from decoded rows, keeping every row.
    ///
    /// # Errors
    ///
    /// Same as [`Trace::new`].
    pub fn from_records(records: &[TraceRecord], cache_size: usize) -> SimResult<Self> {
        let (requests, operations) = records
            .iter()
            .map(|r| (r.block_sector, r.operation))
            .unzip();
        Self::new(requests, operations, cache_size)
    }

    /// Number of requests (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if the trace holds no requests. Never true for a validated trace.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Resource touched by each request.
    #[inline]
    pub fn requests(&self) -> &[ResourceId] {
        &self.requests
    }

    /// Operation of each request.
    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of distinct resources in the trace.
    pub fn distinct_resources(&self) -> usize {
        self.requests.iter().collect::<HashSet<_>>().len()
    }

    /// Number of write requests.
    pub fn write_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_write()).count()
    }
}
