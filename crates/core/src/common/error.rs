//! Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Engine Errors:** Configuration, state, and action violations raised by the stepper.
//! 2. **Trace Errors:** I/O and parsing failures raised while loading request logs.
//!
//! Every error is synchronous and fail-fast; nothing here is retryable.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the simulation engine.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid construction parameters or a trace that cannot drive an episode.
    ///
    /// Raised when the trace is not longer than the cache, when the request and
    /// operation sequences disagree in length, or when the cache size is zero.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// `step` was called while no episode is running.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The action is outside the legal range for the current skip mode.
    #[error("invalid action {action} taken (expected 0..={max})")]
    InvalidAction {
        /// Action as supplied by the agent.
        action: i64,
        /// Largest legal action.
        max: usize,
    },

    /// A rate was requested before any request was processed.
    #[error("no requests have been processed yet")]
    NoData,

    /// The trace could not be loaded.
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Errors raised while reading trace sources.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The source file could not be read.
    #[error("could not read trace '{}': {source}", path.display())]
    Io {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The header row does not name a required column.
    #[error("trace '{}' has no '{column}' column", path.display())]
    MissingColumn {
        /// Path of the trace file.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },

    /// A field could not be decoded.
    #[error("trace '{}' line {line}: invalid {column} value '{value}'", path.display())]
    Parse {
        /// Path of the trace file.
        path: PathBuf,
        /// 1-based line number, header included.
        line: usize,
        /// Column being decoded.
        column: &'static str,
        /// Raw field text.
        value: String,
    },
}

/// Convenience alias for engine results.
pub type SimResult<T> = Result<T, SimError>;
