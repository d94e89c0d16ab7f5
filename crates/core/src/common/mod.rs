//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the trace loader, the cache state
//! and the stepper. It includes:
//! 1. **Resource Types:** Strong types for resource ids and slot occupants.
//! 2. **Constants:** Feature windows and reward shaping parameters.
//! 3. **Operations:** Read/write classification of trace requests.
//! 4. **Error Handling:** Engine and trace loading error types.

/// Feature windows and reward constants.
pub mod constants;

/// Request operation type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Resource id and slot occupant types.
pub mod resource;

pub use constants::{FEATURE_WINDOWS, LOOKAHEAD_WINDOW};
pub use data::Operation;
pub use error::{SimError, SimResult, TraceError};
pub use resource::{Occupant, ResourceId};
