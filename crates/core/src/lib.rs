//! Trace-driven cache simulator for learned eviction policies.
//!
//! This crate replays a recorded block-access trace against a fixed-capacity cache and
//! hands every eviction decision to an external agent. It provides:
//! 1. **Trace:** Loading request/operation sequences from CSV logs or in-memory records.
//! 2. **Cache:** Slot occupancy, recency, access/dirty bits, and per-resource frequency.
//! 3. **Simulation:** The reset/step decision-epoch protocol (fast-forward to next miss).
//! 4. **Observation:** Elapsed-window features and the shaped reward signal.
//! 5. **Statistics:** Episode counters and miss-rate reporting.

/// Common types and constants (resource ids, operations, errors, feature windows).
pub mod common;
/// Simulator configuration (defaults, JSON/dict deserialization, validation).
pub mod config;
/// Cache slot array and residency index.
pub mod cache;
/// Decision-epoch stepper, observations, and rewards.
pub mod sim;
/// Episode statistics collection and reporting.
pub mod stats;
/// Trace records, sources, and loader.
pub mod trace;

/// Engine error type returned by every fallible operation.
pub use crate::common::{SimError, TraceError};
/// Root configuration type; deserialize from JSON or build with `SimConfig::new`.
pub use crate::config::SimConfig;
/// Main simulation type; construct with `Simulator::new` and drive with `reset`/`step`.
pub use crate::sim::Simulator;
/// Immutable request/operation sequence consumed by the simulator.
pub use crate::trace::Trace;
