//! Simulation driver.
//!
//! Owns the decision-epoch protocol and the signals derived at each epoch:
//! 1. **Simulator:** `reset`/`step` state machine that fast-forwards to the next miss.
//! 2. **Observation:** Elapsed-window features and cache snapshots.
//! 3. **Reward:** Hit bonus plus look-ahead residency term.

/// Observation snapshots and feature vectors.
pub mod observation;

/// Reward computation.
pub mod reward;

/// Decision-epoch stepper.
pub mod simulator;

pub use observation::Observation;
pub use reward::RewardBreakdown;
pub use simulator::{Phase, Simulator};
