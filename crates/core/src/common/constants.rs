//! Global Simulator Constants.
//!
//! This module defines the constants that shape what the agent sees. It includes:
//! 1. **Feature Windows:** Elapsed-request horizons used to build the feature vector.
//! 2. **Reward Shaping:** Hit bonus, look-ahead horizon, and look-ahead weight.

/// Elapsed-request horizons (short, middle) counted for every feature.
///
/// A long horizon was considered for this list but is not part of the feature set.
pub const FEATURE_WINDOWS: [usize; 2] = [10, 100];

/// Reward granted when at least one hit was absorbed between two decision epochs.
pub const HIT_BONUS: f64 = 1.0;

/// Number of upcoming requests scanned by the look-ahead reward term.
pub const LOOKAHEAD_WINDOW: usize = 100;

/// Weight applied to the normalized look-ahead hit count.
pub const LOOKAHEAD_WEIGHT: f64 = 0.5;

/// Value reported across the Python boundary for empty slots and unset indices.
pub const UNSET: i64 = -1;
