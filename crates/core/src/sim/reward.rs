//! Reward shaping.
//!
//! The reward for one `step` covers the interval between the epoch that was just
//! resolved (`last_index`) and the next one (`cursor`). It has two terms:
//! 1. **Hit bonus:** [`HIT_BONUS`] if any hit was absorbed before the next miss.
//! 2. **Look-ahead:** The share of the next [`LOOKAHEAD_WINDOW`] requests, starting at
//!    `last_index`, that target a resource resident after the action, weighted by
//!    [`LOOKAHEAD_WEIGHT`].

use serde::Serialize;

use crate::cache::CacheState;
use crate::common::ResourceId;
use crate::common::constants::{HIT_BONUS, LOOKAHEAD_WEIGHT, LOOKAHEAD_WINDOW};

/// The two reward terms of a resolved epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RewardBreakdown {
    /// Hits absorbed between the two epochs.
    pub hit_count: usize,
    /// Hit bonus term.
    pub base: f64,
    /// Look-ahead term.
    pub lookahead: f64,
}

impl RewardBreakdown {
    /// Scalar reward handed to the agent.
    #[inline]
    pub fn total(&self) -> f64 {
        self.base + self.lookahead
    }
}

/// Computes the reward for the interval `(last_index, cursor)`.
///
/// `last_index` must be a valid trace index and `cursor > last_index`.
pub fn compute(
    requests: &[ResourceId],
    cache: &CacheState,
    last_index: usize,
    cursor: usize,
) -> RewardBreakdown {
    let hit_count = cursor - last_index - 1;
    let base = if hit_count == 0 { 0.0 } else { HIT_BONUS };

    RewardBreakdown {
        hit_count,
        base,
        lookahead: lookahead(requests, cache, last_index),
    }
}

/// Look-ahead term: resident-resource occurrences in the upcoming window, normalized by
/// the window length.
pub fn lookahead(requests: &[ResourceId], cache: &CacheState, start: usize) -> f64 {
    let end = (start + LOOKAHEAD_WINDOW).min(requests.len());
    if start >= end {
        return 0.0;
    }
    let upcoming_hits = requests[start..end]
        .iter()
        .filter(|&&r| cache.contains(r))
        .count();
    LOOKAHEAD_WEIGHT * upcoming_hits as f64 / (end - start) as f64
}
