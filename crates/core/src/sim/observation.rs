//! Agent observations.
//!
//! An observation is what the agent sees at a decision epoch: a feature vector of
//! elapsed-window request counts plus a copy of the cache bookkeeping. Everything is
//! owned, so the agent cannot reach engine state through it.

use serde::Serialize;

use crate::cache::CacheState;
use crate::common::{FEATURE_WINDOWS, Occupant, ResourceId};

/// Snapshot handed to the agent by `reset` and `step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// `[pending windows..., slot 0 windows..., slot 1 windows..., ...]`, one count per
    /// entry of [`FEATURE_WINDOWS`].
    pub features: Vec<u32>,
    /// Occupant of each slot.
    pub cache_state: Vec<Occupant>,
    /// Install index of each slot.
    pub cached_times: Vec<Option<usize>>,
    /// Last access index of each slot.
    pub last_used_times: Vec<Option<usize>>,
    /// Access bit of each slot.
    pub access_bits: Vec<bool>,
    /// Dirty bit of each slot.
    pub dirty_bits: Vec<bool>,
}

impl Observation {
    /// Captures the cache at `cursor`, with `pending` as the request awaiting a decision.
    pub fn capture(
        requests: &[ResourceId],
        cache: &CacheState,
        cursor: usize,
        pending: Occupant,
    ) -> Self {
        let slots = cache.slots();
        Self {
            features: features(requests, cache, cursor, pending),
            cache_state: slots.iter().map(|s| s.occupant).collect(),
            cached_times: slots.iter().map(|s| s.cached_since).collect(),
            last_used_times: slots.iter().map(|s| s.last_used).collect(),
            access_bits: slots.iter().map(|s| s.accessed).collect(),
            dirty_bits: slots.iter().map(|s| s.dirty).collect(),
        }
    }
}

/// Builds the feature vector for `pending` followed by every slot occupant.
pub fn features(
    requests: &[ResourceId],
    cache: &CacheState,
    cursor: usize,
    pending: Occupant,
) -> Vec<u32> {
    std::iter::once(pending)
        .chain(cache.occupants())
        .flat_map(|target| {
            FEATURE_WINDOWS
                .iter()
                .map(move |&window| elapsed_requests(requests, cursor, window, target))
        })
        .collect()
}

/// Occurrences of `target` among the last `window` requests ending at `cursor`
/// (inclusive).
///
/// The window is clipped to the start and the end of the trace. `Occupant::Empty`
/// never matches.
pub fn elapsed_requests(
    requests: &[ResourceId],
    cursor: usize,
    window: usize,
    target: Occupant,
) -> u32 {
    let Some(target) = target.resource() else {
        return 0;
    };
    let end = (cursor + 1).min(requests.len());
    let start = (cursor + 1).saturating_sub(window).min(end);
    requests[start..end].iter().filter(|&&r| r == target).count() as u32
}
