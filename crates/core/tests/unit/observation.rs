//! Observation and feature-vector tests.

use cachesim_core::common::{FEATURE_WINDOWS, Occupant, ResourceId};
use cachesim_core::sim::observation::{elapsed_requests, features};
use cachesim_core::cache::CacheState;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{res, sim};

fn ids(raw: &[u64]) -> Vec<ResourceId> {
    raw.iter().copied().map(ResourceId).collect()
}

#[rstest]
#[case::start_of_trace(0, 10, 1)]
#[case::short_window_misses(3, 1, 0)]
#[case::window_covers_prefix(4, 10, 3)]
#[case::window_clipped_at_end(9, 10, 3)]
fn elapsed_counts_target(#[case] cursor: usize, #[case] window: usize, #[case] expected: u32) {
    let requests = ids(&[1, 2, 1, 3, 1]);
    assert_eq!(elapsed_requests(&requests, cursor, window, res(1)), expected);
}

#[test]
fn feature_length_and_order() {
    let requests = ids(&[1, 2, 3, 1, 2, 4, 1]);
    let mut cache = CacheState::new(2);
    let _ = cache.install(0, ResourceId(3), 2);
    let _ = cache.install(1, ResourceId(2), 1);

    let f = features(&requests, &cache, 3, res(1));
    assert_eq!(f.len(), FEATURE_WINDOWS.len() * 3);
    // pending 1, then slot 0 (3), then slot 1 (2); windows (10, 100) each.
    assert_eq!(f, vec![2, 2, 1, 1, 1, 1]);
}

#[test]
fn empty_slots_and_pending_count_zero() {
    let requests = ids(&[1, 1, 1, 2]);
    let cache = CacheState::new(2);
    let f = features(&requests, &cache, 2, Occupant::Empty);
    assert_eq!(f, vec![0; 6]);
}

#[test]
fn short_window_excludes_old_requests() {
    // Twelve requests; resource 9 only appears at index 0, outside the 10-window at 11.
    let mut raw = vec![9];
    raw.extend(std::iter::repeat_n(5, 11));
    let requests = ids(&raw);
    let mut cache = CacheState::new(1);
    let _ = cache.install(0, ResourceId(9), 0);

    let f = features(&requests, &cache, 11, res(5));
    assert_eq!(f, vec![10, 11, 0, 1]);
}

#[test]
fn observation_after_reset() {
    let mut s = sim(&[1, 2, 3, 1, 2, 4, 1], 2, false);
    let obs = s.reset();
    assert_eq!(obs.features, vec![1, 1, 1, 1, 1, 1]);
    assert_eq!(obs.features.len(), s.n_features());
}

#[test]
fn observation_at_end_of_trace() {
    let mut s = sim(&[1, 2, 3, 1, 2, 4, 1], 2, false);
    let _ = s.reset();
    for action in [0, 1, 1, 0, 0] {
        let _ = s.step(action).unwrap();
    }
    let obs = s.observation();
    // Cursor 7 is past the end: pending is empty and the windows clip to [0, 7).
    assert_eq!(obs.features, vec![0, 0, 3, 3, 2, 2]);
    assert_eq!(obs.cache_state, vec![res(1), res(2)]);
}

#[test]
fn observation_serializes_empty_as_null() {
    let mut s = sim(&[1, 1, 1, 2, 2], 3, true);
    let obs = s.reset();
    let json = serde_json::to_value(&obs).unwrap();
    assert_eq!(json["cache_state"][2], serde_json::Value::Null);
    assert_eq!(json["cached_times"][2], serde_json::Value::Null);
}
