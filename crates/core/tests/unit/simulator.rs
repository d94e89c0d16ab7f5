//! # Simulator Tests
//!
//! Verifies the decision-epoch protocol: initial fill, fast-forward to the next miss,
//! eviction and skip actions, the lifecycle state machine, and error handling.
//!
//! Resource ids are small integers; `A = 1`, `B = 2`, `C = 3`, `D = 4` in the
//! scenario comments.

use cachesim_core::common::{Occupant, ResourceId};
use cachesim_core::config::SimConfig;
use cachesim_core::sim::Phase;
use cachesim_core::{SimError, Simulator};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{init_tracing, ops, res, sim};

/// `[A, B, C, A, B, D, A]`
const ABCABDA: [u64; 7] = [1, 2, 3, 1, 2, 4, 1];

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

// ──────────────────────────────────────────────────────────
// 1. Reset
// ──────────────────────────────────────────────────────────

#[test]
fn reset_fills_then_stops_at_first_miss() {
    init_tracing();
    let mut s = sim(&ABCABDA, 2, false);
    let obs = s.reset();

    assert_eq!(obs.cache_state, vec![res(1), res(2)]);
    assert_eq!(obs.cached_times, vec![Some(0), Some(1)]);
    assert_eq!(obs.last_used_times, vec![Some(0), Some(1)]);
    assert_eq!(obs.access_bits, vec![true, true]);
    assert_eq!(obs.dirty_bits, vec![false, false]);
    assert_eq!(s.cursor(), Some(2));
    assert_eq!(s.pending(), res(3));
    assert_eq!(s.phase(), Phase::Running);
    assert_eq!(s.stats().total_count, 3);
    assert_eq!(s.stats().miss_count, 3);
}

#[test]
fn reset_skips_duplicates_while_filling() {
    // 5 fills slot 0, the repeated 5 only counts as a request, 6 fills slot 1.
    let mut s = sim(&[5, 5, 6, 7, 5], 2, true);
    let obs = s.reset();

    assert_eq!(obs.cache_state, vec![res(5), res(6)]);
    assert_eq!(obs.last_used_times, vec![Some(0), Some(2)]);
    assert_eq!(s.cursor(), Some(3));
    assert_eq!(s.stats().total_count, 4);
    assert_eq!(s.stats().miss_count, 3);
}

#[test]
fn reset_does_not_count_fill_frequency() {
    let mut s = sim(&[1, 2, 1, 2, 3, 1, 1, 2], 2, true);
    let _ = s.reset();
    assert_eq!(s.cache().frequency(ResourceId(1)), 1);
    assert_eq!(s.cache().frequency(ResourceId(2)), 1);
    assert_eq!(s.cache().frequency(ResourceId(3)), 1);
}

#[test]
fn reset_with_few_distinct_resources_finishes_immediately() {
    let mut s = sim(&[1, 1, 1, 2, 2], 3, true);
    let obs = s.reset();

    assert!(s.has_finished());
    assert_eq!(obs.cache_state, vec![res(1), res(2), Occupant::Empty]);
    assert_eq!(obs.cached_times[2], None);
    assert_eq!(s.pending(), Occupant::Empty);
    assert_eq!(s.cache().resident_count(), 2);
}

#[test]
fn reset_starts_a_fresh_episode() {
    let mut s = sim(&ABCABDA, 2, false);
    let first = s.reset();
    let _ = s.step(0).unwrap();
    let _ = s.step(1).unwrap();
    let again = s.reset();

    assert_eq!(first, again);
    assert_eq!(s.stats().evict_count, 0);
    assert_eq!(s.stats().epochs, 0);
    assert_eq!(s.last_reward(), None);
    assert_eq!(s.cache().frequency(ResourceId(1)), 0);
}

// ──────────────────────────────────────────────────────────
// 2. Stepping
// ──────────────────────────────────────────────────────────

#[test]
fn evicting_slot_zero_without_skip() {
    let mut s = sim(&ABCABDA, 2, false);
    let _ = s.reset();
    let (obs, reward) = s.step(0).unwrap();

    assert_eq!(obs.cache_state, vec![res(3), res(2)]);
    assert_eq!(obs.cached_times, vec![Some(2), Some(1)]);
    assert_eq!(obs.last_used_times, vec![Some(2), Some(1)]);
    assert_eq!(s.cursor(), Some(3));
    assert_eq!(s.pending(), res(1));

    let r = s.last_reward().unwrap();
    assert_eq!(r.hit_count, 0);
    assert!(approx(r.base, 0.0));
    // Look-ahead [2, 7): C A B D A with C, B resident -> 2 / 5.
    assert!(approx(reward, 0.5 * 2.0 / 5.0));
    assert_eq!(s.stats().evict_count, 1);
}

#[test]
fn full_episode_without_skip() {
    let mut s = sim(&ABCABDA, 2, false);
    let _ = s.reset();

    let expected = [
        (0, vec![res(3), res(2)], 3, 0.2),
        (1, vec![res(3), res(1)], 4, 0.25),
        (1, vec![res(3), res(2)], 5, 0.5 / 3.0),
        (0, vec![res(4), res(2)], 6, 0.25),
        (0, vec![res(1), res(2)], 7, 0.5),
    ];
    for (action, cache_state, cursor, reward) in expected {
        let (obs, r) = s.step(action).unwrap();
        assert_eq!(obs.cache_state, cache_state);
        assert_eq!(s.cursor(), Some(cursor));
        assert!(approx(r, reward), "action {action}: {r} != {reward}");
    }

    assert!(s.has_finished());
    assert_eq!(s.phase(), Phase::Done);
    assert_eq!(s.pending(), Occupant::Empty);
    assert_eq!(s.stats().total_count, 7);
    assert_eq!(s.stats().miss_count, 7);
    assert_eq!(s.stats().evict_count, 5);
    assert_eq!(s.stats().epochs, 5);
    assert!(approx(s.miss_rate().unwrap(), 1.0));
}

#[test]
fn skip_absorbs_hits_until_end() {
    let mut s = sim(&[1, 2, 1, 2, 3, 1, 1, 2], 2, true);
    let _ = s.reset();
    assert!(approx(s.miss_rate().unwrap(), 0.6));

    let (obs, reward) = s.step(0).unwrap();
    assert!(s.has_finished());
    assert_eq!(obs.cache_state, vec![res(1), res(2)]);
    assert_eq!(obs.last_used_times, vec![Some(6), Some(7)]);

    let r = s.last_reward().unwrap();
    assert_eq!(r.hit_count, 3);
    assert!(approx(r.base, 1.0));
    // Look-ahead [4, 8): 3 1 1 2 with 1, 2 resident -> 3 / 4.
    assert!(approx(r.lookahead, 0.375));
    assert!(approx(reward, 1.375));
    assert_eq!(s.stats().evict_count, 0);
    assert_eq!(s.cache().frequency(ResourceId(1)), 3);
    assert_eq!(s.cache().frequency(ResourceId(2)), 2);
}

#[test]
fn skip_mode_offsets_slot_index() {
    let mut s = sim(&[1, 2, 1, 2, 3, 1, 1, 2], 2, true);
    let _ = s.reset();
    let (obs, reward) = s.step(1).unwrap();

    assert_eq!(obs.cache_state, vec![res(3), res(2)]);
    assert_eq!(s.cursor(), Some(5));
    assert!(approx(reward, 0.25));
}

#[test]
fn write_sets_dirty_and_install_keeps_it() {
    let records = ops(&[
        (1, true),
        (2, false),
        (1, false),
        (3, false),
        (2, true),
        (4, false),
    ]);
    let mut s = crate::common::sim_from(records, 2, true);
    let obs = s.reset();
    assert_eq!(obs.dirty_bits, vec![true, false]);

    let (obs, _) = s.step(0).unwrap();
    assert_eq!(obs.dirty_bits, vec![true, true]);
    assert_eq!(s.cursor(), Some(5));

    // Replacing the dirty occupant of slot 1 with a read leaves the bit set.
    let (obs, _) = s.step(2).unwrap();
    assert_eq!(obs.cache_state, vec![res(1), res(4)]);
    assert_eq!(obs.dirty_bits, vec![true, true]);
    assert!(s.has_finished());
}

#[test]
fn observation_is_a_copy() {
    let mut s = sim(&ABCABDA, 2, false);
    let mut obs = s.reset();
    obs.cache_state[0] = Occupant::Empty;
    obs.dirty_bits[1] = true;

    assert_eq!(s.observation().cache_state, vec![res(1), res(2)]);
    assert_eq!(s.observation().dirty_bits, vec![false, false]);
}

// ──────────────────────────────────────────────────────────
// 3. Errors
// ──────────────────────────────────────────────────────────

#[test]
fn step_before_reset_is_invalid_state() {
    let mut s = sim(&ABCABDA, 2, false);
    assert_eq!(s.cursor(), None);
    assert_eq!(s.phase(), Phase::Uninitialized);
    assert!(matches!(s.step(0), Err(SimError::InvalidState(_))));
}

#[test]
fn step_after_finish_is_invalid_state() {
    let mut s = sim(&[1, 2, 1, 2, 3, 1, 1, 2], 2, true);
    let _ = s.reset();
    let _ = s.step(0).unwrap();
    let err = s.step(0).unwrap_err();
    assert!(matches!(err, SimError::InvalidState(_)));
    assert!(err.to_string().contains("reset()"));

    // reset makes the simulator usable again.
    let _ = s.reset();
    assert!(s.step(0).is_ok());
}

#[rstest]
#[case::skip_above_range(true, 3)]
#[case::skip_negative(true, -1)]
#[case::no_skip_above_range(false, 2)]
#[case::no_skip_negative(false, -1)]
fn out_of_range_action_rejected_without_mutation(#[case] allow_skip: bool, #[case] action: i64) {
    let mut s = sim(&ABCABDA, 2, allow_skip);
    let before = s.reset();
    let total = s.stats().total_count;

    let err = s.step(action).unwrap_err();
    assert!(matches!(err, SimError::InvalidAction { action: a, .. } if a == action));
    assert_eq!(s.observation(), before);
    assert_eq!(s.stats().total_count, total);
    assert_eq!(s.stats().evict_count, 0);
    assert_eq!(s.cursor(), Some(2));
}

#[rstest]
#[case(true, 0, None)]
#[case(true, 1, Some(0))]
#[case(true, 2, Some(1))]
#[case(false, 0, Some(0))]
#[case(false, 1, Some(1))]
fn decode_action(#[case] allow_skip: bool, #[case] action: i64, #[case] slot: Option<usize>) {
    let s = sim(&ABCABDA, 2, allow_skip);
    assert_eq!(s.decode_action(action).unwrap(), slot);
}

#[test]
fn miss_rate_before_reset_is_no_data() {
    let s = sim(&ABCABDA, 2, true);
    assert!(matches!(s.miss_rate(), Err(SimError::NoData)));
}

#[test]
fn zero_cache_size_rejected() {
    let err = Simulator::from_sources(SimConfig::new(0), &[crate::common::reads(&[1, 2])])
        .unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)));
}

#[test]
fn trace_built_for_smaller_cache_rejected() {
    let trace =
        cachesim_core::Trace::from_records(&crate::common::reads(&[1, 2, 3]), 1).unwrap();
    let err = Simulator::new(SimConfig::new(3), trace).unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)));
}

// ──────────────────────────────────────────────────────────
// 4. Accessors
// ──────────────────────────────────────────────────────────

#[test]
fn accessors_reflect_config() {
    let config = SimConfig::new(2).with_delay_reward(true);
    let s = Simulator::from_sources(config, &[crate::common::reads(&ABCABDA)]).unwrap();
    assert_eq!(s.n_actions(), 3);
    assert_eq!(s.n_features(), 6);
    assert!(s.delay_reward());
    assert_eq!(s.trace().len(), 7);
    assert_eq!(s.display(), "[-, -]");
}

#[test]
fn display_lists_occupants() {
    let mut s = sim(&ABCABDA, 2, false);
    let _ = s.reset();
    assert_eq!(s.display(), "[1, 2]");
}
