//! Simulator: owns the trace, the cache and the episode cursor.
//!
//! The simulator replays the trace one request at a time and only stops at decision
//! epochs, i.e. right after a miss. At each epoch the agent picks a slot to evict (or
//! skips), the simulator applies it and fast-forwards through every hit up to the next
//! miss.

use std::path::Path;

use tracing::{debug, info, trace};

use super::observation::Observation;
use super::reward::{self, RewardBreakdown};
use crate::cache::CacheState;
use crate::common::{Occupant, SimError, SimResult};
use crate::config::SimConfig;
use crate::stats::EpisodeStats;
use crate::trace::{RecordSource, Trace, TraceLoader};

/// Lifecycle of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// `reset` has never been called.
    #[default]
    Uninitialized,
    /// `reset` is installing the first distinct resources.
    Filling,
    /// Waiting for the agent's action at a decision epoch.
    Running,
    /// The trace is exhausted; only `reset` is accepted.
    Done,
}

/// Top-level simulator: trace, cache state, cursor, and counters.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
    trace: Trace,
    cache: CacheState,
    stats: EpisodeStats,
    cursor: usize,
    phase: Phase,
    last_reward: Option<RewardBreakdown>,
}

impl Simulator {
    /// Creates a simulator over an already loaded trace. Call [`Simulator::reset`]
    /// before stepping.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if the configuration is invalid or the trace
    /// is not longer than the cache.
    pub fn new(config: SimConfig, trace: Trace) -> SimResult<Self> {
        config.validate()?;
        if trace.len() <= config.cache_size {
            return Err(SimError::Configuration(format!(
                "the count of requests ({}) is too small for a cache of {} slots, try a longer trace",
                trace.len(),
                config.cache_size
            )));
        }
        Ok(Self {
            cache: CacheState::new(config.cache_size),
            config,
            trace,
            stats: EpisodeStats::default(),
            cursor: 0,
            phase: Phase::Uninitialized,
            last_reward: None,
        })
    }

    /// Loads `sources` (honouring `config.boot`) and creates a simulator over them.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] if a source fails to load, otherwise as
    /// [`Simulator::new`].
    pub fn from_sources<S>(config: SimConfig, sources: &[S]) -> SimResult<Self>
    where
        S: RecordSource,
    {
        config.validate()?;
        let trace = TraceLoader::from_config(&config).load(sources, config.cache_size)?;
        Self::new(config, trace)
    }

    /// Loads CSV request logs from disk and creates a simulator over them.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::from_sources`].
    pub fn from_paths<P>(config: SimConfig, paths: &[P]) -> SimResult<Self>
    where
        P: AsRef<Path>,
    {
        config.validate()?;
        let trace = TraceLoader::from_config(&config).load_paths(paths, config.cache_size)?;
        Self::new(config, trace)
    }

    /// Starts a new episode and returns the observation at its first decision epoch.
    ///
    /// The cache is filled with the first C distinct resources of the trace (each one a
    /// miss), then the simulator runs until the first miss on the warm cache.
    pub fn reset(&mut self) -> Observation {
        self.stats = EpisodeStats::default();
        self.cache.clear();
        self.last_reward = None;
        self.phase = Phase::Filling;
        self.cursor = 0;

        let capacity = self.cache.capacity();
        let len = self.trace.len();
        let mut next_slot = 0;
        while next_slot < capacity && self.cursor < len {
            let index = self.cursor;
            let resource = self.trace.requests()[index];
            if !self.cache.contains(resource) {
                self.stats.miss_count += 1;
                let _ = self.cache.install(next_slot, resource, index);
                self.cache.record_hit(next_slot, index, self.trace.operations()[index]);
                next_slot += 1;
            }
            self.stats.total_count += 1;
            self.cursor += 1;
        }

        self.run_until_miss(self.cursor);
        debug!(
            epoch = self.cursor,
            resident = self.cache.resident_count(),
            requests = self.stats.total_count,
            misses = self.stats.miss_count,
            "first decision epoch"
        );
        self.log_if_finished();
        self.observation()
    }

    /// Applies `action` at the current epoch and runs to the next one.
    ///
    /// With skip allowed, `0` skips eviction and `k` in `1..=C` evicts slot `k - 1`.
    /// Without skip, `k` in `0..C` evicts slot `k`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidState`] if no episode is running and
    /// [`SimError::InvalidAction`] if `action` is out of range. Nothing is mutated on
    /// error.
    pub fn step(&mut self, action: i64) -> SimResult<(Observation, f64)> {
        let reward = self.step_detailed(action)?;
        Ok((self.observation(), reward.total()))
    }

    /// Same as [`Simulator::step`] but returns both reward terms instead of the
    /// observation.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::step`].
    pub fn step_detailed(&mut self, action: i64) -> SimResult<RewardBreakdown> {
        match self.phase {
            Phase::Running => {}
            Phase::Done => {
                return Err(SimError::InvalidState(
                    "simulation has finished, use reset() to restart simulation",
                ));
            }
            Phase::Uninitialized | Phase::Filling => {
                return Err(SimError::InvalidState(
                    "simulation has not started, call reset() first",
                ));
            }
        }
        let victim = self.decode_action(action)?;

        let last_index = self.cursor;
        let mut evicted = Occupant::Empty;
        if let Some(slot) = victim {
            let resource = self.trace.requests()[last_index];
            let operation = self.trace.operations()[last_index];
            evicted = self.cache.install(slot, resource, last_index);
            self.cache.record_hit(slot, last_index, operation);
            self.stats.evict_count += 1;
        }

        self.run_until_miss(last_index + 1);
        let reward = reward::compute(self.trace.requests(), &self.cache, last_index, self.cursor);
        self.stats.epochs += 1;
        self.last_reward = Some(reward);

        trace!(
            epoch = last_index,
            action,
            slot = ?victim,
            evicted = %evicted,
            next_epoch = self.cursor,
            hits = reward.hit_count,
            base = reward.base,
            lookahead = reward.lookahead,
            "epoch resolved"
        );
        self.log_if_finished();
        Ok(reward)
    }

    /// Maps an agent action to the slot it evicts, `None` meaning skip.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidAction`] if `action` is out of range.
    pub fn decode_action(&self, action: i64) -> SimResult<Option<usize>> {
        let max = self.config.n_actions() - 1;
        let raw = usize::try_from(action)
            .ok()
            .filter(|&a| a <= max)
            .ok_or(SimError::InvalidAction { action, max })?;
        let shifted = if self.config.allow_skip { raw } else { raw + 1 };
        Ok(shifted.checked_sub(1))
    }

    /// Processes requests from `from` until the next miss or the end of the trace.
    ///
    /// Hits update the slot they land in; the miss leaves the cursor on the missed
    /// request. Every processed request bumps its frequency counter.
    fn run_until_miss(&mut self, from: usize) {
        self.cursor = from;
        let len = self.trace.len();
        while self.cursor < len {
            let index = self.cursor;
            let resource = self.trace.requests()[index];
            self.cache.touch_frequency(resource);
            self.stats.total_count += 1;
            match self.cache.slot_of(resource) {
                Some(slot) => {
                    self.cache
                        .record_hit(slot, index, self.trace.operations()[index]);
                    self.cursor += 1;
                }
                None => {
                    self.stats.miss_count += 1;
                    self.phase = Phase::Running;
                    return;
                }
            }
        }
        self.phase = Phase::Done;
    }

    fn log_if_finished(&self) {
        if self.phase == Phase::Done {
            info!(
                requests = self.stats.total_count,
                misses = self.stats.miss_count,
                evictions = self.stats.evict_count,
                miss_rate = self.stats.miss_rate().unwrap_or_default(),
                "episode finished"
            );
        }
    }

    /// Observation at the current cursor.
    pub fn observation(&self) -> Observation {
        Observation::capture(self.trace.requests(), &self.cache, self.cursor, self.pending())
    }

    /// Request awaiting a decision; [`Occupant::Empty`] once the trace is exhausted.
    pub fn pending(&self) -> Occupant {
        self.trace.requests().get(self.cursor).copied().into()
    }

    /// Returns `true` once the trace is exhausted.
    #[inline]
    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Fraction of processed requests that missed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoData`] before any request was processed.
    pub fn miss_rate(&self) -> SimResult<f64> {
        self.stats.miss_rate()
    }

    /// Number of actions the agent can choose from.
    pub const fn n_actions(&self) -> usize {
        self.config.n_actions()
    }

    /// Length of the feature vector.
    pub const fn n_features(&self) -> usize {
        self.config.n_features()
    }

    /// Current trace index, `None` before the first `reset`.
    pub const fn cursor(&self) -> Option<usize> {
        match self.phase {
            Phase::Uninitialized => None,
            _ => Some(self.cursor),
        }
    }

    /// Lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Reward terms of the last `step`, if any since `reset`.
    pub const fn last_reward(&self) -> Option<RewardBreakdown> {
        self.last_reward
    }

    /// Episode counters.
    pub const fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Cache state (read-only).
    pub const fn cache(&self) -> &CacheState {
        &self.cache
    }

    /// Configuration the simulator was built with.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Trace being replayed.
    pub const fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Reserved delayed-reward flag; the engine does not read it.
    pub const fn delay_reward(&self) -> bool {
        self.config.delay_reward
    }

    /// Slot occupants formatted as `[a, b, -]`.
    pub fn display(&self) -> String {
        self.cache.to_string()
    }
}
