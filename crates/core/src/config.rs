//! Configuration system for the cache simulator.
//!
//! This module defines the parameters of a simulation instance. It provides:
//! 1. **Defaults:** Skip-eviction, reward, and boot-phase filtering defaults.
//! 2. **Structure:** A flat `SimConfig` deserializable from JSON or a Python dict.
//! 3. **Validation:** Rejection of parameters that can never produce an episode.
//!
//! Configuration is supplied as keyword arguments or a dict from the Python API, or
//! built directly with `SimConfig::new` from Rust.

use serde::{Deserialize, Serialize};

use crate::common::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Action 0 means "skip eviction" unless disabled.
    pub const ALLOW_SKIP: bool = true;

    /// Delayed rewards are off; the engine itself never reads this flag.
    pub const DELAY_REWARD: bool = false;

    /// Boot-phase rows are dropped from traces.
    pub const BOOT: bool = false;
}

/// Root configuration of a simulation instance.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::SimConfig;
///
/// let config = SimConfig::new(4);
/// assert!(config.allow_skip);
/// assert_eq!(config.n_actions(), 5);
/// ```
///
/// Deserializing from JSON (typical Python API usage):
///
/// ```
/// use cachesim_core::config::SimConfig;
///
/// let config = SimConfig::from_json(r#"{ "cache_size": 8, "allow_skip": false }"#).unwrap();
/// assert_eq!(config.cache_size, 8);
/// assert!(!config.allow_skip);
/// assert!(!config.boot);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Number of cache slots (C). Must be positive and smaller than the trace length.
    pub cache_size: usize,

    /// Whether action 0 means "skip eviction". When false, actions address slots directly.
    #[serde(default = "SimConfig::default_allow_skip")]
    pub allow_skip: bool,

    /// Reserved for policy-specific reward delay; carried but not used by the engine.
    #[serde(default = "SimConfig::default_delay_reward")]
    pub delay_reward: bool,

    /// Keep boot-phase rows (`boot/exec != 1`) when loading traces.
    #[serde(default = "SimConfig::default_boot")]
    pub boot: bool,
}

impl SimConfig {
    /// Creates a configuration with the given capacity and default flags.
    pub const fn new(cache_size: usize) -> Self {
        Self {
            cache_size,
            allow_skip: defaults::ALLOW_SKIP,
            delay_reward: defaults::DELAY_REWARD,
            boot: defaults::BOOT,
        }
    }

    /// Sets whether action 0 means "skip eviction".
    #[must_use]
    pub const fn with_allow_skip(mut self, allow_skip: bool) -> Self {
        self.allow_skip = allow_skip;
        self
    }

    /// Sets the reserved delayed-reward flag.
    #[must_use]
    pub const fn with_delay_reward(mut self, delay_reward: bool) -> Self {
        self.delay_reward = delay_reward;
        self
    }

    /// Sets whether boot-phase rows are kept.
    #[must_use]
    pub const fn with_boot(mut self, boot: bool) -> Self {
        self.boot = boot;
        self
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] if the document does not match the schema or
    /// fails [`SimConfig::validate`].
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimError::Configuration(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks parameters that do not depend on the trace.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] when `cache_size` is zero.
    pub fn validate(&self) -> SimResult<()> {
        if self.cache_size == 0 {
            return Err(SimError::Configuration(
                "cache_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of distinct actions the agent can take.
    pub const fn n_actions(&self) -> usize {
        if self.allow_skip {
            self.cache_size + 1
        } else {
            self.cache_size
        }
    }

    /// Length of the feature vector: one window set for the pending request plus one
    /// per slot.
    pub const fn n_features(&self) -> usize {
        (self.cache_size + 1) * crate::common::FEATURE_WINDOWS.len()
    }

    const fn default_allow_skip() -> bool {
        defaults::ALLOW_SKIP
    }

    const fn default_delay_reward() -> bool {
        defaults::DELAY_REWARD
    }

    const fn default_boot() -> bool {
        defaults::BOOT
    }
}
