//! # Configuration Tests
//!
//! Tests for configuration defaults, builder methods, JSON deserialization,
//! and validation.

use cachesim_core::config::SimConfig;
use cachesim_core::SimError;
use rstest::rstest;

#[test]
fn test_config_defaults() {
    let config = SimConfig::new(4);
    assert_eq!(config.cache_size, 4);
    assert!(config.allow_skip);
    assert!(!config.delay_reward);
    assert!(!config.boot);
}

#[test]
fn test_config_builders() {
    let config = SimConfig::new(2)
        .with_allow_skip(false)
        .with_delay_reward(true)
        .with_boot(true);
    assert!(!config.allow_skip);
    assert!(config.delay_reward);
    assert!(config.boot);
}

#[test]
fn test_json_minimal_uses_defaults() {
    let config = SimConfig::from_json(r#"{ "cache_size": 16 }"#).unwrap();
    assert_eq!(config, SimConfig::new(16));
}

#[test]
fn test_json_full() {
    let json = r#"{
        "cache_size": 3,
        "allow_skip": false,
        "delay_reward": true,
        "boot": true
    }"#;
    let config = SimConfig::from_json(json).unwrap();
    assert_eq!(config.cache_size, 3);
    assert!(!config.allow_skip);
    assert!(config.delay_reward);
    assert!(config.boot);
}

#[rstest]
#[case::missing_cache_size(r#"{ "allow_skip": true }"#)]
#[case::unknown_field(r#"{ "cache_size": 2, "interval": 5 }"#)]
#[case::wrong_type(r#"{ "cache_size": "two" }"#)]
#[case::zero_cache(r#"{ "cache_size": 0 }"#)]
fn test_json_rejected(#[case] json: &str) {
    let err = SimConfig::from_json(json).unwrap_err();
    assert!(matches!(err, SimError::Configuration(_)), "got {err:?}");
}

#[rstest]
#[case(1, true, 2, 4)]
#[case(1, false, 1, 4)]
#[case(8, true, 9, 18)]
#[case(8, false, 8, 18)]
fn test_action_and_feature_counts(
    #[case] cache_size: usize,
    #[case] allow_skip: bool,
    #[case] n_actions: usize,
    #[case] n_features: usize,
) {
    let config = SimConfig::new(cache_size).with_allow_skip(allow_skip);
    assert_eq!(config.n_actions(), n_actions);
    assert_eq!(config.n_features(), n_features);
}
