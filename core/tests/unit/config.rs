//! Integration tests for `SimConfig` validation and deserialisation.

use kvcache_sim_core::{ConfigError, SimConfig};

#[test]
fn zero_num_t1_banks_is_rejected() {
    let config = SimConfig {
        num_t1_banks: 0,
        ..SimConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroBanks { field: "num_t1_banks" })
    );
}

#[test]
fn zero_t1_latency_is_rejected() {
    let config = SimConfig {
        t1_latency: 0,
        ..SimConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroLatency { field: "t1_latency" })
    );
}

#[test]
fn capacity_per_bank_divides_evenly_for_a_validated_config() {
    let config = SimConfig {
        t1_total_lines: 256,
        num_t1_banks: 8,
        t2_total_lines: 4096,
        num_t2_banks: 4,
        ..SimConfig::default()
    };
    assert!(config.validate().is_ok());
    assert_eq!(config.t1_capacity_per_bank(), 32);
    assert_eq!(config.t2_capacity_per_bank(), 1024);
}

#[test]
fn empty_json_object_deserialises_to_every_default() {
    let config: SimConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SimConfig::default());
}

#[test]
fn cycle_budget_round_trips_through_json() {
    let config: SimConfig = serde_json::from_str(r#"{"cycle_budget": 1000000}"#).unwrap();
    assert_eq!(config.cycle_budget, Some(1_000_000));
}

#[test]
fn prefetching_disabled_via_zero_issue_width_needs_no_lookahead() {
    let config: SimConfig =
        serde_json::from_str(r#"{"prefetch_issue_width": 0, "prefetch_lookahead": 0}"#).unwrap();
    assert!(config.validate().is_ok());
}
