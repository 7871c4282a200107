//! Property tests for game configuration
//!
//! Property 1: Level size formulas
//! Property 2: Validation agrees with per-level playability

use proptest::prelude::*;

use crate::config::GameConfig;

proptest! {
    /// Memory set grows by two numbers per level from five
    #[test]
    fn prop_memory_count_formula(level in 1u32..=50) {
        let config = GameConfig::default();
        prop_assert_eq!(config.memory_count(level), 5 + 2 * (level as usize - 1));
    }

    /// Options grow by the configured increment
    #[test]
    fn prop_options_count_formula(
        level in 1u32..=50,
        base in 1usize..=40,
        increment in 0usize..=10
    ) {
        let config = GameConfig {
            base_options: base,
            options_increment: increment,
            ..GameConfig::default()
        };
        prop_assert_eq!(config.options_count(level), base + (level as usize - 1) * increment);
    }

    /// A config validates exactly when every level has room for its memory set
    #[test]
    fn prop_validate_matches_levels(
        max_level in 1u32..=12,
        base_options in 1usize..=30,
        options_increment in 0usize..=4
    ) {
        let config = GameConfig {
            max_level,
            base_options,
            options_increment,
            ..GameConfig::default()
        };
        let playable = (1..=max_level)
            .all(|level| config.options_count(level) >= config.memory_count(level));
        prop_assert_eq!(config.validate().is_ok(), playable);
    }

    /// JSON round trip keeps every field
    #[test]
    fn prop_json_round_trip(max_level in 1u32..=10, seed in proptest::option::of(any::<u64>())) {
        let config = GameConfig { max_level, seed, ..GameConfig::default() };
        let json = serde_json::to_string(&config).unwrap();
        let parsed = GameConfig::from_json(&json).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
