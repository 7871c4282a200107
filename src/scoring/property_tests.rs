//! Property tests for scoring
//!
//! Property 1: Level points are exactly ten per level
//! Property 2: Memory IQ stays within [80, 150]
//! Property 3: Memory IQ stays within five of its base when unclamped

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::scoring::{estimate_iq, level_points};

proptest! {
    #[test]
    fn prop_level_points_exact(level in 0u32..=100_000) {
        prop_assert_eq!(level_points(level), 10 * level);
    }

    #[test]
    fn prop_iq_bounded(level in 1u32..=10_000, score in 0u32..=u32::MAX, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let iq = estimate_iq(level, score, &mut rng);
        prop_assert!((80..=150).contains(&iq), "iq {} out of bounds", iq);
    }

    #[test]
    fn prop_iq_jitter_window(level in 1u32..=10, score in 0u32..=550, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = 90.0 + level as f64 * 3.0 + score as f64 / 20.0;
        let iq = estimate_iq(level, score, &mut rng) as f64;
        prop_assert!((iq - base).abs() <= 5.5, "iq {} too far from base {}", iq, base);
    }
}
