//! Property tests for the number pool
//!
//! Property 1: Memory set size per level
//! Property 2: Test set contains the memory set
//! Property 3: Test set size is min(options, pool)
//! Property 4: No duplicates anywhere

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use crate::config::GameConfig;
use crate::pool::{build_test_set, generate_pool, sample_memory_set};

proptest! {
    /// Memory set has 5 + 2(L-1) members for every playable level
    #[test]
    fn prop_memory_set_size(level in 1u32..=10, seed in any::<u64>()) {
        let config = GameConfig::default();
        let pool = generate_pool(config.pool_size);
        let mut rng = StdRng::seed_from_u64(seed);
        let memory = sample_memory_set(&pool, config.memory_count(level), &mut rng);
        prop_assert_eq!(memory.len(), 5 + 2 * (level as usize - 1));
    }

    /// Memory set never exceeds the pool and never repeats
    #[test]
    fn prop_memory_set_within_pool(pool_size in 1u32..=60, count in 0usize..=80, seed in any::<u64>()) {
        let pool = generate_pool(pool_size);
        let mut rng = StdRng::seed_from_u64(seed);
        let memory = sample_memory_set(&pool, count, &mut rng);
        prop_assert_eq!(memory.len(), count.min(pool_size as usize));
        let unique: HashSet<u32> = memory.values().iter().copied().collect();
        prop_assert_eq!(unique.len(), memory.len());
        for n in memory.values() {
            prop_assert!(*n >= 1 && *n <= pool_size);
        }
    }

    /// MemorySet ⊆ TestSet and |TestSet| = min(options, |pool|)
    #[test]
    fn prop_test_set_shape(level in 1u32..=10, pool_size in 23u32..=120, seed in any::<u64>()) {
        let config = GameConfig { pool_size, ..GameConfig::default() };
        let pool = generate_pool(config.pool_size);
        let mut rng = StdRng::seed_from_u64(seed);
        let memory = sample_memory_set(&pool, config.memory_count(level), &mut rng);
        let test = build_test_set(&memory, &pool, config.options_count(level), &mut rng);

        for n in memory.values() {
            prop_assert!(test.contains(*n), "memory number {} missing", n);
        }
        prop_assert_eq!(test.len(), config.options_count(level).min(pool.len()));

        let unique: HashSet<u32> = test.values().iter().copied().collect();
        prop_assert_eq!(unique.len(), test.len());
    }

    /// Same seed, same challenge
    #[test]
    fn prop_seeded_sampling_is_deterministic(seed in any::<u64>()) {
        let pool = generate_pool(100);
        let mut a = StdRng::seed_from_u64(seed);
        let mut b = StdRng::seed_from_u64(seed);
        let ma = sample_memory_set(&pool, 7, &mut a);
        let mb = sample_memory_set(&pool, 7, &mut b);
        prop_assert_eq!(ma.values(), mb.values());
        prop_assert_eq!(
            build_test_set(&ma, &pool, 25, &mut a),
            build_test_set(&mb, &pool, 25, &mut b)
        );
    }
}
