//! Number pool sampling
//!
//! All sampling is uniform without replacement: partial Fisher-Yates for
//! subsets, a full Fisher-Yates pass for the final option order.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// The universe of candidate numbers, fixed for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPool {
    values: Arc<[u32]>,
}

impl NumberPool {
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Numbers the player must memorize this level
#[derive(Debug, Clone, Default)]
pub struct MemorySet {
    values: Vec<u32>,
    index: AHashSet<u32>,
}

impl MemorySet {
    fn from_values(values: Vec<u32>) -> Self {
        let index = values.iter().copied().collect();
        Self { values, index }
    }

    #[inline]
    pub fn contains(&self, number: u32) -> bool {
        self.index.contains(&number)
    }

    /// Numbers in the order they are shown
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Memory numbers mixed with distractors, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSet {
    values: Vec<u32>,
}

impl TestSet {
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[inline]
    pub fn contains(&self, number: u32) -> bool {
        self.values.contains(&number)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the pool `1..=size`
pub fn generate_pool(size: u32) -> NumberPool {
    NumberPool {
        values: (1..=size).collect(),
    }
}

/// Draw `count` pool numbers uniformly without replacement.
/// Clamps to the pool size instead of failing.
pub fn sample_memory_set<R: Rng + ?Sized>(pool: &NumberPool, count: usize, rng: &mut R) -> MemorySet {
    let mut candidates = pool.values().to_vec();
    let amount = count.min(candidates.len());
    let (chosen, _) = candidates.partial_shuffle(rng, amount);
    MemorySet::from_values(chosen.to_vec())
}

/// Pad the memory set with distractors up to `options` numbers, then shuffle.
///
/// Distractors come from `pool \ memory`; when too few remain the set is
/// simply smaller. Memory numbers are never dropped.
pub fn build_test_set<R: Rng + ?Sized>(
    memory: &MemorySet,
    pool: &NumberPool,
    options: usize,
    rng: &mut R,
) -> TestSet {
    let mut distractors: Vec<u32> = pool
        .values()
        .iter()
        .copied()
        .filter(|n| !memory.contains(*n))
        .collect();
    let needed = options.saturating_sub(memory.len()).min(distractors.len());
    let (chosen, _) = distractors.partial_shuffle(rng, needed);

    let mut values = Vec::with_capacity(memory.len() + needed);
    values.extend_from_slice(memory.values());
    values.extend_from_slice(chosen);
    values.shuffle(rng);
    TestSet { values }
}
