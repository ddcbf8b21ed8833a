//! Randomness used by the practice engines.
//!
//! Engines never reach for a global generator. They take a `RandomSource`, so
//! tests can pass a `FixedSequence` and assert exact layouts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Return an index in `0..bound`. Callers never pass a zero bound.
    fn index(&mut self, bound: usize) -> usize;
}

/// Entropy-seeded generator for production use.
#[derive(Debug, Clone)]
pub struct ThreadRandom {
    rng: StdRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed list of values, each reduced modulo the requested bound.
///
/// An empty list behaves like "always pick the last index", which makes
/// `shuffle` leave its input untouched.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    values: Vec<usize>,
    position: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, position: 0 }
    }

    /// A source under which `shuffle` and `sample` preserve input order.
    pub fn identity() -> Self {
        Self::default()
    }
}

impl RandomSource for FixedSequence {
    fn index(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return bound - 1;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % bound
    }
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Up to `count` items drawn without replacement, in shuffled order.
pub fn sample<T: Clone>(items: &[T], count: usize, rng: &mut dyn RandomSource) -> Vec<T> {
    let mut pool = items.to_vec();
    shuffle(&mut pool, rng);
    pool.truncate(count);
    pool
}
