//! Randomness adapter.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::ports::RandomSource;

/// Production random source backed by `rand::thread_rng()` (a reseeding
/// CSPRNG).
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl ThreadRandomSource {
    /// Create a new thread-local random source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandomSource {
    fn random_range(&self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn random_u64(&self) -> u64 {
        rand::thread_rng().gen()
    }

    fn shuffle_indices(&self, indices: &mut [usize]) {
        indices.shuffle(&mut rand::thread_rng());
    }
}
