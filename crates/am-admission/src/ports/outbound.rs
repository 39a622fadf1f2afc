//! # Driven Ports (Outbound SPI)
//!
//! Sources of time and randomness the admission components depend on.
//! Production adapters live in `crate::adapters`; deterministic versions live
//! in `crate::test_utils`.

use crate::domain::Timestamp;

/// Abstract interface for wall-clock time.
///
/// Drives the reputation task window. Tests inject a fixed or manually
/// advanced clock.
pub trait TimeSource: Send + Sync {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}

/// Abstract interface for randomness.
///
/// Used for verification jitter, batch processing order and the starting
/// nonce of a puzzle search. None of these values are secret, but jitter and
/// shuffling must be unpredictable to an observer, so production code backs
/// this with a CSPRNG.
pub trait RandomSource: Send + Sync {
    /// Uniform value in `[min, max]`. Returns `min` when `max <= min`.
    fn random_range(&self, min: u64, max: u64) -> u64;

    /// Uniform 64-bit value.
    fn random_u64(&self) -> u64;

    /// Permute `indices` in place.
    fn shuffle_indices(&self, indices: &mut [usize]);
}
