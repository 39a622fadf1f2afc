//! Admission puzzle configuration.

use serde::{Deserialize, Serialize};

/// Argon2id cost parameters and difficulty policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Argon2 memory cost in KiB (64 MiB)
    pub memory_kib: u32,
    /// Argon2 passes over memory
    pub time_cost: u32,
    /// Argon2 lanes
    pub parallelism: u32,
    /// Smallest accepted difficulty in leading zero bits
    pub min_difficulty: u8,
    /// Largest accepted difficulty in leading zero bits
    pub max_difficulty: u8,
    /// Difficulty used when the caller has no preference
    pub default_difficulty: u8,
    /// Whether the admission pipeline rejects unsigned solutions
    pub require_signature: bool,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            time_cost: 3,
            parallelism: 1,
            min_difficulty: 16,
            max_difficulty: 24,
            default_difficulty: 18,
            require_signature: true,
        }
    }
}

impl PuzzleConfig {
    /// Minimal Argon2 cost and a difficulty floor of 1 so tests run in
    /// milliseconds.
    pub fn for_testing() -> Self {
        Self {
            memory_kib: 8,
            time_cost: 1,
            parallelism: 1,
            min_difficulty: 1,
            max_difficulty: 24,
            default_difficulty: 4,
            require_signature: true,
        }
    }

    /// Whether `difficulty` lies within the configured bounds.
    pub fn accepts_difficulty(&self, difficulty: u8) -> bool {
        (self.min_difficulty..=self.max_difficulty).contains(&difficulty)
    }
}
