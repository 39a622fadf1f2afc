//! Jitter window configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds of the random delay appended to every verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterWindow {
    /// Lower bound in microseconds (inclusive)
    pub min_micros: u64,
    /// Upper bound in microseconds (inclusive)
    pub max_micros: u64,
}

impl Default for JitterWindow {
    fn default() -> Self {
        Self {
            min_micros: 100,
            max_micros: 500,
        }
    }
}

impl JitterWindow {
    /// Narrow window that keeps test suites fast.
    pub fn for_testing() -> Self {
        Self {
            min_micros: 10,
            max_micros: 50,
        }
    }

    /// Shortest delay.
    pub fn min(&self) -> Duration {
        Duration::from_micros(self.min_micros)
    }

    /// Longest delay.
    pub fn max(&self) -> Duration {
        Duration::from_micros(self.max_micros)
    }

    /// Whether `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min_micros <= self.max_micros
    }
}
