//! # Admission Configuration
//!
//! Aggregates the per-component configs and loads them from TOML.
//!
//! # Config File Format
//!
//! Every table and key is optional; missing values take the defaults.
//!
//! ```toml
//! [timing]
//! min_micros = 100
//! max_micros = 500
//!
//! [puzzle]
//! memory_kib = 65536
//! time_cost = 3
//! parallelism = 1
//! min_difficulty = 16
//! max_difficulty = 24
//! default_difficulty = 18
//! require_signature = true
//!
//! [reputation]
//! starting_score = 100
//! max_score = 1000
//! task_success_reward = 10
//! task_failure_penalty = 5
//! malicious_penalty = 50
//! quota_window_secs = 3600
//!
//! [diversity]
//! max_subnet_share_percent = 20
//! min_connections_per_subnet = 1
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DiversityConfig, JitterWindow, PuzzleConfig, ReputationConfig};

/// Largest difficulty accepted by configuration.
const MAX_CONFIGURABLE_DIFFICULTY: u8 = 64;

/// Highest score the tier table defines.
const MAX_SCORE_CEILING: u32 = 1000;

/// Per-subnet floor. Anything higher lets a subnet exceed its share.
const SUBNET_FLOOR: usize = 1;

/// Argon2 needs at least 8 KiB of memory per lane.
const MIN_MEMORY_KIB_PER_LANE: u32 = 8;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML or has wrongly typed keys
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Jitter lower bound above upper bound
    #[error("jitter window min {min}us exceeds max {max}us")]
    InvalidJitterWindow { min: u64, max: u64 },

    /// Difficulty bounds inconsistent or outside 1..=64
    #[error("difficulty bounds invalid: min {min}, default {default}, max {max}")]
    InvalidDifficultyBounds { min: u8, default: u8, max: u8 },

    /// Argon2 cost parameters unusable
    #[error(
        "argon2 parameters invalid: {memory_kib} KiB, time cost {time_cost}, {parallelism} lanes"
    )]
    InvalidArgon2Params {
        memory_kib: u32,
        time_cost: u32,
        parallelism: u32,
    },

    /// Starting score above max, or max above 1000
    #[error("score bounds invalid: starting {starting}, max {max}")]
    InvalidScoreBounds { starting: u32, max: u32 },

    /// Zero-length quota window
    #[error("quota window must be at least one second")]
    InvalidQuotaWindow,

    /// Share percent outside 1..=100
    #[error("subnet share {0}% outside 1..=100")]
    InvalidSharePercent(u8),

    /// Per-subnet floor other than the single bootstrap connection
    #[error("min_connections_per_subnet must be {expected}, got {found}")]
    InvalidSubnetFloor { found: usize, expected: usize },
}

/// Complete admission subsystem configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Verification jitter
    pub timing: JitterWindow,
    /// Puzzle cost and difficulty
    pub puzzle: PuzzleConfig,
    /// Score bounds and deltas
    pub reputation: ReputationConfig,
    /// Subnet share cap
    pub diversity: DiversityConfig,
}

impl AdmissionConfig {
    /// Cheap settings for test suites.
    pub fn for_testing() -> Self {
        Self {
            timing: JitterWindow::for_testing(),
            puzzle: PuzzleConfig::for_testing(),
            reputation: ReputationConfig::for_testing(),
            diversity: DiversityConfig::default(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject inconsistent values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if !timing.is_valid() {
            return Err(ConfigError::InvalidJitterWindow {
                min: timing.min_micros,
                max: timing.max_micros,
            });
        }

        let puzzle = &self.puzzle;
        let bounds_ok = puzzle.min_difficulty >= 1
            && puzzle.min_difficulty <= puzzle.max_difficulty
            && puzzle.max_difficulty <= MAX_CONFIGURABLE_DIFFICULTY
            && puzzle.accepts_difficulty(puzzle.default_difficulty);
        if !bounds_ok {
            return Err(ConfigError::InvalidDifficultyBounds {
                min: puzzle.min_difficulty,
                default: puzzle.default_difficulty,
                max: puzzle.max_difficulty,
            });
        }

        let min_memory = MIN_MEMORY_KIB_PER_LANE.saturating_mul(puzzle.parallelism);
        if puzzle.time_cost == 0 || puzzle.parallelism == 0 || puzzle.memory_kib < min_memory {
            return Err(ConfigError::InvalidArgon2Params {
                memory_kib: puzzle.memory_kib,
                time_cost: puzzle.time_cost,
                parallelism: puzzle.parallelism,
            });
        }

        let reputation = &self.reputation;
        if reputation.max_score > MAX_SCORE_CEILING
            || reputation.starting_score > reputation.max_score
        {
            return Err(ConfigError::InvalidScoreBounds {
                starting: reputation.starting_score,
                max: reputation.max_score,
            });
        }
        if reputation.quota_window_secs == 0 {
            return Err(ConfigError::InvalidQuotaWindow);
        }

        let share = self.diversity.max_subnet_share_percent;
        if !(1..=100).contains(&share) {
            return Err(ConfigError::InvalidSharePercent(share));
        }
        let floor = self.diversity.min_connections_per_subnet;
        if floor != SUBNET_FLOOR {
            return Err(ConfigError::InvalidSubnetFloor {
                found: floor,
                expected: SUBNET_FLOOR,
            });
        }

        Ok(())
    }
}
