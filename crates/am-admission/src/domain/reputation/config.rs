//! Reputation configuration.

use serde::{Deserialize, Serialize};

/// Score bounds, outcome deltas and quota window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationConfig {
    /// Score given to a newly registered identity
    pub starting_score: u32,
    /// Upper clamp for scores (the tier table tops out at 1000)
    pub max_score: u32,
    /// Added on a successful task
    pub task_success_reward: u32,
    /// Subtracted on a failed task
    pub task_failure_penalty: u32,
    /// Subtracted on detected malicious behaviour
    pub malicious_penalty: u32,
    /// Length of the task quota window in seconds
    pub quota_window_secs: u64,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            starting_score: 100,
            max_score: 1000,
            task_success_reward: 10,
            task_failure_penalty: 5,
            malicious_penalty: 50,
            quota_window_secs: 3600,
        }
    }
}

impl ReputationConfig {
    /// Short quota window for tests.
    pub fn for_testing() -> Self {
        Self {
            quota_window_secs: 60,
            ..Self::default()
        }
    }
}
