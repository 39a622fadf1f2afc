//! Trust tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trust level derived from a score.
///
/// | Score | Tier | Tasks/hour | Max connections |
/// |---|---|---|---|
/// | 0-249 | Newcomer | 10 | 5 |
/// | 250-499 | Established | 50 | 20 |
/// | 500-749 | Trusted | 200 | 50 |
/// | 750-1000 | Elite | 1000 | 100 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReputationTier {
    Newcomer,
    Established,
    Trusted,
    Elite,
}

impl ReputationTier {
    /// All tiers, lowest first.
    pub const ALL: [ReputationTier; 4] = [
        ReputationTier::Newcomer,
        ReputationTier::Established,
        ReputationTier::Trusted,
        ReputationTier::Elite,
    ];

    /// Tier for a score. Scores above 1000 count as Elite.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=249 => Self::Newcomer,
            250..=499 => Self::Established,
            500..=749 => Self::Trusted,
            _ => Self::Elite,
        }
    }

    /// Lowest score in this tier.
    pub fn min_score(&self) -> u32 {
        match self {
            Self::Newcomer => 0,
            Self::Established => 250,
            Self::Trusted => 500,
            Self::Elite => 750,
        }
    }

    /// Tasks allowed per quota window.
    pub fn task_quota(&self) -> u32 {
        match self {
            Self::Newcomer => 10,
            Self::Established => 50,
            Self::Trusted => 200,
            Self::Elite => 1000,
        }
    }

    /// Maximum concurrent connections.
    pub fn connection_quota(&self) -> u32 {
        match self {
            Self::Newcomer => 5,
            Self::Established => 20,
            Self::Trusted => 50,
            Self::Elite => 100,
        }
    }

    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newcomer => "newcomer",
            Self::Established => "established",
            Self::Trusted => "trusted",
            Self::Elite => "elite",
        }
    }
}

impl fmt::Display for ReputationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
