//! Diversity configuration.

use serde::{Deserialize, Serialize};

/// Subnet share cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    /// Maximum share of all connections one subnet may hold, in percent
    pub max_subnet_share_percent: u8,
    /// Connections per subnet always allowed, so a fresh node can bootstrap
    pub min_connections_per_subnet: usize,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            max_subnet_share_percent: 20,
            min_connections_per_subnet: 1,
        }
    }
}

impl DiversityConfig {
    /// Largest per-subnet count allowed once the table holds `total_after`
    /// connections.
    ///
    /// `max(min_connections_per_subnet, floor(total_after * share / 100))`
    pub fn subnet_limit(&self, total_after: usize) -> usize {
        let share = total_after * usize::from(self.max_subnet_share_percent) / 100;
        share.max(self.min_connections_per_subnet)
    }
}
