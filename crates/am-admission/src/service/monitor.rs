//! Read-only view for metrics exporters.

use std::net::IpAddr;
use std::sync::Arc;

use super::core::AdmissionService;
use crate::domain::{DiversityEnforcer, Identity, ReputationManager, ReputationTier, SubnetStats};
use crate::ports::AdmissionMonitor;

/// Introspection handle exposing only [`AdmissionMonitor`].
///
/// Cheap to clone; holds the same tables as the service.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    reputation: Arc<ReputationManager>,
    diversity: Arc<DiversityEnforcer>,
}

impl AdmissionService {
    /// Hand out a read-only monitor.
    pub fn monitor(&self) -> MonitorHandle {
        MonitorHandle {
            reputation: Arc::clone(&self.reputation),
            diversity: Arc::clone(&self.diversity),
        }
    }
}

impl AdmissionMonitor for MonitorHandle {
    fn subnet_connection_count(&self, address: IpAddr) -> usize {
        self.diversity.subnet_connection_count(address)
    }

    fn unique_subnets(&self) -> usize {
        self.diversity.unique_subnets()
    }

    fn total_connections(&self) -> usize {
        self.diversity.total_connections()
    }

    fn subnet_stats(&self) -> Vec<SubnetStats> {
        self.diversity.subnet_stats()
    }

    fn score(&self, identity: Identity) -> Option<u32> {
        self.reputation.score(identity).ok()
    }

    fn tier(&self, identity: Identity) -> Option<ReputationTier> {
        self.reputation.tier(identity).ok()
    }

    fn identity_count(&self) -> usize {
        self.reputation.identity_count()
    }
}
