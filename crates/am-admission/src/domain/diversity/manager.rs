//! Subnet connection table.

use std::collections::HashMap;
use std::net::IpAddr;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use super::config::DiversityConfig;
use super::subnet::SubnetKey;
use crate::domain::errors::DiversityError;
use crate::metrics;

/// Per-subnet occupancy for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubnetStats {
    pub subnet: SubnetKey,
    pub connections: usize,
    /// Share of all connections, in percent
    pub share_percent: f64,
}

#[derive(Debug, Default)]
struct SubnetTable {
    counts: HashMap<SubnetKey, usize>,
    total: usize,
}

impl SubnetTable {
    fn count(&self, key: &SubnetKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

/// Enforces the subnet share cap under concurrent churn.
///
/// One mutex covers the whole table, so the check and the commit inside
/// [`add_connection`](Self::add_connection) form a single critical section.
#[derive(Debug)]
pub struct DiversityEnforcer {
    config: DiversityConfig,
    table: Mutex<SubnetTable>,
}

impl DiversityEnforcer {
    /// Create an empty table.
    pub fn new(config: DiversityConfig) -> Self {
        Self {
            config,
            table: Mutex::new(SubnetTable::default()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &DiversityConfig {
        &self.config
    }

    /// Whether a connection from `address` would currently be accepted.
    ///
    /// Advisory only: [`add_connection`](Self::add_connection) re-checks.
    pub fn can_connect(&self, address: IpAddr) -> Result<(), DiversityError> {
        let key = SubnetKey::from_ip(address);
        let table = self.table.lock();
        self.check(&table, key)
    }

    /// Atomically re-check and record a connection from `address`.
    pub fn add_connection(&self, address: IpAddr) -> Result<SubnetKey, DiversityError> {
        let key = SubnetKey::from_ip(address);
        let mut table = self.table.lock();
        self.check(&table, key)?;

        *table.counts.entry(key).or_insert(0) += 1;
        table.total += 1;

        debug!(
            subnet = %key,
            count = table.count(&key),
            total = table.total,
            "connection added"
        );
        metrics::set_connection_gauges(table.total, table.counts.len());
        Ok(key)
    }

    /// Forget one connection from `address`.
    ///
    /// Returns `false` (and changes nothing) if none is tracked. The subnet
    /// entry is dropped once its count reaches zero.
    pub fn remove_connection(&self, address: IpAddr) -> bool {
        let key = SubnetKey::from_ip(address);
        let mut table = self.table.lock();

        let Some(count) = table.counts.get_mut(&key) else {
            debug!(subnet = %key, "remove for untracked subnet ignored");
            return false;
        };

        *count -= 1;
        if *count == 0 {
            table.counts.remove(&key);
        }
        table.total -= 1;

        debug!(subnet = %key, total = table.total, "connection removed");
        metrics::set_connection_gauges(table.total, table.counts.len());
        true
    }

    /// Active connections from the subnet of `address`.
    pub fn subnet_connection_count(&self, address: IpAddr) -> usize {
        self.table.lock().count(&SubnetKey::from_ip(address))
    }

    /// Number of subnets with at least one connection.
    pub fn unique_subnets(&self) -> usize {
        self.table.lock().counts.len()
    }

    /// Active connections across all subnets.
    pub fn total_connections(&self) -> usize {
        self.table.lock().total
    }

    /// Occupancy per subnet, largest first.
    pub fn subnet_stats(&self) -> Vec<SubnetStats> {
        let table = self.table.lock();
        let total = table.total.max(1) as f64;

        let mut stats: Vec<_> = table
            .counts
            .iter()
            .map(|(subnet, &connections)| SubnetStats {
                subnet: *subnet,
                connections,
                share_percent: connections as f64 * 100.0 / total,
            })
            .collect();
        stats.sort_by(|a, b| b.connections.cmp(&a.connections).then(a.subnet.cmp(&b.subnet)));
        stats
    }

    fn check(&self, table: &SubnetTable, key: SubnetKey) -> Result<(), DiversityError> {
        let count_after = table.count(&key) + 1;
        let total_after = table.total + 1;
        let limit = self.config.subnet_limit(total_after);

        if count_after > limit {
            debug!(
                subnet = %key,
                count_after,
                total_after,
                limit,
                "subnet at capacity"
            );
            return Err(DiversityError::SubnetCapacityExceeded {
                subnet: key,
                count_after,
                total_after,
                limit,
            });
        }
        Ok(())
    }
}
