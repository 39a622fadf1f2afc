//! Reputation table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info};

use super::config::ReputationConfig;
use super::record::{ReputationRecord, ReputationSnapshot, TaskOutcome};
use super::tier::ReputationTier;
use crate::domain::errors::ReputationError;
use crate::domain::Identity;
use crate::ports::outbound::TimeSource;

/// Shared per-identity trust scores.
///
/// The outer `RwLock` guards membership: `register` and `evict` take it for
/// writing, everything else for reading. Each record sits behind its own
/// `Mutex`, so mutations on one identity are serialized while different
/// identities proceed in parallel.
pub struct ReputationManager {
    config: ReputationConfig,
    records: RwLock<HashMap<Identity, Mutex<ReputationRecord>>>,
    time: Arc<dyn TimeSource>,
}

impl ReputationManager {
    /// Create an empty table.
    pub fn new(config: ReputationConfig, time: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            records: RwLock::new(HashMap::new()),
            time,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }

    /// Create a record at the starting score.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` if a record exists. Re-registration never resets
    /// a score.
    pub fn register(&self, identity: Identity) -> Result<(), ReputationError> {
        let mut records = self.records.write();
        if records.contains_key(&identity) {
            return Err(ReputationError::AlreadyRegistered(identity));
        }

        let score = self.config.starting_score.min(self.config.max_score);
        records.insert(
            identity,
            Mutex::new(ReputationRecord::new(score, self.time.now())),
        );
        info!(%identity, score, tier = %ReputationTier::from_score(score), "identity registered");
        Ok(())
    }

    /// Add `amount` to the score, clamped at the maximum. Returns the new score.
    pub fn increase(&self, identity: Identity, amount: u32) -> Result<u32, ReputationError> {
        let max = self.config.max_score;
        self.mutate(identity, "increase", |record| record.increase(amount, max))
    }

    /// Subtract `amount` from the score, clamped at zero. Returns the new score.
    pub fn decrease(&self, identity: Identity, amount: u32) -> Result<u32, ReputationError> {
        self.mutate(identity, "decrease", |record| record.decrease(amount))
    }

    /// Apply the configured delta for a task outcome.
    pub fn apply_outcome(
        &self,
        identity: Identity,
        outcome: TaskOutcome,
    ) -> Result<u32, ReputationError> {
        match outcome {
            TaskOutcome::Success => self.increase(identity, self.config.task_success_reward),
            TaskOutcome::Failure => self.decrease(identity, self.config.task_failure_penalty),
            TaskOutcome::Malicious => {
                let score = self.decrease(identity, self.config.malicious_penalty)?;
                info!(%identity, score, "malicious behaviour penalised");
                Ok(score)
            }
        }
    }

    /// Reward a successful task.
    pub fn on_task_success(&self, identity: Identity) -> Result<u32, ReputationError> {
        self.apply_outcome(identity, TaskOutcome::Success)
    }

    /// Penalise a failed task.
    pub fn on_task_failure(&self, identity: Identity) -> Result<u32, ReputationError> {
        self.apply_outcome(identity, TaskOutcome::Failure)
    }

    /// Penalise malicious behaviour.
    pub fn on_malicious_behavior(&self, identity: Identity) -> Result<u32, ReputationError> {
        self.apply_outcome(identity, TaskOutcome::Malicious)
    }

    /// Current score.
    pub fn score(&self, identity: Identity) -> Result<u32, ReputationError> {
        self.read(identity, |record| record.score())
    }

    /// Tier derived from the current score.
    pub fn tier(&self, identity: Identity) -> Result<ReputationTier, ReputationError> {
        self.read(identity, |record| record.tier())
    }

    /// Whether another task fits under the tier quota.
    ///
    /// Check only: the caller counts tasks (see
    /// [`record_task_accepted`](Self::record_task_accepted)).
    pub fn can_accept_task(
        &self,
        identity: Identity,
        current_task_count: u32,
    ) -> Result<bool, ReputationError> {
        let tier = self.tier(identity)?;
        Ok(current_task_count < tier.task_quota())
    }

    /// Whether another connection fits under the tier quota.
    pub fn can_open_connection(
        &self,
        identity: Identity,
        current_connections: u32,
    ) -> Result<bool, ReputationError> {
        let tier = self.tier(identity)?;
        Ok(current_connections < tier.connection_quota())
    }

    /// Count one accepted task in the current window. Returns the new count.
    pub fn record_task_accepted(&self, identity: Identity) -> Result<u32, ReputationError> {
        let now = self.time.now();
        let window = self.config.quota_window_secs;
        self.mutate(identity, "record_task", |record| record.record_task(now, window))
    }

    /// Count a task only if it fits under the tier quota, in one critical
    /// section. Returns the new count, or `None` when the quota is exhausted.
    pub fn try_record_task(&self, identity: Identity) -> Result<Option<u32>, ReputationError> {
        let now = self.time.now();
        let window = self.config.quota_window_secs;
        self.mutate(identity, "try_record_task", |record| {
            let quota = record.tier().task_quota();
            if record.tasks_in_window(now, window) < quota {
                Some(record.record_task(now, window))
            } else {
                None
            }
        })
    }

    /// Tasks counted in the current window.
    pub fn tasks_in_window(&self, identity: Identity) -> Result<u32, ReputationError> {
        let now = self.time.now();
        let window = self.config.quota_window_secs;
        self.read(identity, |record| record.tasks_in_window(now, window))
    }

    /// Whether a record exists.
    pub fn is_registered(&self, identity: Identity) -> bool {
        self.records.read().contains_key(&identity)
    }

    /// Number of records.
    pub fn identity_count(&self) -> usize {
        self.records.read().len()
    }

    /// Remove a record (external eviction policy). Returns whether one existed.
    pub fn evict(&self, identity: Identity) -> bool {
        let removed = self.records.write().remove(&identity).is_some();
        if removed {
            info!(%identity, "identity evicted");
        }
        removed
    }

    /// Copy of every record, sorted by descending score.
    pub fn snapshot(&self) -> Vec<ReputationSnapshot> {
        let now = self.time.now();
        let window = self.config.quota_window_secs;
        let records = self.records.read();

        let mut out: Vec<_> = records
            .iter()
            .map(|(identity, record)| {
                let record = record.lock();
                ReputationSnapshot {
                    identity: *identity,
                    score: record.score(),
                    tier: record.tier(),
                    tasks_in_window: record.tasks_in_window(now, window),
                }
            })
            .collect();
        out.sort_by(|a, b| b.score.cmp(&a.score).then(a.identity.cmp(&b.identity)));
        out
    }

    fn read<T>(
        &self,
        identity: Identity,
        f: impl FnOnce(&ReputationRecord) -> T,
    ) -> Result<T, ReputationError> {
        let records = self.records.read();
        let record = records
            .get(&identity)
            .ok_or(ReputationError::UnknownIdentity(identity))?;
        let guard = record.lock();
        Ok(f(&*guard))
    }

    fn mutate<T>(
        &self,
        identity: Identity,
        operation: &'static str,
        f: impl FnOnce(&mut ReputationRecord) -> T,
    ) -> Result<T, ReputationError> {
        let records = self.records.read();
        let Some(record) = records.get(&identity) else {
            error!(%identity, operation, "reputation mutation on unregistered identity");
            return Err(ReputationError::UnknownIdentity(identity));
        };

        let mut guard = record.lock();
        let before = guard.tier();
        let value = f(&mut *guard);
        let after = guard.tier();

        if before != after {
            info!(%identity, from = %before, to = %after, score = guard.score(), "tier changed");
        } else {
            debug!(%identity, operation, score = guard.score(), "reputation updated");
        }
        Ok(value)
    }
}

impl std::fmt::Debug for ReputationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReputationManager")
            .field("config", &self.config)
            .field("identities", &self.identity_count())
            .finish()
    }
}
