//! Task lifecycle façade for the dispatcher.

use tracing::debug;

use super::core::AdmissionService;
use crate::domain::{AdmissionError, Identity, ReputationTier, TaskOutcome};

impl AdmissionService {
    /// Whether `identity` may take one more task in the current window.
    pub fn can_accept_task(&self, identity: Identity) -> Result<bool, AdmissionError> {
        let counted = self.reputation.tasks_in_window(identity)?;
        Ok(self.reputation.can_accept_task(identity, counted)?)
    }

    /// Count a task against the quota if it fits.
    ///
    /// Check and count happen under the identity's record lock, so
    /// concurrent dispatchers cannot overshoot the quota.
    ///
    /// # Errors
    ///
    /// `TaskQuotaExceeded` once the window is full.
    pub fn accept_task(&self, identity: Identity) -> Result<u32, AdmissionError> {
        match self.reputation.try_record_task(identity)? {
            Some(count) => Ok(count),
            None => {
                let tier = self.reputation.tier(identity)?;
                debug!(%identity, %tier, quota = tier.task_quota(), "task quota exhausted");
                Err(AdmissionError::TaskQuotaExceeded {
                    identity,
                    tier,
                    limit: tier.task_quota(),
                })
            }
        }
    }

    /// Feed a finished task back into the score. Returns the new score.
    pub fn record_task_outcome(
        &self,
        identity: Identity,
        outcome: TaskOutcome,
    ) -> Result<u32, AdmissionError> {
        Ok(self.reputation.apply_outcome(identity, outcome)?)
    }

    /// Current tier of a registered identity.
    pub fn tier(&self, identity: Identity) -> Result<ReputationTier, AdmissionError> {
        Ok(self.reputation.tier(identity)?)
    }
}
