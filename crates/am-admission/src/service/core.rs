use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use super::types::ServiceError;
use crate::adapters::{SystemTimeSource, ThreadRandomSource};
use crate::config::AdmissionConfig;
use crate::domain::{
    AdmissionPuzzle, DiversityEnforcer, Identity, ReputationManager, TimingSafeVerifier,
};
use crate::ports::{RandomSource, TimeSource};

/// Live connections as seen by the pipeline.
#[derive(Debug, Default)]
pub(crate) struct ConnectionTable {
    /// Open connections per identity
    pub(crate) per_identity: HashMap<Identity, u32>,
    /// Outstanding tickets with the identity and address they were issued for
    pub(crate) tickets: HashMap<Uuid, (Identity, SocketAddr)>,
}

impl ConnectionTable {
    pub(crate) fn count(&self, identity: &Identity) -> u32 {
        self.per_identity.get(identity).copied().unwrap_or(0)
    }
}

/// The admission pipeline and its components.
///
/// # Lock Order
///
/// `connections` is always taken before the diversity table. Reputation
/// records are only ever locked briefly inside a single call.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use am_admission::{AdmissionConfig, AdmissionService};
///
/// let service = Arc::new(AdmissionService::from_config(AdmissionConfig::default())?);
/// let ticket = service.admit(&request)?;
/// // ... connection lifetime ...
/// service.release(&ticket)?;
/// ```
pub struct AdmissionService {
    pub(crate) config: AdmissionConfig,
    pub(crate) verifier: Arc<TimingSafeVerifier>,
    pub(crate) puzzle: Arc<AdmissionPuzzle>,
    pub(crate) reputation: Arc<ReputationManager>,
    pub(crate) diversity: Arc<DiversityEnforcer>,
    pub(crate) connections: Mutex<ConnectionTable>,
}

impl AdmissionService {
    /// Build the service with injected time and randomness.
    ///
    /// # Errors
    ///
    /// `ServiceError::Config` if the configuration fails validation,
    /// `ServiceError::Puzzle` if Argon2 rejects the cost parameters.
    pub fn new(
        config: AdmissionConfig,
        time: Arc<dyn TimeSource>,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, ServiceError> {
        config.validate()?;

        let verifier = Arc::new(TimingSafeVerifier::new(config.timing, Arc::clone(&random)));
        let puzzle = Arc::new(AdmissionPuzzle::new(
            config.puzzle.clone(),
            Arc::clone(&verifier),
            random,
        )?);
        let reputation = Arc::new(ReputationManager::new(config.reputation.clone(), time));
        let diversity = Arc::new(DiversityEnforcer::new(config.diversity.clone()));

        Ok(Self {
            config,
            verifier,
            puzzle,
            reputation,
            diversity,
            connections: Mutex::new(ConnectionTable::default()),
        })
    }

    /// Build the service on the system clock and thread-local RNG.
    pub fn from_config(config: AdmissionConfig) -> Result<Self, ServiceError> {
        Self::new(
            config,
            Arc::new(SystemTimeSource::new()),
            Arc::new(ThreadRandomSource::new()),
        )
    }

    /// Active configuration.
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// The timing-safe verifier, for the handshake and message layers.
    pub fn verifier(&self) -> Arc<TimingSafeVerifier> {
        Arc::clone(&self.verifier)
    }

    /// The puzzle engine, for local solution generation.
    pub fn puzzle(&self) -> Arc<AdmissionPuzzle> {
        Arc::clone(&self.puzzle)
    }

    /// The shared reputation table.
    pub fn reputation(&self) -> Arc<ReputationManager> {
        Arc::clone(&self.reputation)
    }

    /// The shared subnet table.
    pub fn diversity(&self) -> Arc<DiversityEnforcer> {
        Arc::clone(&self.diversity)
    }

    /// Open connections held by `identity`.
    pub fn connection_count(&self, identity: Identity) -> u32 {
        self.connections.lock().count(&identity)
    }

    /// Outstanding tickets.
    pub fn active_tickets(&self) -> usize {
        self.connections.lock().tickets.len()
    }
}

impl std::fmt::Debug for AdmissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionService")
            .field("config", &self.config)
            .field("reputation", &self.reputation)
            .field("diversity", &self.diversity)
            .field("active_tickets", &self.active_tickets())
            .finish()
    }
}
