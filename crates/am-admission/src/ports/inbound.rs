//! # Driving Ports (Inbound API)
//!
//! One trait per external collaborator, each implemented by the matching
//! domain component:
//!
//! | Collaborator | Port | Implementor |
//! |---|---|---|
//! | Identity/handshake layer | [`AdmissionPuzzleApi`] | `AdmissionPuzzle` |
//! | Handshake / message layer | [`TimingSafeVerification`] | `TimingSafeVerifier` |
//! | Task dispatch | [`ReputationApi`] | `ReputationManager` |
//! | Transport | [`DiversityApi`] | `DiversityEnforcer` |
//! | Monitoring | [`AdmissionMonitor`] | `MonitorHandle` |

use std::net::IpAddr;

use async_trait::async_trait;
use shared_crypto::Ed25519PublicKey;

use crate::domain::{
    AdmissionPuzzle, DiversityEnforcer, DiversityError, Identity, PuzzleError, PuzzleReport,
    PuzzleSolution, ReputationError, ReputationManager, ReputationTier, SubnetKey, SubnetStats,
    TimingSafeVerifier, VerificationRequest, VerificationResult,
};

/// Signature checks with outcome-independent timing.
#[async_trait]
pub trait TimingSafeVerification: Send + Sync {
    /// Verify, blocking the calling thread for the jitter.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> VerificationResult;

    /// Verify, suspending the calling task for the jitter.
    async fn verify_async(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> VerificationResult;

    /// Verify a batch in random order; results follow input order.
    fn batch_verify(&self, requests: &[VerificationRequest]) -> Vec<VerificationResult>;

    /// Async variant of `batch_verify`.
    async fn batch_verify_async(&self, requests: &[VerificationRequest])
        -> Vec<VerificationResult>;
}

/// Admission puzzle surface used during the handshake.
pub trait AdmissionPuzzleApi: Send + Sync {
    /// Search for a solution (expensive).
    fn generate(
        &self,
        public_key: &Ed25519PublicKey,
        difficulty: u8,
    ) -> Result<PuzzleReport, PuzzleError>;

    /// Check a solution (one hash evaluation).
    fn verify(&self, solution: &PuzzleSolution, public_key: &[u8]) -> Result<(), PuzzleError>;
}

/// Reputation surface used by task dispatch.
pub trait ReputationApi: Send + Sync {
    /// Create a record at the starting score.
    fn register(&self, identity: Identity) -> Result<(), ReputationError>;

    /// Raise the score, clamped at the maximum.
    fn increase(&self, identity: Identity, amount: u32) -> Result<u32, ReputationError>;

    /// Lower the score, clamped at zero.
    fn decrease(&self, identity: Identity, amount: u32) -> Result<u32, ReputationError>;

    /// Current tier.
    fn tier(&self, identity: Identity) -> Result<ReputationTier, ReputationError>;

    /// Whether one more task fits under the tier quota.
    fn can_accept_task(
        &self,
        identity: Identity,
        current_task_count: u32,
    ) -> Result<bool, ReputationError>;
}

/// Connection lifecycle surface used by the transport layer.
pub trait DiversityApi: Send + Sync {
    /// Advisory check before dialing or accepting.
    fn can_connect(&self, address: IpAddr) -> Result<(), DiversityError>;

    /// Atomic check-and-commit.
    fn add_connection(&self, address: IpAddr) -> Result<SubnetKey, DiversityError>;

    /// Forget one connection; `false` if none was tracked.
    fn remove_connection(&self, address: IpAddr) -> bool;

    /// Connections from the subnet of `address`.
    fn subnet_connection_count(&self, address: IpAddr) -> usize;

    /// Occupied subnets.
    fn unique_subnets(&self) -> usize;
}

/// Read-only introspection for metrics exporters.
pub trait AdmissionMonitor: Send + Sync {
    /// Connections from the subnet of `address`.
    fn subnet_connection_count(&self, address: IpAddr) -> usize;

    /// Occupied subnets.
    fn unique_subnets(&self) -> usize;

    /// Connections across all subnets.
    fn total_connections(&self) -> usize;

    /// Per-subnet occupancy, largest first.
    fn subnet_stats(&self) -> Vec<SubnetStats>;

    /// Score of a registered identity.
    fn score(&self, identity: Identity) -> Option<u32>;

    /// Tier of a registered identity.
    fn tier(&self, identity: Identity) -> Option<ReputationTier>;

    /// Registered identities.
    fn identity_count(&self) -> usize;
}

#[async_trait]
impl TimingSafeVerification for TimingSafeVerifier {
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> VerificationResult {
        TimingSafeVerifier::verify(self, public_key, message, signature)
    }

    async fn verify_async(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> VerificationResult {
        TimingSafeVerifier::verify_async(self, public_key, message, signature).await
    }

    fn batch_verify(&self, requests: &[VerificationRequest]) -> Vec<VerificationResult> {
        TimingSafeVerifier::batch_verify(self, requests)
    }

    async fn batch_verify_async(
        &self,
        requests: &[VerificationRequest],
    ) -> Vec<VerificationResult> {
        TimingSafeVerifier::batch_verify_async(self, requests).await
    }
}

impl AdmissionPuzzleApi for AdmissionPuzzle {
    fn generate(
        &self,
        public_key: &Ed25519PublicKey,
        difficulty: u8,
    ) -> Result<PuzzleReport, PuzzleError> {
        AdmissionPuzzle::generate(self, public_key, difficulty)
    }

    fn verify(&self, solution: &PuzzleSolution, public_key: &[u8]) -> Result<(), PuzzleError> {
        AdmissionPuzzle::verify(self, solution, public_key)
    }
}

impl ReputationApi for ReputationManager {
    fn register(&self, identity: Identity) -> Result<(), ReputationError> {
        ReputationManager::register(self, identity)
    }

    fn increase(&self, identity: Identity, amount: u32) -> Result<u32, ReputationError> {
        ReputationManager::increase(self, identity, amount)
    }

    fn decrease(&self, identity: Identity, amount: u32) -> Result<u32, ReputationError> {
        ReputationManager::decrease(self, identity, amount)
    }

    fn tier(&self, identity: Identity) -> Result<ReputationTier, ReputationError> {
        ReputationManager::tier(self, identity)
    }

    fn can_accept_task(
        &self,
        identity: Identity,
        current_task_count: u32,
    ) -> Result<bool, ReputationError> {
        ReputationManager::can_accept_task(self, identity, current_task_count)
    }
}

impl DiversityApi for DiversityEnforcer {
    fn can_connect(&self, address: IpAddr) -> Result<(), DiversityError> {
        DiversityEnforcer::can_connect(self, address)
    }

    fn add_connection(&self, address: IpAddr) -> Result<SubnetKey, DiversityError> {
        DiversityEnforcer::add_connection(self, address)
    }

    fn remove_connection(&self, address: IpAddr) -> bool {
        DiversityEnforcer::remove_connection(self, address)
    }

    fn subnet_connection_count(&self, address: IpAddr) -> usize {
        DiversityEnforcer::subnet_connection_count(self, address)
    }

    fn unique_subnets(&self) -> usize {
        DiversityEnforcer::unique_subnets(self)
    }
}
