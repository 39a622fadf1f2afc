//! # Trust & Admission Control
//!
//! Admission control for Agent-Mesh peers. Four gates protect the network:
//!
//! - **Timing-Safe Verifier:** Ed25519 checks padded with random jitter so
//!   response time does not reveal the outcome
//! - **Admission Puzzle:** Argon2id proof-of-work bound to the peer's public
//!   key, making mass identity creation expensive
//! - **Reputation Manager:** bounded per-identity score mapped to tiers that
//!   set task and connection quotas
//! - **Diversity Enforcer:** caps the share of connections any one subnet
//!   (/24 IPv4, /48 IPv6) may hold
//!
//! [`AdmissionService`] chains them into a single `admit` call.
//!
//! ## Architecture
//!
//! Hexagonal layout:
//! - **Domain Layer:** the four components and their errors
//! - **Ports Layer:** inbound APIs per collaborator, outbound time and randomness
//! - **Adapters Layer:** system clock, thread RNG, background puzzle jobs
//! - **Service Layer:** the admission pipeline
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use am_admission::{AdmissionConfig, AdmissionRequest, AdmissionService};
//! use shared_crypto::Ed25519KeyPair;
//!
//! let service = AdmissionService::from_config(AdmissionConfig::for_testing()).unwrap();
//!
//! // Candidate side: solve and sign the puzzle
//! let keypair = Ed25519KeyPair::from_seed([7; 32]);
//! let report = service.puzzle().generate_signed(&keypair, 2).unwrap();
//!
//! // Node side: run the gates
//! let request = AdmissionRequest::new(
//!     keypair.public_key().as_bytes().to_vec(),
//!     report.solution,
//!     "10.0.0.1:4000".parse().unwrap(),
//! );
//! let ticket = service.admit(&request).unwrap();
//! service.release(&ticket).unwrap();
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

/// Test utilities (FixedTimeSource, FixedRandomSource, keypair helpers)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::{AdmissionConfig, ConfigError};

pub use domain::{
    AdmissionError, AdmissionPuzzle, CancellationFlag, DiversityConfig, DiversityEnforcer,
    DiversityError, ErrorKind, ExpectedOutcome, Identity, JitterWindow, PuzzleConfig, PuzzleError,
    PuzzleReport, PuzzleSolution, ReputationConfig, ReputationError, ReputationManager,
    ReputationSnapshot, ReputationTier, SubnetKey, SubnetStats, TaskOutcome, Timestamp,
    TimingSafeVerifier, VerificationError, VerificationRequest, VerificationResult,
};

pub use ports::{
    AdmissionMonitor, AdmissionPuzzleApi, DiversityApi, RandomSource, ReputationApi, TimeSource,
    TimingSafeVerification,
};

pub use adapters::{
    spawn_generation, spawn_signed_generation, PuzzleJob, SystemTimeSource, ThreadRandomSource,
};

pub use service::{
    AdmissionRequest, AdmissionService, AdmissionTicket, MonitorHandle, ServiceError,
};
