//! # Admission Errors
//!
//! One error enum per component plus the pipeline-level [`AdmissionError`].
//!
//! Every condition here is local and recoverable. Callers branch on
//! [`AdmissionError::kind`] rather than on individual variants.

use std::net::SocketAddr;

use shared_crypto::CryptoError;
use thiserror::Error;

use super::diversity::SubnetKey;
use super::identity::Identity;
use super::reputation::ReputationTier;

/// Malformed input handed to the Timing-Safe Verifier.
///
/// A well-formed signature that simply does not verify is NOT an error; it
/// is reported as `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Public key has the wrong length or is not a curve point
    #[error("malformed public key: {0}")]
    MalformedPublicKey(CryptoError),

    /// Signature has the wrong length
    #[error("malformed signature: {0}")]
    MalformedSignature(CryptoError),
}

/// Admission puzzle failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PuzzleError {
    /// Public key could not be decoded
    #[error("malformed puzzle input: {0}")]
    MalformedInput(CryptoError),

    /// Difficulty outside the configured bounds
    #[error("difficulty {difficulty} outside allowed range {min}..={max}")]
    InvalidDifficulty { difficulty: u8, min: u8, max: u8 },

    /// Embedded challenge signature did not verify
    #[error("puzzle signature does not verify")]
    InvalidSignature,

    /// Digest mismatch or not enough leading zero bits
    #[error("insufficient work: required {required} leading zero bits, found {found}")]
    InsufficientWork { required: u8, found: u32 },

    /// Caller cancelled the search
    #[error("puzzle generation cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },

    /// Argon2 rejected its parameters or failed to hash
    #[error("memory-hard hash failed: {0}")]
    Hashing(String),

    /// Background worker panicked or was aborted
    #[error("puzzle worker failed: {0}")]
    WorkerFailed(String),
}

/// Reputation table failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReputationError {
    /// Identity has no reputation record
    #[error("unknown identity {0}")]
    UnknownIdentity(Identity),

    /// `register` called twice for the same identity
    #[error("identity {0} is already registered")]
    AlreadyRegistered(Identity),
}

/// Subnet diversity failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiversityError {
    /// Accepting the connection would push the subnet above its share
    #[error(
        "subnet {subnet} at capacity: {count_after} of {total_after} connections exceeds limit {limit}"
    )]
    SubnetCapacityExceeded {
        subnet: SubnetKey,
        count_after: usize,
        total_after: usize,
        limit: usize,
    },
}

/// Category of an admission failure, used by callers to pick a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad key or signature encoding; reject outright
    MalformedInput,
    /// Well-formed signature that does not verify against the presented key
    InvalidSignature,
    /// Proof-of-work missing or too weak; peer may retry with a new solution
    InsufficientWork,
    /// Reputation operation on an unregistered identity
    UnknownIdentity,
    /// Diversity cap hit; try a different peer or wait
    CapacityExceeded,
    /// Tier quota exhausted
    QuotaExceeded,
    /// Local failure unrelated to the peer's input
    Internal,
}

impl ErrorKind {
    /// Stable label for metrics and structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedInput => "malformed_input",
            Self::InvalidSignature => "invalid_signature",
            Self::InsufficientWork => "insufficient_work",
            Self::UnknownIdentity => "unknown_identity",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Internal => "internal",
        }
    }
}

/// Errors returned by the admission pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error(transparent)]
    Reputation(#[from] ReputationError),

    #[error(transparent)]
    Diversity(#[from] DiversityError),

    /// Signed solutions are mandatory and none was supplied
    #[error("puzzle solution carries no signature")]
    UnsignedSolution,

    /// Identity already holds its tier's connection allowance
    #[error("identity {identity} ({tier}) already holds {current} of {limit} connections")]
    ConnectionQuotaExceeded {
        identity: Identity,
        tier: ReputationTier,
        current: u32,
        limit: u32,
    },

    /// Identity used up its tier's task allowance for this window
    #[error("identity {identity} ({tier}) reached its task quota of {limit}")]
    TaskQuotaExceeded {
        identity: Identity,
        tier: ReputationTier,
        limit: u32,
    },

    /// Address has no connection recorded for this ticket
    #[error("no admitted connection for {0}")]
    UnknownConnection(SocketAddr),
}

impl AdmissionError {
    /// Map the error onto its failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Verification(_) | Self::UnsignedSolution => ErrorKind::MalformedInput,
            Self::Puzzle(err) => match err {
                PuzzleError::MalformedInput(_) => ErrorKind::MalformedInput,
                PuzzleError::InvalidSignature => ErrorKind::InvalidSignature,
                PuzzleError::InvalidDifficulty { .. } | PuzzleError::InsufficientWork { .. } => {
                    ErrorKind::InsufficientWork
                }
                PuzzleError::Cancelled { .. }
                | PuzzleError::Hashing(_)
                | PuzzleError::WorkerFailed(_) => ErrorKind::Internal,
            },
            Self::Reputation(ReputationError::UnknownIdentity(_)) => ErrorKind::UnknownIdentity,
            Self::Reputation(ReputationError::AlreadyRegistered(_)) => ErrorKind::Internal,
            Self::Diversity(_) => ErrorKind::CapacityExceeded,
            Self::ConnectionQuotaExceeded { .. } | Self::TaskQuotaExceeded { .. } => {
                ErrorKind::QuotaExceeded
            }
            Self::UnknownConnection(_) => ErrorKind::Internal,
        }
    }
}
