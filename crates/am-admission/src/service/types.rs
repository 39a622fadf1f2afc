//! Pipeline request, ticket and startup error types.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::domain::{Identity, PuzzleError, PuzzleSolution, ReputationTier};

/// What a candidate peer presents during the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRequest {
    /// Raw Ed25519 public key bytes as received
    pub public_key: Vec<u8>,
    /// Solved admission puzzle
    pub solution: PuzzleSolution,
    /// Remote address of the connection
    pub address: SocketAddr,
}

impl AdmissionRequest {
    /// Bundle a candidate's raw key bytes, its solution and its remote address.
    ///
    /// The key is not decoded here; malformed bytes are reported by
    /// [`AdmissionService::admit`](super::AdmissionService::admit).
    pub fn new(
        public_key: impl Into<Vec<u8>>,
        solution: PuzzleSolution,
        address: SocketAddr,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            solution,
            address,
        }
    }
}

/// Proof of an admitted connection. Hand it back to
/// [`AdmissionService::release`](super::AdmissionService::release) on disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionTicket {
    pub id: Uuid,
    pub identity: Identity,
    pub address: SocketAddr,
    /// Tier at admission time
    pub tier: ReputationTier,
}

/// Errors raised while building the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
