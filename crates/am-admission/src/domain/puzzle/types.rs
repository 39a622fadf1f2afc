//! Puzzle solution and search report types.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_crypto::Ed25519Signature;

use super::security::DIGEST_LENGTH;

/// A solved admission puzzle as carried by the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSolution {
    /// Winning nonce
    pub nonce: u64,
    /// Claimed difficulty in leading zero bits
    pub difficulty: u8,
    /// Argon2id(nonce, public key)
    pub digest: [u8; DIGEST_LENGTH],
    /// Owner's signature over the challenge, if signed
    pub signature: Option<Ed25519Signature>,
}

impl PuzzleSolution {
    /// Whether the solution carries an owner signature.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct PuzzleReport {
    /// The solution
    pub solution: PuzzleSolution,
    /// Wall-clock search time (informational)
    pub elapsed: Duration,
    /// Number of digests computed
    pub attempts: u64,
}

/// Shared flag a caller flips to abort an in-flight search.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// New, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
