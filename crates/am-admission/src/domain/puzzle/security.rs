//! Memory-hard digest and challenge encoding.

use argon2::{Algorithm, Argon2, Params, Version};
use shared_crypto::Ed25519PublicKey;

use super::config::PuzzleConfig;
use crate::domain::errors::PuzzleError;

/// Length of the Argon2id output.
pub const DIGEST_LENGTH: usize = 32;

/// Domain separation tag for challenge signatures.
const CHALLENGE_DOMAIN: &[u8] = b"agent-mesh/admission-puzzle/v1";

/// Argon2id instance bound to one parameter set.
///
/// Password is the little-endian nonce, salt is the 32-byte public key, so
/// a digest is only meaningful for the key it was computed under.
#[derive(Clone)]
pub struct MemoryHardHasher {
    argon2: Argon2<'static>,
}

impl MemoryHardHasher {
    /// Build a hasher, rejecting parameters Argon2 considers invalid.
    pub fn new(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        let params = Params::new(
            config.memory_kib,
            config.time_cost,
            config.parallelism,
            Some(DIGEST_LENGTH),
        )
        .map_err(|e| PuzzleError::Hashing(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Argon2id(nonce, public key).
    pub fn digest(
        &self,
        public_key: &Ed25519PublicKey,
        nonce: u64,
    ) -> Result<[u8; DIGEST_LENGTH], PuzzleError> {
        let mut out = [0u8; DIGEST_LENGTH];
        self.argon2
            .hash_password_into(&nonce.to_le_bytes(), public_key.as_bytes(), &mut out)
            .map_err(|e| PuzzleError::Hashing(e.to_string()))?;
        Ok(out)
    }
}

impl std::fmt::Debug for MemoryHardHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHardHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

/// Count leading zero bits in a byte slice.
pub fn count_leading_zero_bits(bytes: &[u8]) -> u32 {
    let mut count = 0u32;
    for &byte in bytes {
        if byte == 0 {
            count += 8;
        } else {
            count += byte.leading_zeros();
            break;
        }
    }
    count
}

/// Bytes signed by the puzzle owner.
///
/// `tag || public key || difficulty || nonce (LE) || digest`
pub fn challenge_message(
    public_key: &Ed25519PublicKey,
    difficulty: u8,
    nonce: u64,
    digest: &[u8; DIGEST_LENGTH],
) -> Vec<u8> {
    let mut message = Vec::with_capacity(CHALLENGE_DOMAIN.len() + 32 + 1 + 8 + DIGEST_LENGTH);
    message.extend_from_slice(CHALLENGE_DOMAIN);
    message.extend_from_slice(public_key.as_bytes());
    message.push(difficulty);
    message.extend_from_slice(&nonce.to_le_bytes());
    message.extend_from_slice(digest);
    message
}
