//! Peer identities.
//!
//! An [`Identity`] is the BLAKE3-256 digest of a peer's Ed25519 public key.
//! The subsystem only ever derives and compares identities; it never mutates
//! one after creation.

use serde::{Deserialize, Serialize};
use shared_crypto::{blake3_hash, Ed25519PublicKey};
use std::fmt;

/// Public-key-derived peer identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Derive the identity of a public key.
    pub fn from_public_key(public_key: &Ed25519PublicKey) -> Self {
        Self(blake3_hash(public_key.as_bytes()))
    }

    /// Wrap raw identity bytes (already derived elsewhere).
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Short form used in log lines: first 8 bytes as hex.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl From<&Ed25519PublicKey> for Identity {
    fn from(public_key: &Ed25519PublicKey) -> Self {
        Self::from_public_key(public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::Ed25519KeyPair;

    #[test]
    fn test_identity_is_stable_per_key() {
        let key = Ed25519KeyPair::from_seed([1u8; 32]).public_key();
        assert_eq!(Identity::from_public_key(&key), Identity::from(&key));
    }

    #[test]
    fn test_distinct_keys_give_distinct_identities() {
        let a = Ed25519KeyPair::from_seed([1u8; 32]).public_key();
        let b = Ed25519KeyPair::from_seed([2u8; 32]).public_key();
        assert_ne!(Identity::from_public_key(&a), Identity::from_public_key(&b));
    }

    #[test]
    fn test_display_is_short_hex() {
        let id = Identity::from_bytes([0xAB; 32]);
        assert_eq!(id.to_string(), "abababababababab");
        assert_eq!(id.to_hex().len(), 64);
    }
}
