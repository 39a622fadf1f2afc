//! # Shared Crypto - Identity Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE3 | Identity derivation, challenge hashing |
//! | `signatures` | Ed25519 | Peer identity keys and handshake signatures |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **BLAKE3**: Collision resistant 256-bit digests for identifiers
//!
//! Wire bytes coming from the handshake layer are untrusted. Every `from_slice`
//! constructor validates length (and curve membership for keys) and reports
//! malformed input as a `CryptoError` value.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{blake3_hash, blake3_hash_many, Blake3Hasher, Hash};
pub use signatures::{
    Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
