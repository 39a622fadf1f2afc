//! # Timing-Safe Verifier
//!
//! Ed25519 verification whose response time does not reveal the outcome.
//!
//! Every well-formed check is followed by a delay drawn uniformly from a
//! [`JitterWindow`] (100-500 microseconds by default), regardless of result.
//! Batches are processed in a random order and results are returned in
//! input order.
//!
//! Malformed input (bad key or signature length, key off the curve) is
//! rejected immediately with a [`VerificationError`](crate::domain::VerificationError).
//! That path is not jittered: the constant-time property covers the
//! cryptographic check only.

mod config;
mod types;
mod verifier;

pub use config::JitterWindow;
pub use types::{ExpectedOutcome, VerificationRequest, VerificationResult};
pub use verifier::TimingSafeVerifier;
