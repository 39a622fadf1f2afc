//! # Admission Puzzle
//!
//! Memory-hard proof-of-work bound to a peer's public key.
//!
//! ## Construction
//!
//! `digest = Argon2id(password = nonce_le, salt = public_key)`, 64 MiB,
//! 3 passes, 32-byte output. A solution is valid at difficulty `d` when the
//! digest has at least `d` leading zero bits.
//!
//! - Generation: expected `2^d` Argon2 evaluations
//! - Verification: one evaluation, independent of `d`
//!
//! Solutions may carry the owner's Ed25519 signature over the challenge
//! (see [`challenge_message`]), checked through the Timing-Safe Verifier.

mod config;
mod security;
mod solver;
mod types;

pub use config::PuzzleConfig;
pub use security::{challenge_message, count_leading_zero_bits, MemoryHardHasher, DIGEST_LENGTH};
pub use solver::AdmissionPuzzle;
pub use types::{CancellationFlag, PuzzleReport, PuzzleSolution};
