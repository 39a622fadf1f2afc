//! Domain Layer - admission logic with no I/O
//!
//! - Timing-Safe Verifier (jittered Ed25519 checks, shuffled batches)
//! - Admission Puzzle (Argon2id proof-of-work bound to a public key)
//! - Reputation Manager (bounded scores, derived tiers, quotas)
//! - Diversity Enforcer (subnet share cap)

pub mod diversity;
pub mod errors;
pub mod identity;
pub mod puzzle;
pub mod reputation;
pub mod timing;
pub mod value_objects;

pub use diversity::*;
pub use errors::*;
pub use identity::Identity;
pub use puzzle::*;
pub use reputation::*;
pub use timing::*;
pub use value_objects::Timestamp;
