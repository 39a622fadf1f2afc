//! # Reputation Manager
//!
//! Bounded integer score per identity, mapped onto four tiers that set task
//! and connection quotas.
//!
//! - Scores are clamped to `[0, max_score]` (1000 by default)
//! - Tiers are recomputed from the score on every read, never stored
//! - Mutations on an unregistered identity fail with `UnknownIdentity` and
//!   are logged at error level

mod config;
mod manager;
mod record;
mod tier;

pub use config::ReputationConfig;
pub use manager::ReputationManager;
pub use record::{ReputationRecord, ReputationSnapshot, TaskOutcome};
pub use tier::ReputationTier;
