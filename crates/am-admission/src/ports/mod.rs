//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the surface each external collaborator
//!   sees (transport, handshake, task dispatch, monitoring)
//! - **Driven Ports (Outbound):** time and randomness sources
//!
//! The monitoring port is read-only: no method on [`AdmissionMonitor`]
//! mutates state.

pub mod inbound;
pub mod outbound;

pub use inbound::{
    AdmissionMonitor, AdmissionPuzzleApi, DiversityApi, ReputationApi, TimingSafeVerification,
};
pub use outbound::{RandomSource, TimeSource};
