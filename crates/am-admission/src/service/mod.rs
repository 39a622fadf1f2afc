//! # Admission Service
//!
//! Composes the four gates into the admission pipeline:
//!
//! ```text
//! AdmissionRequest
//!   → puzzle verify (embedded signature through the timing-safe verifier)
//!   → register identity (existing records reused)
//!   → tier connection quota
//!   → diversity add_connection
//!   → AdmissionTicket
//! ```
//!
//! After admission the service is the task lifecycle façade for the
//! dispatcher and hands out a read-only [`MonitorHandle`].
//!
//! Share it as `Arc<AdmissionService>`; all methods take `&self`.

mod admission;
mod core;
mod monitor;
mod tasks;
mod types;

pub use core::AdmissionService;
pub use monitor::MonitorHandle;
pub use types::{AdmissionRequest, AdmissionTicket, ServiceError};
