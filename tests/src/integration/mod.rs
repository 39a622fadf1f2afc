//! # Integration Flows
//!
//! End-to-end admission scenarios through [`am_admission::AdmissionService`].

pub mod admission_flows;
pub mod async_flows;
