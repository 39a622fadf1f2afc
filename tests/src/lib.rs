//! # Agent-Mesh Admission Test Suite
//!
//! Unified test crate for the admission subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion groups, driven from benches/
//! ├── exploits/         # Attack simulations against the admission gates
//! │   ├── sybil.rs      # Mass identity creation
//! │   ├── eclipse.rs    # Subnet concentration
//! │   └── timing.rs     # Verification timing oracle
//! └── integration/      # Cross-component flows through AdmissionService
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p am-tests
//!
//! # By category
//! cargo test -p am-tests integration::
//! cargo test -p am-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p am-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod exploits;
pub mod fixtures;
pub mod integration;
