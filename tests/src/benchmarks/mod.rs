//! # Admission Benchmarks
//!
//! Criterion groups per gate, registered from `benches/admission_benchmarks.rs`.

pub mod admission;
