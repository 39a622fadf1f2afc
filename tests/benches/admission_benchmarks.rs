//! # Agent-Mesh Admission Benchmarks
//!
//! | Gate | Claim | Target |
//! |------|-------|--------|
//! | Admission Puzzle | Verify is one hash at any difficulty | flat across difficulty |
//! | Admission Puzzle | Generation doubles per bit | ~2x per step |
//! | Timing-Safe Verifier | Latency set by jitter window | 100–500µs |
//! | Reputation / Diversity | Table updates | < 1µs |

use am_tests::benchmarks::admission::register_benchmarks;
use criterion::{criterion_group, criterion_main};

criterion_group!(benches, register_benchmarks);
criterion_main!(benches);
