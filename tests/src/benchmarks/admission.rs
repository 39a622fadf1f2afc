//! # Admission Gate Benchmarks
//!
//! Performance claims to validate:
//! - Puzzle verification: one Argon2id evaluation, independent of difficulty
//! - Puzzle generation: cost doubles per difficulty bit
//! - Timing-safe verification: dominated by the jitter window
//! - Reputation and diversity updates: sub-microsecond under contention-free load
//!
//! Benchmarks use the cheap test Argon2 parameters unless stated.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use am_admission::test_utils::{keypair, FixedTimeSource};
use am_admission::{
    AdmissionPuzzle, DiversityConfig, DiversityEnforcer, Identity, JitterWindow, PuzzleConfig,
    ReputationConfig, ReputationManager, ThreadRandomSource, TimingSafeVerifier,
};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};

fn puzzle(config: PuzzleConfig) -> AdmissionPuzzle {
    let random = Arc::new(ThreadRandomSource::new());
    let verifier = Arc::new(TimingSafeVerifier::new(JitterWindow::for_testing(), random.clone()));
    AdmissionPuzzle::new(config, verifier, random).expect("valid argon2 parameters")
}

/// Generation cost across difficulties, verification cost at each.
pub fn bench_puzzle(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission-puzzle");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let engine = puzzle(PuzzleConfig::for_testing());
    let signer = keypair(1);
    let public_key = signer.public_key();

    for difficulty in [2u8, 4, 6, 8] {
        group.bench_with_input(
            BenchmarkId::new("generate", difficulty),
            &difficulty,
            |b, &d| b.iter(|| black_box(engine.generate(&public_key, d).is_ok())),
        );

        let solution = engine
            .generate_signed(&signer, difficulty)
            .expect("solvable")
            .solution;
        group.bench_with_input(
            BenchmarkId::new("verify_signed", difficulty),
            &solution,
            |b, s| b.iter(|| black_box(engine.verify(s, public_key.as_bytes()).is_ok())),
        );
    }

    // production memory cost, single evaluation
    let production = puzzle(PuzzleConfig {
        min_difficulty: 1,
        ..PuzzleConfig::default()
    });
    let solution = production
        .generate(&public_key, 1)
        .expect("solvable")
        .solution;
    group.bench_function("verify_production_params", |b| {
        b.iter(|| black_box(production.verify(&solution, public_key.as_bytes()).is_ok()))
    });

    group.finish();
}

/// Jittered verification, single and batched.
pub fn bench_timing_safe_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing-safe-verifier");

    let verifier = TimingSafeVerifier::new(
        JitterWindow::default(),
        Arc::new(ThreadRandomSource::new()),
    );
    let signer = keypair(2);
    let public_key = signer.public_key();
    let message = b"benchmark handshake transcript";
    let signature = signer.sign(message);

    group.bench_function("verify_parsed", |b| {
        b.iter(|| black_box(verifier.verify_parsed(&public_key, message, &signature)))
    });

    for size in [10usize, 50] {
        let requests: Vec<_> = (0..size)
            .map(|i| {
                let message = format!("message_{i}").into_bytes();
                let signature = signer.sign(&message);
                am_admission::VerificationRequest::new(
                    public_key.as_bytes().to_vec(),
                    message,
                    signature.as_bytes().to_vec(),
                )
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch_verify", size), &requests, |b, r| {
            b.iter(|| black_box(verifier.batch_verify(r)))
        });
    }

    group.finish();
}

/// Score updates and subnet table churn.
pub fn bench_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission-tables");

    let reputation = ReputationManager::new(
        ReputationConfig::default(),
        Arc::new(FixedTimeSource::new(0)),
    );
    let identities: Vec<_> = (0..1_000u32)
        .map(|i| {
            let mut bytes = [0u8; 32];
            bytes[..4].copy_from_slice(&i.to_le_bytes());
            let identity = Identity::from_bytes(bytes);
            reputation.register(identity).expect("fresh identity");
            identity
        })
        .collect();

    let mut next = 0usize;
    group.bench_function("reputation_increase", |b| {
        b.iter(|| {
            next = (next + 1) % identities.len();
            black_box(reputation.increase(identities[next], 1).is_ok())
        })
    });

    let diversity = DiversityEnforcer::new(DiversityConfig::default());
    for i in 0..200u16 {
        let address = IpAddr::V4(Ipv4Addr::new(10, (i >> 8) as u8, i as u8, 1));
        diversity.add_connection(address).expect("distinct subnets");
    }
    let churn = IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1));
    group.bench_function("diversity_add_remove", |b| {
        b.iter(|| {
            let added = diversity.add_connection(churn).is_ok();
            black_box(diversity.remove_connection(churn) && added)
        })
    });

    group.finish();
}

/// Register every admission benchmark group.
pub fn register_benchmarks(c: &mut Criterion) {
    bench_puzzle(c);
    bench_timing_safe_verification(c);
    bench_tables(c);
}
