//! Shared builders for the suite.

use std::net::SocketAddr;
use std::sync::Arc;

use am_admission::test_utils::{keypair, FixedTimeSource};
use am_admission::{
    AdmissionConfig, AdmissionRequest, AdmissionService, Identity, ThreadRandomSource,
};
use shared_crypto::Ed25519KeyPair;

/// Difficulty cheap enough to solve thousands of times per test run.
pub const TEST_DIFFICULTY: u8 = 2;

/// Service on test parameters and a controllable clock.
pub fn test_service() -> (Arc<AdmissionService>, Arc<FixedTimeSource>) {
    service_with(AdmissionConfig::for_testing())
}

/// Service on `config` and a controllable clock.
pub fn service_with(config: AdmissionConfig) -> (Arc<AdmissionService>, Arc<FixedTimeSource>) {
    let time = Arc::new(FixedTimeSource::new(1_700_000_000));
    let service = AdmissionService::new(config, time.clone(), Arc::new(ThreadRandomSource::new()))
        .expect("test config is valid");
    (Arc::new(service), time)
}

/// Solve, sign and wrap a request for `keypair` at `address`.
pub fn request_for(
    service: &AdmissionService,
    keypair: &Ed25519KeyPair,
    address: SocketAddr,
) -> AdmissionRequest {
    let report = service
        .puzzle()
        .generate_signed(keypair, TEST_DIFFICULTY)
        .expect("puzzle solves");
    AdmissionRequest::new(keypair.public_key().as_bytes().to_vec(), report.solution, address)
}

/// Request from the deterministic keypair seeded with `seed`.
pub fn seeded_request(
    service: &AdmissionService,
    seed: u8,
    address: SocketAddr,
) -> AdmissionRequest {
    request_for(service, &keypair(seed), address)
}

/// Identity of the deterministic keypair seeded with `seed`.
pub fn seeded_identity(seed: u8) -> Identity {
    Identity::from_public_key(&keypair(seed).public_key())
}
