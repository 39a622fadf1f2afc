//! # Admission Metrics
//!
//! Prometheus metrics for admission decisions and table occupancy.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! am-admission = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `admission_attempts_total` - Counter of `admit` calls
//! - `admission_rejections_total` - Counter of rejected admissions (by reason)
//! - `signature_verifications_total` - Counter of signature checks (by outcome)
//! - `puzzle_verifications_total` - Counter of puzzle checks (by outcome)
//! - `active_connections` - Gauge of tracked connections
//! - `unique_subnets` - Gauge of occupied subnets

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total admission attempts
    pub static ref ADMISSION_ATTEMPTS: IntCounter = register_int_counter!(
        "admission_attempts_total",
        "Total number of admission attempts"
    )
    .expect("Failed to create ADMISSION_ATTEMPTS metric");

    /// Rejected admissions, labeled by error kind
    pub static ref ADMISSION_REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "admission_rejections_total",
        "Total number of rejected admissions",
        &["reason"]
    )
    .expect("Failed to create ADMISSION_REJECTIONS metric");

    /// Signature checks, labeled valid / invalid / malformed
    pub static ref SIGNATURE_VERIFICATIONS: IntCounterVec = register_int_counter_vec!(
        "signature_verifications_total",
        "Total number of timing-safe signature verifications",
        &["outcome"]
    )
    .expect("Failed to create SIGNATURE_VERIFICATIONS metric");

    /// Puzzle checks, labeled by outcome
    pub static ref PUZZLE_VERIFICATIONS: IntCounterVec = register_int_counter_vec!(
        "puzzle_verifications_total",
        "Total number of admission puzzle verifications",
        &["outcome"]
    )
    .expect("Failed to create PUZZLE_VERIFICATIONS metric");

    /// Tracked connections
    pub static ref ACTIVE_CONNECTIONS: IntGauge = register_int_gauge!(
        "active_connections",
        "Connections tracked by the diversity enforcer"
    )
    .expect("Failed to create ACTIVE_CONNECTIONS metric");

    /// Occupied subnets
    pub static ref UNIQUE_SUBNETS: IntGauge = register_int_gauge!(
        "unique_subnets",
        "Subnets with at least one tracked connection"
    )
    .expect("Failed to create UNIQUE_SUBNETS metric");
}

/// Record an admission attempt
#[cfg(feature = "metrics")]
pub fn record_admission_attempt() {
    ADMISSION_ATTEMPTS.inc();
}

/// Record a rejected admission with reason
#[cfg(feature = "metrics")]
pub fn record_admission_rejected(reason: &str) {
    ADMISSION_REJECTIONS.with_label_values(&[reason]).inc();
}

/// Record a signature check outcome
#[cfg(feature = "metrics")]
pub fn record_signature_verification(outcome: &str) {
    SIGNATURE_VERIFICATIONS.with_label_values(&[outcome]).inc();
}

/// Record a puzzle check outcome
#[cfg(feature = "metrics")]
pub fn record_puzzle_verification(outcome: &str) {
    PUZZLE_VERIFICATIONS.with_label_values(&[outcome]).inc();
}

/// Publish connection table occupancy
#[cfg(feature = "metrics")]
pub fn set_connection_gauges(total: usize, subnets: usize) {
    ACTIVE_CONNECTIONS.set(total as i64);
    UNIQUE_SUBNETS.set(subnets as i64);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_admission_attempt() {}

#[cfg(not(feature = "metrics"))]
pub fn record_admission_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_signature_verification(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_puzzle_verification(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_connection_gauges(_total: usize, _subnets: usize) {}
