//! Test utilities for admission control.
//!
//! Deterministic implementations of the driven ports plus keypair helpers.
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use am_admission::test_utils::FixedTimeSource;
//! use am_admission::ports::TimeSource;
//!
//! let time = FixedTimeSource::new(1000);
//! time.advance(60);
//! assert_eq!(time.now().as_secs(), 1060);
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};

use shared_crypto::Ed25519KeyPair;

use crate::domain::Timestamp;
use crate::ports::outbound::{RandomSource, TimeSource};

/// A time source that returns a fixed, manually advanced timestamp.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    timestamp: AtomicU64,
}

impl FixedTimeSource {
    /// Create a new fixed time source at `timestamp` seconds.
    pub fn new(timestamp: u64) -> Self {
        Self {
            timestamp: AtomicU64::new(timestamp),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, secs: u64) {
        self.timestamp.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump the clock to `timestamp`.
    pub fn set(&self, timestamp: u64) {
        self.timestamp.store(timestamp, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.timestamp.load(Ordering::SeqCst))
    }
}

/// Deterministic random source.
///
/// `random_range` returns the configured value clamped into the range, and
/// `random_u64` returns it unchanged. Shuffling is either a no-op or a
/// reversal.
#[derive(Debug, Clone)]
pub struct FixedRandomSource {
    value: u64,
    reverse: bool,
}

impl FixedRandomSource {
    /// Always `value`, shuffles leave order untouched.
    pub fn new(value: u64) -> Self {
        Self {
            value,
            reverse: false,
        }
    }

    /// Always `value`, shuffles reverse the order.
    pub fn reversing(value: u64) -> Self {
        Self {
            value,
            reverse: true,
        }
    }
}

impl RandomSource for FixedRandomSource {
    fn random_range(&self, min: u64, max: u64) -> u64 {
        if max <= min {
            min
        } else {
            self.value.clamp(min, max)
        }
    }

    fn random_u64(&self) -> u64 {
        self.value
    }

    fn shuffle_indices(&self, indices: &mut [usize]) {
        if self.reverse {
            indices.reverse();
        }
    }
}

/// Deterministic keypair from a one-byte seed.
pub fn keypair(seed: u8) -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed([seed; 32])
}

/// `a.b.c.d:port` as a socket address.
pub fn socket_v4(a: u8, b: u8, c: u8, d: u8, port: u16) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(a, b, c, d)), port)
}
