//! # Diversity Enforcer
//!
//! Caps the share of connections from any one subnet (IPv4 /24, IPv6 /48),
//! independent of reputation.
//!
//! The cap is evaluated against the post-acceptance total: a connection is
//! admitted iff `count + 1 <= max(min_per_subnet, floor((total + 1) * share / 100))`.

mod config;
mod manager;
mod subnet;

pub use config::DiversityConfig;
pub use manager::{DiversityEnforcer, SubnetStats};
pub use subnet::SubnetKey;
