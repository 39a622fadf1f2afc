//! # Attack Simulations
//!
//! Adversarial scenarios against the admission gates. Each test states the
//! attack, then asserts the bound the gates guarantee.

pub mod eclipse;
pub mod sybil;
pub mod timing;
