//! # Adapters
//!
//! Production implementations of the driven ports plus the background
//! puzzle runner.

pub mod background;
pub mod random;
pub mod time;

pub use background::{spawn_generation, spawn_signed_generation, PuzzleJob};
pub use random::ThreadRandomSource;
pub use time::SystemTimeSource;
