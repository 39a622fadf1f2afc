//! Wall-clock time adapter.

use crate::domain::Timestamp;
use crate::ports::TimeSource;

/// Production time source backed by `SystemTime`.
///
/// ```rust
/// use am_admission::adapters::SystemTimeSource;
/// use am_admission::ports::TimeSource;
///
/// let now = SystemTimeSource::new().now();
/// assert!(now.as_secs() > 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Create a new system time source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        Timestamp::new(duration.as_secs())
    }
}
