//! # Agent-Mesh Telemetry
//!
//! Logging bootstrap and Prometheus exposition shared by Agent-Mesh services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use am_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("logging already initialised");
//!
//!     // Application code; `tracing` events now reach the subscriber
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AM_SERVICE_NAME` | `agent-mesh` | Service name in log records |
//! | `AM_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `AM_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `AM_CONSOLE_OUTPUT` | `true` | Emit to stdout at all |
//! | `AM_METRICS_PORT` | `9100` | Port for the Prometheus scrape endpoint |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{encode_metrics, CONTENT_TYPE};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or the filter is invalid
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Gathered metrics could not be rendered
    #[error("failed to encode metrics: {0}")]
    MetricsEncode(String),
}
