//! Telemetry configuration from environment variables.

use std::env;

const DEFAULT_SERVICE_NAME: &str = "agent-mesh";
const DEFAULT_METRICS_PORT: u16 = 9100;

/// Logging and metrics settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log records
    pub service_name: String,

    /// Filter directive (trace, debug, info, warn, error, or full `EnvFilter` syntax)
    pub log_level: String,

    /// Whether to write logs to stdout
    pub console_output: bool,

    /// JSON records instead of human-readable lines
    pub json_logs: bool,

    /// Prometheus scrape port
    pub metrics_port: u16,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_port: DEFAULT_METRICS_PORT,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AM_SERVICE_NAME`: Service name (default: agent-mesh)
    /// - `AM_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `AM_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `AM_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `AM_METRICS_PORT`: Prometheus metrics port (default: 9100)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("AM_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            log_level: lookup("AM_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("AM_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("AM_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            metrics_port: lookup("AM_METRICS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_METRICS_PORT),
        }
    }

    /// Configuration for a named service, remaining fields from the environment.
    pub fn for_service(name: &str) -> Self {
        Self {
            service_name: name.to_string(),
            ..Self::from_env()
        }
    }
}
