//! Prometheus text exposition.
//!
//! Instrumented crates register their collectors with the default
//! `prometheus` registry; this module renders whatever is registered there
//! for a scrape endpoint.

use prometheus::{Encoder, TextEncoder};

use crate::TelemetryError;

/// `Content-Type` header value for the rendered text.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Encode all metrics in the default registry as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}
