//! Prometheus metrics for the geonear service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//! - Business metric helpers for inserts and proximity queries
//!
//! # Example
//!
//! ```no_run
//! use geonear_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route(&config.path, get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH")
            .ok()
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    #[error("metrics are disabled")]
    Disabled,
    /// The recorder has already been installed.
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the Prometheus metrics recorder.
///
/// Must be called once at startup before any metrics are recorded; later
/// calls fail with [`MetricsError::AlreadyInitialized`].
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record a successfully stored point.
///
/// Increments `geonear_points_inserted_total`.
pub fn record_point_inserted(backend: &str) {
    metrics::counter!(
        "geonear_points_inserted_total",
        "backend" => backend.to_string()
    )
    .increment(1);
}

/// Record a completed proximity query.
///
/// Increments `geonear_nearby_queries_total`.
pub fn record_nearby_query(backend: &str) {
    metrics::counter!(
        "geonear_nearby_queries_total",
        "backend" => backend.to_string()
    )
    .increment(1);
}

/// Record how many points matched a proximity query across all pages.
///
/// Records to the `geonear_nearby_matches` histogram.
pub fn record_nearby_matches(count: usize) {
    metrics::histogram!("geonear_nearby_matches").record(count as f64);
}

/// Record a failed request.
///
/// Increments `geonear_requests_failed_total`.
///
/// # Arguments
///
/// * `reason` - "validation_error" or "store_error"
/// * `operation` - "nearby" or "insert"
pub fn record_request_failed(reason: &str, operation: &str) {
    metrics::counter!(
        "geonear_requests_failed_total",
        "reason" => reason.to_string(),
        "operation" => operation.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_format() {
        let output = metrics_handler().await;
        assert!(
            output.contains('#') || output.is_empty(),
            "metrics output should be Prometheus text or the not-initialized marker"
        );
    }

    // Without an installed recorder these are no-ops; they must not panic.
    #[test]
    fn test_business_metrics_record() {
        record_point_inserted("memory");
        record_nearby_query("memory");
        record_nearby_matches(0);
        record_nearby_matches(42);
        record_request_failed("validation_error", "nearby");
        record_request_failed("store_error", "insert");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
