//! Health check handlers for container orchestration probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses. Readiness pings the point store.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Active point store backend (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_backend: Option<String>,

    /// Whether the store answered a ping (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_reachable: Option<bool>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            store_backend: None,
            store_reachable: None,
        }
    }

    /// Create a ready status for a reachable store.
    pub fn ready(service: &str, version: &str, backend: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            store_backend: Some(backend.to_string()),
            store_reachable: Some(true),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, backend: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            store_backend: Some(backend.to_string()),
            store_reachable: Some(false),
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK while the process is serving requests. Does not touch the
/// store.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"geonear","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service_name(), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK when the point store answers a ping, 503 otherwise.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"geonear","version":"0.1.0","store_backend":"mongo","store_reachable":true}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = state.service_name();
    let version = env!("CARGO_PKG_VERSION");
    let backend = state.backend();

    match state.store().ping().await {
        Ok(()) => {
            let status = HealthStatus::ready(service, version, backend);
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, backend = backend, "readiness check failed");
            let status = HealthStatus::not_ready(service, version, backend, "store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
