//! Shared infrastructure for the geonear HTTP service.
//!
//! This crate provides the HTTP glue around `geonear-lib`:
//!
//! - [`AppState`]: Injected point store handle shared by all handlers
//! - [`ServiceConfig`]: Environment-driven configuration
//! - [`ApiError`]: `{"error": "..."}` responses for validation and store failures
//! - Request types with validated construction for each endpoint
//! - [`health`]: Liveness and readiness probes
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//!
//! # Architecture
//!
//! Handlers stay thin; every rule about coordinates, distances and paging
//! lives in `geonear-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract query string / JSON body                         │
//! │  - Validate into typed library inputs                       │
//! │  - Call geonear-lib with the injected PointStore            │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides instrumented and failing stores for
//! handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

mod config;
mod error;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig, StoreBackend, StoreConfig};
pub use error::{from_lib_error, ApiError, INTERNAL_ERROR_MESSAGE};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_nearby_matches, record_nearby_query,
    record_point_inserted, record_request_failed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use request::{AddPointRequest, CoordinateInput, NearbyParams, Validate};
pub use state::{AppState, AppStateError, DEFAULT_SERVICE_NAME};
