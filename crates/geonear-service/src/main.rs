//! geonear service binary.
//!
//! # Configuration
//!
//! - `PORT` - HTTP port (default: 3000)
//! - `STORE_BACKEND` - `mongo` (default) or `memory`
//! - `MONGO_URI` - MongoDB connection string (required for `mongo`)
//! - `MONGO_DATABASE` - Database name (default: from the URI, else `test`)
//! - `MONGO_COLLECTION` - Collection name (default: `users`)
//! - `CORS_PERMISSIVE` - Allow any origin (default: false)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//!
//! Variables may also come from a `.env` file in the working directory.

use std::net::SocketAddr;

use tracing::{error, info, warn};

use geonear_service::{router, RouterOptions};
use geonear_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real environment variables win.
    let dotenv = dotenvy::dotenv();

    let logging_config = LoggingConfig::from_env().with_service("geonear");
    init_logging(&logging_config)?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        e
    })?;

    info!(
        port = config.port,
        backend = ?config.store.backend,
        collection = %config.store.collection,
        "starting geonear service"
    );

    let state = AppState::connect(&config.store)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to connect to point store");
            e
        })?
        .with_service(logging_config.service_name());

    info!(backend = state.backend(), "point store ready");

    let app = router(
        state,
        RouterOptions {
            metrics_path: metrics_config
                .enabled
                .then(|| metrics_config.path.clone()),
            cors_permissive: config.cors_permissive,
        },
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
