//! Application state for the HTTP service.
//!
//! This module provides the shared state that axum handlers use to reach the
//! point store. The store is injected, never looked up globally.

use std::sync::Arc;

use thiserror::Error;

use geonear_lib::{MemoryPointStore, MongoPointStore, PointStore, StoreError};

use crate::config::{StoreBackend, StoreConfig};

/// Service name reported when none is configured.
pub const DEFAULT_SERVICE_NAME: &str = "geonear";

/// Error during application state initialization.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// MongoDB backend selected without a connection string.
    #[error("no MongoDB connection string configured")]
    MissingMongoUri,

    /// Connecting to or preparing the store failed.
    #[error("failed to initialize point store: {0}")]
    Store(#[from] StoreError),
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use geonear_lib::MemoryPointStore;
/// use geonear_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let store = state.store();
///     // ... query the store
/// }
///
/// let state = AppState::from_store(MemoryPointStore::new());
/// let app = Router::new()
///     .route("/api/users-within-radius", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PointStore>,
    service: Arc<str>,
}

impl AppState {
    /// Wrap an already shared store handle.
    pub fn new(store: Arc<dyn PointStore>) -> Self {
        Self {
            store,
            service: Arc::from(DEFAULT_SERVICE_NAME),
        }
    }

    /// Name this instance reports in health responses.
    pub fn with_service(mut self, service: impl AsRef<str>) -> Self {
        self.service = Arc::from(service.as_ref());
        self
    }

    /// Take ownership of a store.
    pub fn from_store(store: impl PointStore + 'static) -> Self {
        Self::new(Arc::new(store))
    }

    /// Build the configured backend.
    ///
    /// For MongoDB this connects, then ensures the `2dsphere` index exists.
    pub async fn connect(config: &StoreConfig) -> Result<Self, AppStateError> {
        match config.backend {
            StoreBackend::Memory => {
                tracing::warn!("using in-memory point store; data is lost on restart");
                Ok(Self::from_store(MemoryPointStore::new()))
            }
            StoreBackend::Mongo => {
                let uri = config
                    .mongo_uri
                    .as_deref()
                    .ok_or(AppStateError::MissingMongoUri)?;

                let store =
                    MongoPointStore::connect(uri, config.database.as_deref(), &config.collection)
                        .await?;
                store.ensure_indexes().await?;
                tracing::info!("connected to MongoDB point store");

                Ok(Self::from_store(store))
            }
        }
    }

    /// Access the point store.
    pub fn store(&self) -> &dyn PointStore {
        self.store.as_ref()
    }

    /// Configured service name.
    pub fn service_name(&self) -> &str {
        &self.service
    }

    /// Name of the active store backend.
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("backend", &self.store.backend())
            .finish()
    }
}
