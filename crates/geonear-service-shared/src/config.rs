//! Environment-driven service configuration.
//!
//! # Environment Variables
//!
//! - `PORT`: HTTP port (default: 3000)
//! - `STORE_BACKEND`: `mongo` (default) or `memory`
//! - `MONGO_URI`: MongoDB connection string (required for `mongo`)
//! - `MONGO_DATABASE`: Database name (default: from URI, else `test`)
//! - `MONGO_COLLECTION`: Collection name (default: `users`)
//! - `CORS_PERMISSIVE`: Allow any origin when `true` (default: false)

use std::collections::HashMap;
use std::str::FromStr;

use geonear_lib::DEFAULT_COLLECTION;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Invalid or incomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `PORT` is not a valid TCP port.
    #[error("invalid PORT value '{value}'")]
    InvalidPort { value: String },

    /// `STORE_BACKEND` names an unknown backend.
    #[error("unknown STORE_BACKEND '{value}'; expected 'mongo' or 'memory'")]
    UnknownBackend { value: String },

    /// The MongoDB backend was selected without a connection string.
    #[error("MONGO_URI is required when STORE_BACKEND is 'mongo'")]
    MissingMongoUri,
}

/// Which point store backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// MongoDB with a `2dsphere` index (default).
    #[default]
    Mongo,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::UnknownBackend {
                value: s.to_string(),
            }),
        }
    }
}

/// Point store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Connection string; always present for [`StoreBackend::Mongo`].
    pub mongo_uri: Option<String>,
    /// Explicit database name, overriding the URI default.
    pub database: Option<String>,
    pub collection: String,
}

impl StoreConfig {
    /// Configuration for a process-local store.
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            mongo_uri: None,
            database: None,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub port: u16,
    pub store: StoreConfig,
    pub cors_permissive: bool,
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Build configuration from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let backend = match get("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::default(),
        };

        let mongo_uri = get("MONGO_URI");
        if backend == StoreBackend::Mongo && mongo_uri.is_none() {
            return Err(ConfigError::MissingMongoUri);
        }

        let store = StoreConfig {
            backend,
            mongo_uri,
            database: get("MONGO_DATABASE"),
            collection: get("MONGO_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        };

        let cors_permissive = get("CORS_PERMISSIVE")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            port,
            store,
            cors_permissive,
        })
    }
}
