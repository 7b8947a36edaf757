use thiserror::Error;

/// Convenient result alias for the geonear library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every operation fails with exactly one of two kinds: the caller sent
/// something unusable, or the point store let us down.
#[derive(Debug, Error)]
pub enum Error {
    /// Client-caused input problem, detected before any store access.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failure reported by the persistence layer.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Whether the error was caused by the client rather than the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Rejected request input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Latitude or longitude absent from a query.
    #[error("missing coordinates: latitude and longitude are required")]
    MissingCoordinates,

    /// Latitude or longitude not a finite number or out of range.
    #[error("invalid coordinates: latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinates,

    /// Page or limit supplied but not a positive integer.
    #[error("invalid pagination: page and limit must be positive integers")]
    InvalidPagination,

    /// Insert body is missing a field or carries an unusable value.
    #[error("missing or invalid fields: name, latitude and longitude are required")]
    InvalidFields,
}

/// Failure reported by a [`PointStore`](crate::store::PointStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrapper for MongoDB driver errors (connectivity, query, write).
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    /// A stored record could not be turned into a [`Point`](crate::Point).
    #[error("store returned a malformed record: {message}")]
    MalformedRecord { message: String },

    /// The backend cannot serve requests right now.
    #[error("point store unavailable: {message}")]
    Unavailable { message: String },
}
