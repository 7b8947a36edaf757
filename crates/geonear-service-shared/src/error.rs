//! Error responses for the HTTP API.
//!
//! Every failure is reported as `{"error": "<message>"}` with a 400 status
//! for client mistakes and a 500 status for store failures. Store details
//! never leak to the client; they are logged server-side instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use geonear_lib::{Error as LibError, ValidationError};

/// Message returned to clients for any server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error body returned by every endpoint.
///
/// # Example
///
/// ```
/// use geonear_service_shared::ApiError;
/// use axum::http::StatusCode;
///
/// let error = ApiError::bad_request("missing coordinates");
/// assert_eq!(error.status(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(skip)]
    status: u16,

    /// Human-readable description of the problem.
    pub error: String,
}

impl ApiError {
    /// Create an error with an explicit status code.
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: error.into(),
        }
    }

    /// Create a 400 Bad Request error.
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// Create a 400 Bad Request error from a validation failure.
    pub fn validation(error: &ValidationError) -> Self {
        Self::bad_request(error.to_string())
    }

    /// Create a 500 Internal Server Error with the generic message.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    /// Create a 503 Service Unavailable error.
    pub fn service_unavailable(error: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, error)
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::validation(&error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Convert library errors to API errors.
///
/// Store failures are logged here with the request ID, since the client only
/// ever sees the generic message.
pub fn from_lib_error(err: &LibError, request_id: &str) -> ApiError {
    match err {
        LibError::Validation(validation) => ApiError::validation(validation),
        LibError::Store(store) => {
            error!(request_id = %request_id, error = %store, "point store failure");
            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geonear_lib::StoreError;

    #[test]
    fn test_bad_request_serializes_error_only() {
        let error = ApiError::bad_request("invalid pagination");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json, serde_json::json!({"error": "invalid pagination"}));
    }

    #[test]
    fn test_validation_uses_descriptive_message() {
        let error = ApiError::from(ValidationError::MissingCoordinates);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.error.starts_with("missing coordinates"));
    }

    #[test]
    fn test_from_lib_error_store_is_generic_500() {
        let err = LibError::Store(StoreError::Unavailable {
            message: "mongo down at 10.0.0.5".to_string(),
        });
        let api = from_lib_error(&err, "req-1");
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, INTERNAL_ERROR_MESSAGE);
        assert!(!api.error.contains("10.0.0.5"));
    }

    #[test]
    fn test_from_lib_error_validation_is_400() {
        let err = LibError::Validation(ValidationError::InvalidCoordinates);
        let api = from_lib_error(&err, "req-2");
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert!(api.error.contains("invalid coordinates"));
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::internal().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
