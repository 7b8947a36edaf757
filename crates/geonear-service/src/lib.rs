//! geonear proximity search HTTP service.
//!
//! This service stores named points and answers "who is near me" queries.
//!
//! # Endpoints
//!
//! - `GET /api/users-within-radius` - Points within 10 km, nearest first, paginated
//! - `POST /api/add-user` - Store a named point
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe (pings the store)

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use geonear_lib::{find_nearby, Error as LibError, NearbyPage, Point, ValidationError};
use geonear_service_shared::{
    from_lib_error, health_live, health_ready, metrics_handler, record_nearby_matches,
    record_nearby_query, record_point_inserted, record_request_failed, AddPointRequest, ApiError,
    AppState, MetricsLayer, NearbyParams, RequestId, Validate,
};

/// Path of the proximity query endpoint.
pub const NEARBY_PATH: &str = "/api/users-within-radius";

/// Path of the insert endpoint.
pub const ADD_POINT_PATH: &str = "/api/add-user";

/// Optional router features.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Where to expose Prometheus metrics; `None` disables the endpoint.
    pub metrics_path: Option<String>,
    /// Allow cross-origin requests from any origin.
    pub cors_permissive: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            metrics_path: Some("/metrics".to_string()),
            cors_permissive: false,
        }
    }
}

/// HTTP response - either success or an `{"error": ...}` body.
#[derive(Debug)]
enum Response<T> {
    Success(T),
    Error(ApiError),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(error) => error.into_response(),
        }
    }
}

/// Build the service router around an injected store.
pub fn router(state: AppState, options: RouterOptions) -> Router {
    let mut app = Router::new()
        .route(NEARBY_PATH, get(users_within_radius))
        .route(ADD_POINT_PATH, post(add_point))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if let Some(path) = options.metrics_path.as_deref() {
        app = app.route(path, get(metrics_handler));
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state);

    if options.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

fn failure_reason(err: &LibError) -> &'static str {
    if err.is_validation() {
        "validation_error"
    } else {
        "store_error"
    }
}

/// Reject a request before touching the store.
fn reject(error: ValidationError, operation: &str, request_id: &RequestId) -> ApiError {
    warn!(request_id = %request_id, operation = operation, error = %error, "rejected invalid request");
    record_request_failed("validation_error", operation);
    ApiError::from(error)
}

/// Handle GET /api/users-within-radius requests.
async fn users_within_radius(
    State(state): State<AppState>,
    request_id: RequestId,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> Response<NearbyPage> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "unreadable query string");
            record_request_failed("validation_error", "nearby");
            return Response::Error(ApiError::bad_request(format!(
                "invalid query string: {}",
                rejection.body_text()
            )));
        }
    };

    info!(
        request_id = %request_id,
        latitude = ?params.latitude,
        longitude = ?params.longitude,
        page = ?params.page,
        limit = ?params.limit,
        "handling nearby request"
    );

    let query = match params.validate() {
        Ok(query) => query,
        Err(error) => return Response::Error(reject(error, "nearby", &request_id)),
    };

    match find_nearby(state.store(), &query).await {
        Ok(page) => {
            record_nearby_query(state.backend());
            record_nearby_matches(page.total_users);
            info!(
                request_id = %request_id,
                total = page.total_users,
                returned = page.users.len(),
                page = page.current_page,
                "nearby query completed"
            );
            Response::Success(page)
        }
        Err(e) => {
            record_request_failed(failure_reason(&e), "nearby");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Handle POST /api/add-user requests.
async fn add_point(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<AddPointRequest>, JsonRejection>,
) -> Response<Point> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "unreadable insert body");
            return Response::Error(reject(ValidationError::InvalidFields, "insert", &request_id));
        }
    };

    let new_point = match request.validate() {
        Ok(point) => point,
        Err(error) => return Response::Error(reject(error, "insert", &request_id)),
    };

    match state.store().save(new_point).await {
        Ok(point) => {
            record_point_inserted(state.backend());
            info!(
                request_id = %request_id,
                id = %point.id,
                name = %point.name,
                "point stored"
            );
            Response::Success(point)
        }
        Err(e) => {
            let e = LibError::from(e);
            record_request_failed(failure_reason(&e), "insert");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}
