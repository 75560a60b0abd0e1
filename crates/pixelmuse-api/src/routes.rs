//! API route definitions

use crate::{handlers, middleware::cors, state::AppState};
use axum::{
    Router,
    body::Body,
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Build the admin data routes consumed by the dashboard
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(handlers::users::list_users))
        .route(
            "/api/users/stats",
            get(handlers::stats::get_user_stats),
        )
        .route(
            "/api/users/stats/refresh",
            post(handlers::stats::refresh_user_stats),
        )
        .route(
            "/api/users/:id/suspend",
            post(handlers::users::suspend_user),
        )
        .route(
            "/api/users/:id/unsuspend",
            post(handlers::users::unsuspend_user),
        )
        .layer(CompressionLayer::new())
}

/// Build the function routes invoked by admin tooling
///
/// The CORS layer answers preflights with an empty 200 and stamps every
/// response, success or failure, with the permissive header set.
pub fn function_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/functions/v1/get-user-emails",
            post(handlers::user_emails::get_user_emails).options(preflight),
        )
        .layer(axum::middleware::from_fn(cors::cors_middleware))
}

/// Build health check routes (no authentication required)
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// Preflight fallback when the CORS layer is bypassed
async fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    cors::apply_cors_headers(response.headers_mut());
    response
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(function_routes())
        .merge(api_routes())
        .merge(health_routes())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (StatusCode, axum::Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}
