//! User email lookup function
//!
//! Stateless request handler resolving opaque user id strings to email
//! addresses through the backend `get_user_emails` procedure. Invoked
//! out-of-process by admin tooling; the CORS layer answers preflights and
//! stamps every response.

use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, warn};

/// Error body returned for malformed input
pub const INVALID_USER_IDS_ERROR: &str = "Invalid or missing user_ids parameter";

/// Fallback message for downstream failures without one of their own
pub const GENERIC_FAILURE_ERROR: &str = "Internal server error";

/// Extract a validated id list from the request payload
///
/// `user_ids` must be present, an array, non-empty and all strings;
/// anything else is a validation failure.
fn parse_user_ids(payload: &Value) -> Option<Vec<String>> {
    let ids = payload.get("user_ids")?.as_array()?;
    if ids.is_empty() {
        return None;
    }

    ids.iter()
        .map(|id| id.as_str().map(String::from))
        .collect()
}

/// Resolve user ids to email addresses
///
/// `POST` with body `{"user_ids": ["id", ...]}`. Returns the procedure
/// result verbatim as `{"data": ...}`, a 400 for malformed `user_ids`,
/// and a 500 for anything that fails downstream — including a body that
/// is not JSON at all. No retry, no caching, and no limit on the size of
/// the id list; it is passed through as-is.
pub async fn get_user_emails(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Email lookup request body was not valid JSON: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    let Some(user_ids) = parse_user_ids(&payload) else {
        warn!("Email lookup rejected: invalid or missing user_ids");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": INVALID_USER_IDS_ERROR })),
        );
    };

    match state.directory.get_user_emails(&user_ids).await {
        Ok(data) => (StatusCode::OK, Json(json!({ "data": data }))),
        Err(e) => {
            error!("Email lookup procedure failed: {e}");
            let message = e.to_string();
            let message = if message.is_empty() {
                GENERIC_FAILURE_ERROR.to_string()
            } else {
                message
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
        }
    }
}
