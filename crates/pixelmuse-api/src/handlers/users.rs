//! User listing and management endpoints

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use pixelmuse_core::types::{PAGE_SIZE, User};
use pixelmuse_database::UserQueries;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for listing users
#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    /// Page number (1-based)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u32>,

    /// Filter by username substring
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,
}

/// Response for listing users
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// Users on the requested page, newest accounts first
    pub users: Vec<User>,

    /// Total number of users matching the filter
    pub total: i64,

    /// Requested page (1-based)
    pub page: u32,

    /// Fixed page size
    pub per_page: u32,

    /// Total number of pages (at least 1)
    pub total_pages: u32,
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// List users with pagination and an optional username filter
///
/// Users are ordered by creation time, newest first, with the id as a
/// tiebreaker. The page size is fixed at 10.
///
/// # Errors
///
/// * `BAD_REQUEST` - Invalid query parameters
/// * `INTERNAL_SERVER_ERROR` - Database query failures
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid user listing parameters: {:?}", validation_errors);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Invalid query parameters",
                "INVALID_PARAMETERS",
            )),
        ));
    }

    let page = query.page.unwrap_or(1);
    let offset = i64::from(page - 1) * i64::from(PAGE_SIZE);
    let username = query.username.as_deref();

    let users = UserQueries::list(&state.pool, username, i64::from(PAGE_SIZE), offset)
        .await
        .map_err(|e| {
            error!("Failed to list users: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string(), "DATABASE_ERROR")),
            )
        })?;

    let total = UserQueries::count(&state.pool, username).await.map_err(|e| {
        error!("Failed to count users: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string(), "DATABASE_ERROR")),
        )
    })?;

    let total_rows = u64::try_from(total).unwrap_or(0);
    let total_pages = u32::try_from(total_rows.div_ceil(u64::from(PAGE_SIZE)))
        .unwrap_or(u32::MAX)
        .max(1);

    Ok(Json(ListUsersResponse {
        users: users.into_iter().map(User::from).collect(),
        total,
        page,
        per_page: PAGE_SIZE,
        total_pages,
    }))
}

/// Suspend a user account
///
/// # Errors
///
/// * `NOT_FOUND` - No user with the given id
/// * `INTERNAL_SERVER_ERROR` - Database query failures
pub async fn suspend_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    set_suspension(&state, id, true).await?;
    Ok(Json(serde_json::json!({ "message": "User suspended" })))
}

/// Lift a user account suspension
///
/// # Errors
///
/// * `NOT_FOUND` - No user with the given id
/// * `INTERNAL_SERVER_ERROR` - Database query failures
pub async fn unsuspend_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    set_suspension(&state, id, false).await?;
    Ok(Json(serde_json::json!({ "message": "User suspension lifted" })))
}

async fn set_suspension(
    state: &AppState,
    id: Uuid,
    suspended: bool,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    UserQueries::set_suspended(&state.pool, id, suspended)
        .await
        .map_err(|e| match e {
            pixelmuse_core::Error::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(e.to_string(), "USER_NOT_FOUND")),
            ),
            _ => {
                error!("Failed to update suspension for user {id}: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(e.to_string(), "DATABASE_ERROR")),
                )
            }
        })
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_users_query_validation() {
        let valid = ListUsersQuery {
            page: Some(3),
            username: Some("ada".to_string()),
        };
        assert!(valid.validate().is_ok());

        let zero_page = ListUsersQuery {
            page: Some(0),
            username: None,
        };
        assert!(zero_page.validate().is_err());

        let empty_filter = ListUsersQuery {
            page: None,
            username: Some(String::new()),
        };
        assert!(empty_filter.validate().is_err());
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::new("boom", "DATABASE_ERROR");
        assert_eq!(response.error, "boom");
        assert_eq!(response.code, "DATABASE_ERROR");
    }

    #[test]
    fn test_list_users_response_serialization() {
        let response = ListUsersResponse {
            users: Vec::new(),
            total: 0,
            page: 1,
            per_page: PAGE_SIZE,
            total_pages: 1,
        };

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json.get("per_page").and_then(serde_json::Value::as_u64), Some(10));
        assert_eq!(json.get("total_pages").and_then(serde_json::Value::as_u64), Some(1));
    }
}
