//! Per-user generation statistics endpoints

use crate::handlers::users::ErrorResponse;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use pixelmuse_core::types::UserStats;
use pixelmuse_database::{StatsQueries, refresh_user_details};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Response carrying the derived user-details rows
#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatsResponse {
    /// Per-user statistics, most active users first
    pub stats: Vec<UserStats>,

    /// When the response was generated
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// List per-user generation statistics
///
/// Served from the derived `user_details` view; rows are joined to user
/// records by id on the client side.
///
/// # Errors
///
/// * `INTERNAL_SERVER_ERROR` - Database query failures
pub async fn get_user_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserStatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let rows = StatsQueries::list_user_details(&state.pool)
        .await
        .map_err(|e| {
            error!("Failed to load user stats: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string(), "DATABASE_ERROR")),
            )
        })?;

    Ok(Json(UserStatsResponse {
        stats: rows.into_iter().map(UserStats::from).collect(),
        generated_at: chrono::Utc::now(),
    }))
}

/// Refresh the derived user-details view
///
/// # Errors
///
/// * `INTERNAL_SERVER_ERROR` - The refresh procedure failed
pub async fn refresh_user_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    refresh_user_details(&state.pool).await.map_err(|e| {
        error!("Failed to refresh user details view: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string(), "RPC_ERROR")),
        )
    })?;

    info!("User details view refreshed");
    Ok(Json(serde_json::json!({
        "message": "User details view refreshed"
    })))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn test_user_stats_response_serialization() {
        let response = UserStatsResponse {
            stats: vec![UserStats {
                id: Uuid::new_v4(),
                email: Some("ada@pixelmuse.app".to_string()),
                username: Some("ada".to_string()),
                full_name: None,
                image_count: 12,
            }],
            generated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&response).expect("serialize");
        let stats = json
            .get("stats")
            .and_then(serde_json::Value::as_array)
            .expect("stats array");
        assert_eq!(stats.len(), 1);
        assert_eq!(
            stats.first().and_then(|s| s.get("image_count")).and_then(serde_json::Value::as_i64),
            Some(12)
        );
    }
}
