//! Database query operations for the `PixelMuse` admin platform

use crate::models::{UserDb, UserDetailsDb, UserEmailDb};
use pixelmuse_core::{Error, Result};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// User table operations
pub struct UserQueries;

impl UserQueries {
    /// List users ordered by creation time (newest first, id as tiebreaker),
    /// optionally filtered by a username substring
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        pool: &PgPool,
        username_filter: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserDb>> {
        if let Some(filter) = username_filter {
            let query = r"
                SELECT id, email, username, full_name, created_at, suspended
                FROM users
                WHERE username ILIKE '%' || $1 || '%'
                ORDER BY created_at DESC, id ASC
                LIMIT $2 OFFSET $3
            ";

            sqlx::query_as::<_, UserDb>(query)
                .bind(filter)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
                .map_err(|e| Error::Database(e.to_string()))
        } else {
            let query = r"
                SELECT id, email, username, full_name, created_at, suspended
                FROM users
                ORDER BY created_at DESC, id ASC
                LIMIT $1 OFFSET $2
            ";

            sqlx::query_as::<_, UserDb>(query)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
                .map_err(|e| Error::Database(e.to_string()))
        }
    }

    /// Count users, optionally filtered by a username substring
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(pool: &PgPool, username_filter: Option<&str>) -> Result<i64> {
        let row = if let Some(filter) = username_filter {
            sqlx::query("SELECT COUNT(*) as count FROM users WHERE username ILIKE '%' || $1 || '%'")
                .bind(filter)
                .fetch_one(pool)
                .await
        } else {
            sqlx::query("SELECT COUNT(*) as count FROM users")
                .fetch_one(pool)
                .await
        }
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("count"))
    }

    /// Find a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the user is not found.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<UserDb> {
        let query = "SELECT id, email, username, full_name, created_at, suspended FROM users WHERE id = $1";

        sqlx::query_as::<_, UserDb>(query)
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => Error::NotFound {
                    resource: format!("User with ID {id}"),
                },
                _ => Error::Database(e.to_string()),
            })
    }

    /// Update a user's suspension flag
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the user is not found.
    pub async fn set_suspended(pool: &PgPool, id: Uuid, suspended: bool) -> Result<()> {
        let result = sqlx::query("UPDATE users SET suspended = $1 WHERE id = $2")
            .bind(suspended)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound {
                resource: format!("User with ID {id}"),
            });
        }

        Ok(())
    }
}

/// Derived user-details view operations
pub struct StatsQueries;

impl StatsQueries {
    /// List the per-user generation statistics rows
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_user_details(pool: &PgPool) -> Result<Vec<UserDetailsDb>> {
        let query = r"
            SELECT id, email, username, full_name, image_count
            FROM user_details
            ORDER BY image_count DESC, id ASC
        ";

        sqlx::query_as::<_, UserDetailsDb>(query)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }
}

/// Invoke the `get_user_emails` remote procedure
///
/// Unknown identifiers are absent from the result; the caller's ordering is
/// not preserved by the procedure.
///
/// # Errors
///
/// Returns an error if the procedure call fails.
pub async fn get_user_emails(pool: &PgPool, user_ids: &[String]) -> Result<Vec<UserEmailDb>> {
    tracing::debug!("Resolving {} user ids to emails", user_ids.len());

    sqlx::query_as::<_, UserEmailDb>("SELECT id, email FROM get_user_emails($1)")
        .bind(user_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("get_user_emails procedure failed: {e}");
            Error::Rpc(e.to_string())
        })
}

/// Invoke the `refresh_user_details` remote procedure
///
/// # Errors
///
/// Returns an error if the procedure call fails.
pub async fn refresh_user_details(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT refresh_user_details()")
        .execute(pool)
        .await
        .map_err(|e| Error::Rpc(e.to_string()))?;

    Ok(())
}
