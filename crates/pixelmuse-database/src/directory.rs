//! User directory trait and implementations
//!
//! The email lookup function talks to the backend through this seam so
//! callers can be exercised against a mock without a live database.

use crate::queries;
use async_trait::async_trait;
use pixelmuse_core::{Error, Result};
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

/// Backend surface consumed by the email lookup function
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a list of opaque user id strings to id/email pairs
    ///
    /// The returned value is passed through to the caller verbatim.
    async fn get_user_emails(&self, user_ids: &[String]) -> Result<serde_json::Value>;
}

/// [`UserDirectory`] backed by the `get_user_emails` database procedure
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Create a directory over an existing connection pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn get_user_emails(&self, user_ids: &[String]) -> Result<serde_json::Value> {
        let rows = queries::get_user_emails(&self.pool, user_ids).await?;
        serde_json::to_value(rows).map_err(Error::from)
    }
}

/// Mock directory for testing
#[derive(Debug)]
pub struct MockUserDirectory {
    /// Canned response returned on success
    response: serde_json::Value,

    /// Should lookups fail
    should_fail: bool,

    /// Failure message
    failure_message: String,

    /// Recorded id lists, one entry per call
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockUserDirectory {
    /// Create a mock that answers every lookup with an empty list
    #[must_use]
    pub fn new() -> Self {
        Self {
            response: serde_json::Value::Array(Vec::new()),
            should_fail: false,
            failure_message: "Mock failure".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the canned success response
    #[must_use]
    pub fn with_response(mut self, response: serde_json::Value) -> Self {
        self.response = response;
        self
    }

    /// Make every lookup fail with the given message
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.should_fail = true;
        self.failure_message = message.into();
        self
    }

    /// Id lists recorded so far, one entry per call
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn get_user_emails(&self, user_ids: &[String]) -> Result<serde_json::Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(user_ids.to_vec());
        }

        if self.should_fail {
            return Err(Error::Rpc(self.failure_message.clone()));
        }

        Ok(self.response.clone())
    }
}
