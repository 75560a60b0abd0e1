//! HTTP client for communicating with the `PixelMuse` API

use pixelmuse_core::types::UserStats;
use pixelmuse_core::{Config, Error, Result};
use reqwest::Client;
use uuid::Uuid;

// Import wire types from the API handlers
pub use pixelmuse_api::handlers::stats::UserStatsResponse;
pub use pixelmuse_api::handlers::users::ListUsersResponse;

/// API client for making HTTP requests to the `PixelMuse` API server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client pointed at the configured API base URL
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.base_url.clone())
    }

    /// Get a page of users with an optional username filter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn list_users(
        &self,
        page: u32,
        username: Option<&str>,
    ) -> Result<ListUsersResponse> {
        let mut url = format!("{}/api/users?page={page}", self.base_url);

        if let Some(username) = username {
            url.push_str("&username=");
            url.push_str(&urlencoding::encode(username));
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch users: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "API returned error: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse user listing: {e}")))
    }

    /// Get the per-user generation statistics
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn user_stats(&self) -> Result<Vec<UserStats>> {
        let url = format!("{}/api/users/stats", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch user stats: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "API returned error: {}",
                response.status()
            )));
        }

        let stats: UserStatsResponse = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse user stats: {e}")))?;

        Ok(stats.stats)
    }

    /// Trigger a refresh of the derived user-details view
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    pub async fn refresh_user_stats(&self) -> Result<()> {
        let url = format!("{}/api/users/stats/refresh", self.base_url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to refresh user stats: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "API returned error: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Set or lift a user's suspension
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    pub async fn set_user_suspended(&self, id: Uuid, suspended: bool) -> Result<()> {
        let action = if suspended { "suspend" } else { "unsuspend" };
        let url = format!("{}/api/users/{id}/{action}", self.base_url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to update suspension: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "API returned error: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Resolve user ids to emails through the lookup function
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the function reports one.
    pub async fn lookup_emails(&self, user_ids: &[String]) -> Result<serde_json::Value> {
        let url = format!("{}/functions/v1/get-user-emails", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "user_ids": user_ids }))
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to call email lookup: {e}")))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse lookup response: {e}")))?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(Error::Http(message));
        }

        Ok(body.get("data").cloned().unwrap_or(serde_json::Value::Null))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config_uses_base_url() {
        let config = Config::default();
        let client = ApiClient::from_config(&config);
        assert_eq!(client.base_url, config.api.base_url);
    }

    #[test]
    fn test_client_is_cloneable() {
        let client = ApiClient::new("http://localhost:8080");
        let clone = client.clone();
        assert_eq!(clone.base_url, "http://localhost:8080");
    }
}
