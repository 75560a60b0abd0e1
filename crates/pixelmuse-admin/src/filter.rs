//! Username filter state for the admin user listing

use pixelmuse_core::types::User;
use serde::{Deserialize, Serialize};

/// Free-text username filter
///
/// Created empty, mutated on every edit, reset by an explicit clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    query: String,
}

impl FilterState {
    /// Create an empty filter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
        }
    }

    /// Current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Reset the query to empty
    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Whether a non-empty query is set
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Whether the user's username contains the query
    ///
    /// Case-insensitive; an empty query matches everything, and users
    /// without a username never match an active query.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let needle = self.query.to_lowercase();
        user.username
            .as_ref()
            .is_some_and(|username| username.to_lowercase().contains(&needle))
    }

    /// Apply the filter to a slice of users
    #[must_use]
    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users
            .iter()
            .filter(|user| self.matches(user))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn user_named(username: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: None,
            username: username.map(String::from),
            full_name: None,
            created_at: Utc::now(),
            suspended: None,
        }
    }

    #[test]
    fn test_starts_empty_and_matches_everything() {
        let filter = FilterState::new();
        assert!(!filter.is_active());
        assert!(filter.matches(&user_named(Some("ada"))));
        assert!(filter.matches(&user_named(None)));
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let mut filter = FilterState::new();
        filter.set_query("ADA");

        assert!(filter.matches(&user_named(Some("ada_lovelace"))));
        assert!(filter.matches(&user_named(Some("MacAdam"))));
        assert!(!filter.matches(&user_named(Some("turing"))));
    }

    #[test]
    fn test_missing_username_never_matches_active_query() {
        let mut filter = FilterState::new();
        filter.set_query("a");

        assert!(!filter.matches(&user_named(None)));
    }

    #[test]
    fn test_clear_resets_to_match_all() {
        let mut filter = FilterState::new();
        filter.set_query("ada");
        assert!(filter.is_active());

        filter.clear();
        assert!(!filter.is_active());
        assert!(filter.matches(&user_named(None)));
    }

    #[test]
    fn test_apply_keeps_matching_users() {
        let users = vec![
            user_named(Some("ada")),
            user_named(Some("adamant")),
            user_named(Some("turing")),
            user_named(None),
        ];

        let mut filter = FilterState::new();
        filter.set_query("ada");

        let filtered = filter.apply(&users);
        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|u| u.username.as_deref().is_some_and(|n| n.contains("ada")))
        );
    }
}
