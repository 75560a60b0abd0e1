//! Core data types for the `PixelMuse` admin platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User identifier type
pub type UserId = Uuid;

/// Fixed page size for admin listings
pub const PAGE_SIZE: u32 = 10;

/// Key under which the admin session flag is persisted
pub const ADMIN_SESSION_KEY: &str = "adminAuthenticated";

/// Literal marker stored under [`ADMIN_SESSION_KEY`] when an admin is logged in
pub const ADMIN_SESSION_ACTIVE: &str = "true";

/// Tabs available on the admin dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    /// User management tab
    Users,
    /// Generation statistics tab
    Stats,
}

impl Default for AdminTab {
    fn default() -> Self {
        Self::Users
    }
}

impl std::fmt::Display for AdminTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Users => write!(f, "users"),
            Self::Stats => write!(f, "stats"),
        }
    }
}

/// A registered `PixelMuse` user
///
/// Owned by the backend; the admin layer only ever holds read-only copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Email address
    #[validate(length(max = 255))]
    pub email: Option<String>,

    /// Display username
    #[validate(length(max = 64))]
    pub username: Option<String>,

    /// Full name
    #[validate(length(max = 255))]
    pub full_name: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// Whether the account is suspended
    pub suspended: Option<bool>,
}

impl User {
    /// Whether the account is currently suspended
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended.unwrap_or(false)
    }
}

/// Per-user generation statistics, joined to [`User`] rows by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    /// User identifier
    pub id: UserId,

    /// Email address
    pub email: Option<String>,

    /// Display username
    pub username: Option<String>,

    /// Full name
    pub full_name: Option<String>,

    /// Number of images the user has generated
    pub image_count: i64,
}

/// Resolved id/email pair returned by the email lookup procedure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEmail {
    /// User identifier, carried as an opaque string on the wire
    pub id: String,

    /// Email address, if the user has one
    pub email: Option<String>,
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("ada@pixelmuse.app".to_string()),
            username: Some("ada".to_string()),
            full_name: Some("Ada Lovelace".to_string()),
            created_at: Utc::now(),
            suspended: None,
        }
    }

    #[test]
    fn test_admin_tab_default() {
        assert_eq!(AdminTab::default(), AdminTab::Users);
    }

    #[test]
    fn test_admin_tab_display() {
        assert_eq!(format!("{}", AdminTab::Users), "users");
        assert_eq!(format!("{}", AdminTab::Stats), "stats");
    }

    #[test]
    fn test_admin_tab_serialization() {
        let serialized = serde_json::to_string(&AdminTab::Stats).unwrap();
        assert_eq!(serialized, "\"stats\"");

        let deserialized: AdminTab = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, AdminTab::Stats);
    }

    #[test]
    fn test_user_suspension_flag() {
        let mut user = sample_user();
        assert!(!user.is_suspended());

        user.suspended = Some(false);
        assert!(!user.is_suspended());

        user.suspended = Some(true);
        assert!(user.is_suspended());
    }

    #[test]
    fn test_user_validation() {
        let user = sample_user();
        assert!(user.validate().is_ok());

        let mut long_username = sample_user();
        long_username.username = Some("a".repeat(65));
        assert!(long_username.validate().is_err());
    }

    #[test]
    fn test_user_serialization_roundtrip() {
        let user = sample_user();
        let serialized = serde_json::to_string(&user).unwrap();
        let deserialized: User = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.id, user.id);
        assert_eq!(deserialized.email, user.email);
        assert_eq!(deserialized.username, user.username);
        assert_eq!(deserialized.created_at, user.created_at);
    }

    #[test]
    fn test_user_email_optional_email() {
        let with_email = UserEmail {
            id: "abc".to_string(),
            email: Some("a@x.com".to_string()),
        };
        let without_email = UserEmail {
            id: "def".to_string(),
            email: None,
        };

        let json = serde_json::to_value(&without_email).unwrap();
        assert!(json.get("email").unwrap().is_null());
        assert_ne!(with_email, without_email);
    }

    #[test]
    fn test_session_constants() {
        assert_eq!(ADMIN_SESSION_KEY, "adminAuthenticated");
        assert_eq!(ADMIN_SESSION_ACTIVE, "true");
        assert_eq!(PAGE_SIZE, 10);
    }

    proptest! {
        #[test]
        fn test_username_within_limit_validates(username in "\\PC{1,64}") {
            let mut user = sample_user();
            user.username = Some(username);
            prop_assert!(user.validate().is_ok());
        }

        #[test]
        fn test_username_over_limit_rejected(username in "\\PC{65,100}") {
            let mut user = sample_user();
            user.username = Some(username);
            prop_assert!(user.validate().is_err());
        }
    }
}
