//! Database models for the `PixelMuse` admin platform

use chrono::{DateTime, Utc};
use pixelmuse_core::types::{User, UserEmail, UserStats};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for registered users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserDb {
    /// Unique identifier
    pub id: Uuid,

    /// Email address
    pub email: Option<String>,

    /// Display username
    pub username: Option<String>,

    /// Full name
    pub full_name: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Whether the account is suspended
    pub suspended: Option<bool>,
}

impl From<UserDb> for User {
    fn from(row: UserDb) -> Self {
        Self {
            id: row.id,
            email: row.email,
            username: row.username,
            full_name: row.full_name,
            created_at: row.created_at,
            suspended: row.suspended,
        }
    }
}

/// Database row for the derived `user_details` view
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserDetailsDb {
    /// User identifier
    pub id: Uuid,

    /// Email address
    pub email: Option<String>,

    /// Display username
    pub username: Option<String>,

    /// Full name
    pub full_name: Option<String>,

    /// Number of images generated by the user
    pub image_count: Option<i64>,
}

impl From<UserDetailsDb> for UserStats {
    fn from(row: UserDetailsDb) -> Self {
        Self {
            id: row.id,
            email: row.email,
            username: row.username,
            full_name: row.full_name,
            image_count: row.image_count.unwrap_or(0),
        }
    }
}

/// Database row returned by the `get_user_emails` procedure
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserEmailDb {
    /// User identifier, already cast to text by the procedure
    pub id: String,

    /// Email address
    pub email: Option<String>,
}

impl From<UserEmailDb> for UserEmail {
    fn from(row: UserEmailDb) -> Self {
        Self {
            id: row.id,
            email: row.email,
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_db_conversion() {
        let row = UserDb {
            id: Uuid::new_v4(),
            email: Some("ada@pixelmuse.app".to_string()),
            username: Some("ada".to_string()),
            full_name: None,
            created_at: Utc::now(),
            suspended: Some(true),
        };

        let user: User = row.clone().into();
        assert_eq!(user.id, row.id);
        assert_eq!(user.email, row.email);
        assert_eq!(user.username, row.username);
        assert!(user.is_suspended());
    }

    #[test]
    fn test_user_details_conversion_defaults_missing_count() {
        let row = UserDetailsDb {
            id: Uuid::new_v4(),
            email: None,
            username: Some("ghost".to_string()),
            full_name: None,
            image_count: None,
        };

        let stats: UserStats = row.into();
        assert_eq!(stats.image_count, 0);
    }

    #[test]
    fn test_user_email_conversion() {
        let row = UserEmailDb {
            id: "a".to_string(),
            email: Some("a@x.com".to_string()),
        };

        let email: UserEmail = row.into();
        assert_eq!(email.id, "a");
        assert_eq!(email.email, Some("a@x.com".to_string()));
    }
}
