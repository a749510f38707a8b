//! User model
//!
//! The username is the user's email address; it is unique across all
//! users and never changes. The only mutable field is the optional
//! display name. Accounts are never deleted in-app; only a user's
//! thought data can be wiped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Email address used to sign in (unique)
    pub username: String,
    /// Password hash (argon2id PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password()`.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: 0, // assigned by the database
            username,
            password_hash,
            display_name: None,
            created_at: Utc::now(),
        }
    }
}

/// Minimal syntactic email check: one `@` with non-empty local part and
/// a domain containing a dot. Full RFC 5322 validation is deliberately
/// out of scope; the address is only used as a login identifier.
pub fn is_valid_email(s: &str) -> bool {
    let mut parts = s.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !s.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("a@example.com".to_string(), "hash".to_string());
        assert_eq!(user.id, 0);
        assert_eq!(user.username, "a@example.com");
        assert!(user.display_name.is_none());
    }

    #[test]
    fn test_valid_emails() {
        for email in ["a@x.com", "first.last@sub.example.org", "u+tag@example.co"] {
            assert!(is_valid_email(email), "{} should be valid", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@nodot",
            "user@.com",
            "user@domain.",
            "has space@example.com",
        ] {
            assert!(!is_valid_email(email), "{} should be invalid", email);
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("a@x.com".to_string(), "secret-hash".to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
