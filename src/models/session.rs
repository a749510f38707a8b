//! Session model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session entity for user authentication.
///
/// The id doubles as the session token carried in the HTTP-only cookie.
/// Expiry is sliding: each successful validation pushes `expires_at`
/// forward by the configured TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session ID (token)
    pub id: String,
    /// Associated user ID
    pub user_id: i64,
    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiration_check() {
        let now = Utc::now();

        let expired = Session {
            id: "expired".to_string(),
            user_id: 1,
            expires_at: now - Duration::hours(1),
            created_at: now - Duration::days(2),
        };
        let valid = Session {
            id: "valid".to_string(),
            user_id: 1,
            expires_at: now + Duration::hours(1),
            created_at: now,
        };

        assert!(expired.is_expired());
        assert!(!valid.is_expired());
    }
}
