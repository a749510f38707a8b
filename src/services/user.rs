//! Authentication service
//!
//! Implements business logic for accounts and sessions:
//! - Signup (email + password, signs the user in immediately)
//! - Login/logout
//! - Session validation with sliding expiry
//! - Profile updates (display name only)

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{is_valid_email, Session, User};
use crate::services::password::{hash_password, verify_password};
use anyhow::Context;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Default session time-to-live in hours
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 6;

/// Error types for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Input failed validation; carries one message per failing field
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    /// An account with this email already exists
    #[error("An account with this email already exists")]
    DuplicateUser,

    /// Credentials did not match. The same variant covers unknown emails
    /// and wrong passwords so responses cannot be used to probe for
    /// registered addresses.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Signup input
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Login input
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Authentication service
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

impl AuthService {
    /// Create a new auth service with the default session TTL
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self::with_session_ttl(user_repo, session_repo, DEFAULT_SESSION_TTL_HOURS)
    }

    /// Create a new auth service with a custom session TTL in hours
    pub fn with_session_ttl(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        ttl_hours: i64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl: Duration::hours(ttl_hours),
        }
    }

    /// Session TTL in seconds, for the cookie's Max-Age attribute
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl.num_seconds()
    }

    /// Register a new account and sign it in.
    ///
    /// Returns the created user together with a fresh session.
    pub async fn signup(&self, input: SignupInput) -> Result<(User, Session), AuthServiceError> {
        self.validate_signup_input(&input)?;

        // Check for an existing account
        if self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(AuthServiceError::DuplicateUser);
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;

        let mut user = User::new(input.username, password_hash);
        user.display_name = normalize_display_name(input.display_name);

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        let session = self.create_session(created.id).await?;

        tracing::info!(user_id = created.id, "New account created");

        Ok((created, session))
    }

    /// Login with credentials.
    ///
    /// Returns a new session on success.
    pub async fn login(&self, input: LoginInput) -> Result<(User, Session), AuthServiceError> {
        let user = self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to get user by username")?;

        let user = match user {
            Some(user) => user,
            None => {
                // Hash the submitted password anyway so the unknown-email
                // path takes roughly as long as a wrong-password check.
                let _ = hash_password(&input.password);
                return Err(AuthServiceError::InvalidCredentials);
            }
        };

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let session = self.create_session(user.id).await?;

        Ok((user, session))
    }

    /// Logout (invalidate session).
    ///
    /// Deleting an unknown or already-deleted token is not an error, so
    /// logout is idempotent.
    pub async fn logout(&self, session_id: &str) -> Result<(), AuthServiceError> {
        self.session_repo
            .delete(session_id)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    /// Validate a session token and return the associated user.
    ///
    /// A valid session has its expiry pushed forward by the configured TTL
    /// (sliding expiration). Expired sessions are deleted on sight and
    /// treated as absent.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>, AuthServiceError> {
        let session = match self
            .session_repo
            .get_by_id(token)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            let _ = self.session_repo.delete(token).await;
            return Ok(None);
        }

        // Sliding expiry
        self.session_repo
            .touch(token, Utc::now() + self.session_ttl)
            .await
            .context("Failed to extend session")?;

        let user = self
            .user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to get user")?;

        Ok(user)
    }

    /// Update a user's display name.
    ///
    /// An empty or whitespace-only name clears the field.
    pub async fn update_profile(
        &self,
        user_id: i64,
        display_name: Option<String>,
    ) -> Result<User, AuthServiceError> {
        let display_name = normalize_display_name(display_name);

        if let Some(name) = &display_name {
            if name.chars().count() > 100 {
                return Err(AuthServiceError::Validation(vec![
                    "display_name must be at most 100 characters".to_string(),
                ]));
            }
        }

        self.user_repo
            .update_display_name(user_id, display_name.as_deref())
            .await
            .context("Failed to update display name")?;

        let user = self
            .user_repo
            .get_by_id(user_id)
            .await
            .context("Failed to get user after update")?
            .ok_or_else(|| anyhow::anyhow!("User not found after update"))?;

        Ok(user)
    }

    /// Delete all expired sessions.
    ///
    /// Maintenance operation, called periodically from a background task.
    pub async fn cleanup_expired_sessions(&self) -> Result<i64, AuthServiceError> {
        let count = self
            .session_repo
            .delete_expired()
            .await
            .context("Failed to delete expired sessions")?;

        Ok(count)
    }

    // ========================================================================
    // Private helper methods
    // ========================================================================

    async fn create_session(&self, user_id: i64) -> Result<Session, AuthServiceError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + self.session_ttl,
            created_at: now,
        };

        let created = self
            .session_repo
            .create(&session)
            .await
            .context("Failed to create session")?;

        Ok(created)
    }

    fn validate_signup_input(&self, input: &SignupInput) -> Result<(), AuthServiceError> {
        let mut errors = Vec::new();

        if !is_valid_email(&input.username) {
            errors.push("username must be a valid email address".to_string());
        }

        if input.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AuthServiceError::Validation(errors))
        }
    }
}

fn normalize_display_name(display_name: Option<String>) -> Option<String> {
    display_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
