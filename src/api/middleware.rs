//! API middleware
//!
//! Contains shared HTTP plumbing:
//! - Application state
//! - The error envelope returned by every failing handler
//! - Authentication (session token validation)
//! - Per-IP rate limiting for auth and general API traffic

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

use crate::models::User;
use crate::services::rate_limiter::RateLimiter;
use crate::services::thought::{ThoughtService, ThoughtServiceError};
use crate::services::user::{AuthService, AuthServiceError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: crate::db::DynDatabasePool,
    pub auth_service: Arc<AuthService>,
    pub thought_service: Arc<ThoughtService>,
    pub auth_limiter: Arc<RateLimiter>,
    pub api_limiter: Arc<RateLimiter>,
}

/// Authenticated user extracted from request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// 400 with the full list of failing fields in `details`
    pub fn validation_error(errors: Vec<String>) -> Self {
        Self::with_details(
            "VALIDATION_ERROR",
            "Validation failed",
            serde_json::json!({ "fields": errors }),
        )
    }

    pub fn duplicate_user() -> Self {
        Self::new("DUPLICATE_USER", "An account with this email already exists")
    }

    pub fn invalid_credentials() -> Self {
        Self::new("INVALID_CREDENTIALS", "Invalid email or password")
    }

    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new("NOT_AUTHENTICATED", message)
    }

    pub fn rate_limited() -> Self {
        Self::new("RATE_LIMITED", "Too many requests, please try again later")
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "DUPLICATE_USER" => StatusCode::BAD_REQUEST,
            "INVALID_CREDENTIALS" => StatusCode::UNAUTHORIZED,
            "NOT_AUTHENTICATED" => StatusCode::UNAUTHORIZED,
            "RATE_LIMITED" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::Validation(errors) => ApiError::validation_error(errors),
            AuthServiceError::DuplicateUser => ApiError::duplicate_user(),
            AuthServiceError::InvalidCredentials => ApiError::invalid_credentials(),
            AuthServiceError::Internal(e) => {
                tracing::error!(error = %e, "Auth service failure");
                ApiError::internal_error()
            }
        }
    }
}

impl From<ThoughtServiceError> for ApiError {
    fn from(err: ThoughtServiceError) -> Self {
        match err {
            ThoughtServiceError::Validation(errors) => ApiError::validation_error(errors),
            ThoughtServiceError::Internal(e) => {
                tracing::error!(error = %e, "Thought service failure");
                ApiError::internal_error()
            }
        }
    }
}

/// Extract session token from request
///
/// Checks the Authorization header first, then the `session` cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie_header) = headers.get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("session=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Extract the client IP from proxy headers.
///
/// Checks X-Forwarded-For (first entry), then X-Real-IP. Unparseable or
/// missing addresses fall back to loopback so the limiter still applies
/// a shared bucket instead of being bypassed.
pub fn extract_client_ip(headers: &HeaderMap) -> IpAddr {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first) = forwarded_str.split(',').next() {
                if let Ok(ip) = first.trim().parse() {
                    return ip;
                }
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            if let Ok(ip) = ip_str.trim().parse() {
                return ip;
            }
        }
    }

    IpAddr::from([127, 0, 0, 1])
}

/// Authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_session_token(request.headers())
        .ok_or_else(|| ApiError::not_authenticated("Missing authentication token"))?;

    let user = state
        .auth_service
        .validate_session(&token)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_authenticated("Invalid or expired session"))?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

/// Rate limit middleware for signup/login attempts
pub async fn auth_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ip = extract_client_ip(request.headers());

    if !state.auth_limiter.allow(ip).await {
        tracing::warn!(%ip, "Auth rate limit exceeded");
        return Err(ApiError::rate_limited());
    }

    Ok(next.run(request).await)
}

/// Rate limit middleware for general API traffic
pub async fn api_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ip = extract_client_ip(request.headers());

    if !state.api_limiter.allow(ip).await {
        tracing::warn!(%ip, "API rate limit exceeded");
        return Err(ApiError::rate_limited());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_session_token_from_bearer() {
        let headers = headers_with("authorization", "Bearer test-token-123");
        assert_eq!(
            extract_session_token(&headers),
            Some("test-token-123".to_string())
        );
    }

    #[test]
    fn test_extract_session_token_from_cookie() {
        let headers = headers_with("cookie", "theme=dark; session=test-token-456");
        assert_eq!(
            extract_session_token(&headers),
            Some("test-token-456".to_string())
        );
    }

    #[test]
    fn test_extract_session_token_bearer_priority() {
        let mut headers = headers_with("authorization", "Bearer bearer-token");
        headers.insert("cookie", HeaderValue::from_static("session=cookie-token"));
        assert_eq!(
            extract_session_token(&headers),
            Some("bearer-token".to_string())
        );
    }

    #[test]
    fn test_extract_session_token_none() {
        assert!(extract_session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_session_token_invalid_bearer() {
        let headers = headers_with("authorization", "Basic invalid");
        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn test_extract_client_ip_forwarded_for() {
        let headers = headers_with("x-forwarded-for", "203.0.113.9, 10.0.0.1");
        assert_eq!(
            extract_client_ip(&headers),
            "203.0.113.9".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_extract_client_ip_real_ip() {
        let headers = headers_with("x-real-ip", "198.51.100.7");
        assert_eq!(
            extract_client_ip(&headers),
            "198.51.100.7".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_extract_client_ip_fallback() {
        let headers = headers_with("x-forwarded-for", "not-an-ip");
        assert_eq!(
            extract_client_ip(&headers),
            IpAddr::from([127, 0, 0, 1])
        );
    }

    #[test]
    fn test_api_error_validation_carries_field_list() {
        let error = ApiError::validation_error(vec![
            "content must not be empty".to_string(),
            "intensity must be between 1 and 10".to_string(),
        ]);

        assert_eq!(error.error.code, "VALIDATION_ERROR");
        let details = error.error.details.expect("details should be set");
        assert_eq!(details["fields"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(ApiError::duplicate_user().error.code, "DUPLICATE_USER");
        assert_eq!(
            ApiError::invalid_credentials().error.code,
            "INVALID_CREDENTIALS"
        );
        assert_eq!(
            ApiError::not_authenticated("no").error.code,
            "NOT_AUTHENTICATED"
        );
        assert_eq!(ApiError::rate_limited().error.code, "RATE_LIMITED");
        assert_eq!(ApiError::internal_error().error.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_internal_error_is_generic() {
        // Internal failures must not leak their cause in the response body
        let error: ApiError =
            ThoughtServiceError::Internal(anyhow::anyhow!("db exploded at table thoughts")).into();

        assert_eq!(error.error.code, "INTERNAL_ERROR");
        assert!(!error.error.message.contains("thoughts"));
    }
}
