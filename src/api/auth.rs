//! Authentication API endpoints
//!
//! Handles HTTP requests for accounts and sessions:
//! - POST /api/auth/signup - Create account and sign in
//! - POST /api/auth/login - Sign in
//! - POST /api/auth/logout - Sign out (idempotent)
//! - GET /api/auth/me - Get current user
//! - PUT /api/auth/profile - Update display name

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{extract_session_token, ApiError, AppState, AuthenticatedUser};
use crate::services::user::{LoginInput, SignupInput};

/// Request body for signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for updating profile
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
}

/// Response for account info
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<crate::models::User> for AccountResponse {
    fn from(user: crate::models::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// Build the session cookie sent after signup and login.
fn session_cookie(token: &str, max_age: i64) -> HeaderMap {
    let cookie = format!(
        "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        token, max_age
    );

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
    headers
}

/// POST /api/auth/signup - Create an account and sign it in
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = SignupInput {
        username: body.username,
        password: body.password,
        display_name: body.display_name,
    };

    let (user, session) = state.auth_service.signup(input).await?;

    let headers = session_cookie(&session.id, state.auth_service.session_ttl_seconds());

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AccountResponse::from(user)),
    ))
}

/// POST /api/auth/login - Sign in with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = LoginInput {
        username: body.username,
        password: body.password,
    };

    let (user, session) = state.auth_service.login(input).await?;

    let headers = session_cookie(&session.id, state.auth_service.session_ttl_seconds());

    Ok((headers, Json(AccountResponse::from(user))))
}

/// POST /api/auth/logout - Sign out
///
/// Idempotent: succeeds with 200 even when no session cookie is present
/// or the token is unknown, and always clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = extract_session_token(&headers) {
        state.auth_service.logout(&token).await?;
    }

    let clear_cookie = "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";
    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::SET_COOKIE, HeaderValue::from_static(clear_cookie));

    Ok((
        response_headers,
        Json(serde_json::json!({ "message": "Logged out" })),
    ))
}

/// GET /api/auth/me - Get current user
pub async fn get_current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<AccountResponse> {
    Json(user.0.into())
}

/// PUT /api/auth/profile - Update current user's display name
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let updated = state
        .auth_service
        .update_profile(user.0.id, body.display_name)
        .await?;

    Ok(Json(updated.into()))
}
