//! Thought API endpoints
//!
//! - GET /api/thoughts - List the caller's thoughts, newest first
//! - POST /api/thoughts - Record a thought
//! - DELETE /api/thoughts - Delete every thought the caller owns
//!
//! All routes require an authenticated session. There is no per-record
//! update or delete; entries are immutable once written.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{NewThought, Thought};
use crate::services::thought::parse_date_range;

/// Query parameters for listing and exporting thoughts
///
/// The camelCase aliases keep older clients working.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    #[serde(alias = "dateFrom")]
    pub date_from: Option<String>,
    #[serde(alias = "dateTo")]
    pub date_to: Option<String>,
}

/// GET /api/thoughts - List the caller's thoughts
pub async fn list_thoughts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<Thought>>, ApiError> {
    let range = parse_date_range(query.date_from.as_deref(), query.date_to.as_deref())?;

    let thoughts = state.thought_service.list(user.0.id, range).await?;

    Ok(Json(thoughts))
}

/// POST /api/thoughts - Record a new thought
pub async fn create_thought(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<NewThought>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.thought_service.create(user.0.id, body).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/thoughts - Delete every thought the caller owns
pub async fn delete_all_thoughts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.thought_service.delete_all(user.0.id).await?;

    Ok(Json(serde_json::json!({
        "message": format!("Deleted {} thoughts", deleted)
    })))
}
