//! CSV export endpoint
//!
//! GET /api/export/csv streams the caller's journal as a CSV download.
//! The same optional date_from/date_to parameters as the list endpoint
//! apply.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::thoughts::DateRangeQuery;
use crate::services::export::to_csv;
use crate::services::thought::parse_date_range;

/// GET /api/export/csv - Download the caller's thoughts as CSV
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = parse_date_range(query.date_from.as_deref(), query.date_to.as_deref())?;

    let thoughts = state.thought_service.list(user.0.id, range).await?;
    let csv = to_csv(&thoughts);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"thoughts.csv\"",
            ),
        ],
        csv,
    ))
}
