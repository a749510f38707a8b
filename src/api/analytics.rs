//! Analytics endpoint
//!
//! GET /api/analytics/summary aggregates the caller's journal over one
//! of the preset windows.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::services::analytics::{summarize, AnalyticsSummary, DateFilter};

/// Query parameters for the summary endpoint
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub filter: Option<String>,
}

/// GET /api/analytics/summary - Aggregate the caller's thoughts
///
/// Defaults to the 7-day window when no filter is given.
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let filter = match query.filter.as_deref() {
        Some(value) => DateFilter::parse(value).ok_or_else(|| {
            ApiError::validation_error(vec![
                "filter must be one of today, yesterday, 7days, 30days".to_string(),
            ])
        })?,
        None => DateFilter::Last7Days,
    };

    let range = filter.range(Utc::now());
    let thoughts = state.thought_service.list(user.0.id, range).await?;

    Ok(Json(summarize(&thoughts, filter.days())))
}
