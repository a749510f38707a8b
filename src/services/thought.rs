//! Thought service
//!
//! Business logic for the journal itself: validated creation, date-range
//! listing, and the bulk wipe. There is deliberately no single-record
//! update or delete.

use crate::db::repositories::ThoughtRepository;
use crate::models::{DateRange, NewThought, Thought};
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;

/// Error types for thought operations
#[derive(Debug, thiserror::Error)]
pub enum ThoughtServiceError {
    /// Input failed validation; carries one message per failing field
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Thought service
pub struct ThoughtService {
    thought_repo: Arc<dyn ThoughtRepository>,
}

impl ThoughtService {
    /// Create a new thought service
    pub fn new(thought_repo: Arc<dyn ThoughtRepository>) -> Self {
        Self { thought_repo }
    }

    /// Record a new thought for `user_id`.
    ///
    /// The id and timestamp are server-assigned; validation failures
    /// report every failing field at once.
    pub async fn create(
        &self,
        user_id: i64,
        input: NewThought,
    ) -> Result<Thought, ThoughtServiceError> {
        let errors = input.validate();
        if !errors.is_empty() {
            return Err(ThoughtServiceError::Validation(errors));
        }

        let thought = Thought {
            id: 0,
            user_id,
            content: input.content,
            intensity: input.intensity,
            cognitive_distortion: input.cognitive_distortion,
            trigger: input.trigger.filter(|t| !t.trim().is_empty()),
            created_at: Utc::now(),
        };

        let created = self
            .thought_repo
            .create(&thought)
            .await
            .context("Failed to create thought")?;

        Ok(created)
    }

    /// List `user_id`'s thoughts within `range`, newest first.
    pub async fn list(
        &self,
        user_id: i64,
        range: DateRange,
    ) -> Result<Vec<Thought>, ThoughtServiceError> {
        let thoughts = self
            .thought_repo
            .list_by_user(user_id, range)
            .await
            .context("Failed to list thoughts")?;

        Ok(thoughts)
    }

    /// Irreversibly delete every thought owned by `user_id`.
    ///
    /// Returns the number of records removed.
    pub async fn delete_all(&self, user_id: i64) -> Result<i64, ThoughtServiceError> {
        let deleted = self
            .thought_repo
            .delete_all_by_user(user_id)
            .await
            .context("Failed to delete thoughts")?;

        tracing::info!(user_id, deleted, "Journal wiped");

        Ok(deleted)
    }
}

/// Parse optional `date_from`/`date_to` query parameters into a range.
///
/// Each bound accepts either an RFC 3339 timestamp or a plain date
/// (`YYYY-MM-DD`). A date-only lower bound starts at midnight; a
/// date-only upper bound is normalized to the end of that day
/// (23:59:59.999) so the day it names is fully included.
pub fn parse_date_range(
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> Result<DateRange, ThoughtServiceError> {
    let mut errors = Vec::new();

    let from = match date_from {
        Some(s) => match parse_date_param(s, false) {
            Ok(at) => Some(at),
            Err(msg) => {
                errors.push(format!("date_from {}", msg));
                None
            }
        },
        None => None,
    };

    let to = match date_to {
        Some(s) => match parse_date_param(s, true) {
            Ok(at) => Some(at),
            Err(msg) => {
                errors.push(format!("date_to {}", msg));
                None
            }
        },
        None => None,
    };

    if !errors.is_empty() {
        return Err(ThoughtServiceError::Validation(errors));
    }

    Ok(DateRange { from, to })
}

fn parse_date_param(value: &str, end_of_day: bool) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let time = if end_of_day {
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
        } else {
            NaiveTime::MIN
        };
        return Ok(Utc.from_utc_datetime(&date.and_time(time)));
    }

    Err("must be an RFC 3339 timestamp or YYYY-MM-DD date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::user::{SqlxUserRepository, UserRepository};
    use crate::db::repositories::SqlxThoughtRepository;
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;
    use chrono::Timelike;

    async fn setup() -> (ThoughtService, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::new(pool.clone());
        let user = users
            .create(&User::new("test@example.com".to_string(), "hash".to_string()))
            .await
            .expect("Failed to create user");

        let service = ThoughtService::new(SqlxThoughtRepository::boxed(pool));
        (service, user.id)
    }

    fn valid_input() -> NewThought {
        NewThought {
            content: "Everyone noticed my mistake".to_string(),
            intensity: 7,
            cognitive_distortion: "mind-reading".to_string(),
            trigger: Some("standup".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_returns_persisted_record() {
        let (service, user_id) = setup().await;

        let created = service
            .create(user_id, valid_input())
            .await
            .expect("Create should succeed");

        assert!(created.id > 0);
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.content, "Everyone noticed my mistake");
        assert_eq!(created.intensity, 7);
        assert_eq!(created.trigger.as_deref(), Some("standup"));
    }

    #[tokio::test]
    async fn test_create_blank_trigger_stored_as_none() {
        let (service, user_id) = setup().await;

        let mut input = valid_input();
        input.trigger = Some("   ".to_string());

        let created = service
            .create(user_id, input)
            .await
            .expect("Create should succeed");

        assert!(created.trigger.is_none());
    }

    #[tokio::test]
    async fn test_create_invalid_input_persists_nothing() {
        let (service, user_id) = setup().await;

        let mut input = valid_input();
        input.intensity = 11;

        let result = service.create(user_id, input).await;

        match result {
            Err(ThoughtServiceError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("intensity")));
            }
            other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
        }

        let listed = service
            .list(user_id, DateRange::default())
            .await
            .expect("List should succeed");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_is_not_an_error() {
        let (service, user_id) = setup().await;

        let listed = service
            .list(user_id, DateRange::default())
            .await
            .expect("List should succeed");

        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let (service, user_id) = setup().await;

        service
            .create(user_id, valid_input())
            .await
            .expect("Create should succeed");
        service
            .create(user_id, valid_input())
            .await
            .expect("Create should succeed");

        let deleted = service
            .delete_all(user_id)
            .await
            .expect("Delete should succeed");
        assert_eq!(deleted, 2);

        let listed = service
            .list(user_id, DateRange::default())
            .await
            .expect("List should succeed");
        assert!(listed.is_empty());
    }

    #[test]
    fn test_parse_date_range_date_only() {
        let range = parse_date_range(Some("2026-03-01"), Some("2026-03-05"))
            .expect("Parse should succeed");

        let from = range.from.expect("from should be set");
        let to = range.to.expect("to should be set");

        assert_eq!(from.hour(), 0);
        assert_eq!(from.minute(), 0);

        // Date-only upper bound covers the whole named day
        assert_eq!(to.hour(), 23);
        assert_eq!(to.minute(), 59);
        assert_eq!(to.second(), 59);
    }

    #[test]
    fn test_parse_date_range_rfc3339() {
        let range = parse_date_range(Some("2026-03-01T10:30:00Z"), None)
            .expect("Parse should succeed");

        let from = range.from.expect("from should be set");
        assert_eq!(from.hour(), 10);
        assert_eq!(from.minute(), 30);
        assert!(range.to.is_none());
    }

    #[test]
    fn test_parse_date_range_invalid_reports_both_fields() {
        let result = parse_date_range(Some("soon"), Some("later"));

        match result {
            Err(ThoughtServiceError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("date_from"));
                assert!(errors[1].contains("date_to"));
            }
            other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_date_range_absent_is_open() {
        let range = parse_date_range(None, None).expect("Parse should succeed");
        assert!(range.from.is_none());
        assert!(range.to.is_none());
    }
}
