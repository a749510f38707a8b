//! Thought model
//!
//! This module defines the Thought entity (one recorded negative thought)
//! and the input type used to create it. Thoughts are immutable once
//! recorded: there is no update operation, and deletion only happens in
//! bulk per user. This is a product decision (journaling semantics), not
//! an oversight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum allowed length of thought content, in characters.
pub const MAX_CONTENT_LEN: usize = 2000;

/// Inclusive intensity range.
pub const MIN_INTENSITY: i32 = 1;
pub const MAX_INTENSITY: i32 = 10;

/// Thought entity representing one journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    /// Unique identifier
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Free-text content (1–2000 characters)
    pub content: String,
    /// Intensity rating, integer in [1, 10]
    pub intensity: i32,
    /// Cognitive-distortion category identifier (e.g. "catastrophizing")
    pub cognitive_distortion: String,
    /// Optional free-text trigger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    /// Creation timestamp (server-assigned)
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new thought.
///
/// Field names match the JSON body of `POST /api/thoughts`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewThought {
    pub content: String,
    pub intensity: i32,
    /// Accepts the camelCase spelling older clients send
    #[serde(alias = "cognitiveDistortion")]
    pub cognitive_distortion: String,
    #[serde(default)]
    pub trigger: Option<String>,
}

impl NewThought {
    /// Validate the input against the domain invariants.
    ///
    /// Returns the list of field-level failures; an empty list means the
    /// input is valid. All failures are collected so the caller can report
    /// every problem at once rather than one per request.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.content.trim().is_empty() {
            errors.push("content must not be empty".to_string());
        } else if self.content.chars().count() > MAX_CONTENT_LEN {
            errors.push(format!(
                "content must be at most {} characters",
                MAX_CONTENT_LEN
            ));
        }

        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity) {
            errors.push(format!(
                "intensity must be between {} and {}",
                MIN_INTENSITY, MAX_INTENSITY
            ));
        }

        if self.cognitive_distortion.trim().is_empty() {
            errors.push("cognitive_distortion must not be empty".to_string());
        }

        errors
    }
}

/// Inclusive date range used to filter thought listings and exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Check whether a timestamp falls inside the range (inclusive).
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(from) = self.from {
            if at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if at > to {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> NewThought {
        NewThought {
            content: "I will fail the presentation".to_string(),
            intensity: 7,
            cognitive_distortion: "catastrophizing".to_string(),
            trigger: Some("upcoming meeting".to_string()),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_empty());
    }

    #[test]
    fn test_empty_content_fails() {
        let mut input = valid_input();
        input.content = "   ".to_string();
        let errors = input.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("content"));
    }

    #[test]
    fn test_content_too_long_fails() {
        let mut input = valid_input();
        input.content = "a".repeat(MAX_CONTENT_LEN + 1);
        let errors = input.validate();
        assert!(errors.iter().any(|e| e.contains("content")));
    }

    #[test]
    fn test_content_at_limit_passes() {
        let mut input = valid_input();
        input.content = "a".repeat(MAX_CONTENT_LEN);
        assert!(input.validate().is_empty());
    }

    #[test]
    fn test_intensity_out_of_range_fails() {
        for intensity in [0, 11, -3, 100] {
            let mut input = valid_input();
            input.intensity = intensity;
            let errors = input.validate();
            assert!(
                errors.iter().any(|e| e.contains("intensity")),
                "intensity {} should fail",
                intensity
            );
        }
    }

    #[test]
    fn test_intensity_bounds_pass() {
        for intensity in [MIN_INTENSITY, MAX_INTENSITY] {
            let mut input = valid_input();
            input.intensity = intensity;
            assert!(input.validate().is_empty());
        }
    }

    #[test]
    fn test_empty_category_fails() {
        let mut input = valid_input();
        input.cognitive_distortion = "".to_string();
        let errors = input.validate();
        assert!(errors.iter().any(|e| e.contains("cognitive_distortion")));
    }

    #[test]
    fn test_multiple_failures_all_reported() {
        let input = NewThought {
            content: "".to_string(),
            intensity: 0,
            cognitive_distortion: "".to_string(),
            trigger: None,
        };
        assert_eq!(input.validate().len(), 3);
    }

    #[test]
    fn test_date_range_contains() {
        use chrono::TimeZone;
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let range = DateRange {
            from: Some(from),
            to: Some(to),
        };

        assert!(range.contains(from));
        assert!(range.contains(to));
        assert!(range.contains(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_open_range_contains_everything() {
        let range = DateRange::default();
        assert!(range.contains(Utc::now()));
    }
}
