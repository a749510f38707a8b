//! Analytics service
//!
//! Aggregates a user's thoughts into a summary for one of four preset
//! windows. All aggregation happens in memory over the rows the
//! repository returns for the window.

use crate::models::{DateRange, Thought};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Preset analytics windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
}

impl DateFilter {
    /// Parse the `filter` query parameter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "7days" => Some(Self::Last7Days),
            "30days" => Some(Self::Last30Days),
            _ => None,
        }
    }

    /// The date range this filter selects, relative to `now`.
    pub fn range(&self, now: DateTime<Utc>) -> DateRange {
        let start_of_today = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));

        match self {
            Self::Today => DateRange {
                from: Some(start_of_today),
                to: Some(now),
            },
            Self::Yesterday => DateRange {
                from: Some(start_of_today - Duration::days(1)),
                to: Some(start_of_today - Duration::milliseconds(1)),
            },
            Self::Last7Days => DateRange {
                from: Some(now - Duration::days(7)),
                to: Some(now),
            },
            Self::Last30Days => DateRange {
                from: Some(now - Duration::days(30)),
                to: Some(now),
            },
        }
    }

    /// Number of days the window spans, used for the per-day average.
    pub fn days(&self) -> i64 {
        match self {
            Self::Today | Self::Yesterday => 1,
            Self::Last7Days => 7,
            Self::Last30Days => 30,
        }
    }
}

/// Aggregated summary for one window.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_thoughts: usize,
    pub avg_intensity: f64,
    pub avg_per_day: f64,
    pub top_category: String,
    pub breakdown: Vec<CategoryCount>,
}

/// One distortion's share of the window.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Summarize `thoughts` over a window of `days` days.
///
/// An empty window yields zero averages and a `top_category` of "None".
/// Ties for the top category break lexicographically, so the result is
/// stable across runs.
pub fn summarize(thoughts: &[Thought], days: i64) -> AnalyticsSummary {
    let total = thoughts.len();

    let avg_intensity = if total == 0 {
        0.0
    } else {
        let sum: i64 = thoughts.iter().map(|t| t.intensity as i64).sum();
        round1(sum as f64 / total as f64)
    };

    let avg_per_day = round1(total as f64 / days.max(1) as f64);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for thought in thoughts {
        *counts.entry(thought.cognitive_distortion.as_str()).or_insert(0) += 1;
    }

    let mut breakdown: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));

    let top_category = breakdown
        .first()
        .map(|c| c.category.clone())
        .unwrap_or_else(|| "None".to_string());

    AnalyticsSummary {
        total_thoughts: total,
        avg_intensity,
        avg_per_day,
        top_category,
        breakdown,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn thought(intensity: i32, distortion: &str) -> Thought {
        Thought {
            id: 0,
            user_id: 1,
            content: "test".to_string(),
            intensity,
            cognitive_distortion: distortion.to_string(),
            trigger: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(DateFilter::parse("today"), Some(DateFilter::Today));
        assert_eq!(DateFilter::parse("yesterday"), Some(DateFilter::Yesterday));
        assert_eq!(DateFilter::parse("7days"), Some(DateFilter::Last7Days));
        assert_eq!(DateFilter::parse("30days"), Some(DateFilter::Last30Days));
        assert_eq!(DateFilter::parse("week"), None);
        assert_eq!(DateFilter::parse("Today"), None);
    }

    #[test]
    fn test_today_range_starts_at_midnight() {
        let now = Utc::now();
        let range = DateFilter::Today.range(now);

        let from = range.from.expect("from should be set");
        assert_eq!(from.hour(), 0);
        assert_eq!(from.minute(), 0);
        assert_eq!(from.date_naive(), now.date_naive());
        assert_eq!(range.to, Some(now));
    }

    #[test]
    fn test_yesterday_range_excludes_today() {
        let now = Utc::now();
        let range = DateFilter::Yesterday.range(now);

        let from = range.from.expect("from should be set");
        let to = range.to.expect("to should be set");

        assert_eq!(from.date_naive(), (now - Duration::days(1)).date_naive());
        assert_eq!(to.date_naive(), from.date_naive());
        assert!(to < Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN)));
    }

    #[test]
    fn test_window_days() {
        assert_eq!(DateFilter::Today.days(), 1);
        assert_eq!(DateFilter::Yesterday.days(), 1);
        assert_eq!(DateFilter::Last7Days.days(), 7);
        assert_eq!(DateFilter::Last30Days.days(), 30);
    }

    #[test]
    fn test_summary_empty_window() {
        let summary = summarize(&[], 7);

        assert_eq!(summary.total_thoughts, 0);
        assert_eq!(summary.avg_intensity, 0.0);
        assert_eq!(summary.avg_per_day, 0.0);
        assert_eq!(summary.top_category, "None");
        assert!(summary.breakdown.is_empty());
    }

    #[test]
    fn test_avg_intensity_rounded_to_one_decimal() {
        let thoughts = vec![thought(4, "catastrophizing"), thought(8, "catastrophizing")];
        let summary = summarize(&thoughts, 1);
        assert_eq!(summary.avg_intensity, 6.0);

        // 1 + 2 + 2 = 5 over 3 thoughts rounds to 1.7
        let thoughts = vec![
            thought(1, "labeling"),
            thought(2, "labeling"),
            thought(2, "labeling"),
        ];
        let summary = summarize(&thoughts, 1);
        assert_eq!(summary.avg_intensity, 1.7);
    }

    #[test]
    fn test_avg_per_day_uses_window_length() {
        let thoughts = vec![
            thought(5, "labeling"),
            thought(5, "labeling"),
            thought(5, "labeling"),
        ];

        let summary = summarize(&thoughts, 7);
        assert_eq!(summary.total_thoughts, 3);
        assert_eq!(summary.avg_per_day, 0.4);

        let summary = summarize(&thoughts, 30);
        assert_eq!(summary.avg_per_day, 0.1);
    }

    #[test]
    fn test_top_category_highest_count() {
        let thoughts = vec![
            thought(5, "mind-reading"),
            thought(5, "mind-reading"),
            thought(5, "catastrophizing"),
        ];

        let summary = summarize(&thoughts, 1);
        assert_eq!(summary.top_category, "mind-reading");
    }

    #[test]
    fn test_top_category_tie_breaks_alphabetically() {
        let thoughts = vec![
            thought(5, "mind-reading"),
            thought(5, "catastrophizing"),
        ];

        let summary = summarize(&thoughts, 1);
        assert_eq!(summary.top_category, "catastrophizing");
    }

    #[test]
    fn test_breakdown_sorted_by_count_then_name() {
        let thoughts = vec![
            thought(5, "labeling"),
            thought(5, "labeling"),
            thought(5, "mind-reading"),
            thought(5, "blaming"),
        ];

        let summary = summarize(&thoughts, 1);
        let order: Vec<&str> = summary
            .breakdown
            .iter()
            .map(|c| c.category.as_str())
            .collect();

        assert_eq!(order, vec!["labeling", "blaming", "mind-reading"]);
        assert_eq!(summary.breakdown[0].count, 2);
    }
}
