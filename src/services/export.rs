//! CSV export
//!
//! Renders a user's thoughts as RFC 4180 style CSV. Fields containing a
//! comma, quote, or line break are quoted, and embedded quotes are
//! doubled. The column order matches the journal view, newest first.

use crate::models::Thought;

/// CSV header row.
pub const CSV_HEADER: &str = "Date,Intensity,Cognitive Distortion,Trigger,Content";

/// Render `thoughts` as a CSV document, header included.
///
/// A missing trigger renders as an empty field. Rows keep the order of
/// the input slice.
pub fn to_csv(thoughts: &[Thought]) -> String {
    let mut out = String::with_capacity(64 + thoughts.len() * 80);
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");

    for thought in thoughts {
        out.push_str(&escape_field(
            &thought.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ));
        out.push(',');
        out.push_str(&thought.intensity.to_string());
        out.push(',');
        out.push_str(&escape_field(&thought.cognitive_distortion));
        out.push(',');
        out.push_str(&escape_field(thought.trigger.as_deref().unwrap_or("")));
        out.push(',');
        out.push_str(&escape_field(&thought.content));
        out.push_str("\r\n");
    }

    out
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\r') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn thought(content: &str, trigger: Option<&str>) -> Thought {
        Thought {
            id: 1,
            user_id: 1,
            content: content.to_string(),
            intensity: 6,
            cognitive_distortion: "catastrophizing".to_string(),
            trigger: trigger.map(|t| t.to_string()),
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    #[test]
    fn test_header_only_for_empty_journal() {
        let csv = to_csv(&[]);
        assert_eq!(csv, "Date,Intensity,Cognitive Distortion,Trigger,Content\r\n");
    }

    #[test]
    fn test_plain_fields_unquoted() {
        let csv = to_csv(&[thought("Nobody will hire me", Some("rejection email"))]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "2026-03-14 09:26:53,6,catastrophizing,rejection email,Nobody will hire me"
        );
    }

    #[test]
    fn test_missing_trigger_is_empty_field() {
        let csv = to_csv(&[thought("Nobody will hire me", None)]);

        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].contains(",catastrophizing,,Nobody"));
    }

    #[test]
    fn test_comma_in_field_is_quoted() {
        let csv = to_csv(&[thought("I failed, again", None)]);

        assert!(csv.contains("\"I failed, again\""));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = to_csv(&[thought("She said \"no\" to me", None)]);

        assert!(csv.contains("\"She said \"\"no\"\" to me\""));
    }

    #[test]
    fn test_newline_in_field_is_quoted() {
        let csv = to_csv(&[thought("line one\nline two", None)]);

        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_escape_field_round_trip() {
        // Unescaping a quoted field recovers the original text
        let original = "a \"quoted\" value, with\nbreaks";
        let escaped = escape_field(original);

        assert!(escaped.starts_with('"') && escaped.ends_with('"'));
        let inner = &escaped[1..escaped.len() - 1];
        assert_eq!(inner.replace("\"\"", "\""), original);
    }
}
