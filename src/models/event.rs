//! Interaction event records.

use serde::{Deserialize, Serialize};

/// Label recorded for click-to-open events.
pub const OPEN_LABEL: &str = "open";

/// Channel tag written on every record produced by this crate.
pub const WEB_CHANNEL: &str = "web";

/// Vote labels accepted when importing exported feedback.
pub const KNOWN_VOTE_LABELS: &[&str] = &["like", "dislike", "upvote", "downvote", "favorite"];

/// Which local log a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// Click-to-open events.
    Click,
    /// Feedback votes.
    Feedback,
}

impl LogKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Feedback => "feedback",
        }
    }
}

/// A logged interaction with the card it happened on.
///
/// Field names on the wire follow the page's stored format (`ts`, `href`), so
/// logs written by earlier page revisions, which only carried `ts`, `title`,
/// `source` and `href`, still decode with the missing fields left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// ISO-8601 timestamp.
    #[serde(rename = "ts", default)]
    pub timestamp: String,
    /// Item identifier.
    #[serde(default)]
    pub id: String,
    /// Item title.
    #[serde(default)]
    pub title: String,
    /// Item source label.
    #[serde(default)]
    pub source: String,
    /// Link that was opened or voted on.
    #[serde(rename = "href", alias = "url", alias = "link", default)]
    pub link: String,
    /// `open` for clicks, the vote label for feedback.
    #[serde(default)]
    pub label: String,
    /// Origin channel.
    #[serde(default)]
    pub channel: String,
}

impl EventRecord {
    /// Returns true if the record's timestamp falls on `date` (`YYYY-MM-DD`).
    ///
    /// This is a plain prefix comparison on the stored text.
    #[must_use]
    pub fn is_on_date(&self, date: &str) -> bool {
        !date.is_empty() && self.timestamp.starts_with(date)
    }

    /// Returns true if the label is one of [`KNOWN_VOTE_LABELS`], ignoring case.
    #[must_use]
    pub fn has_known_vote_label(&self) -> bool {
        let label = self.label.to_lowercase();
        KNOWN_VOTE_LABELS.contains(&label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let record = EventRecord {
            timestamp: "2026-10-16T09:00:00.000+02:00".to_string(),
            id: "a".to_string(),
            link: "https://example.com".to_string(),
            label: OPEN_LABEL.to_string(),
            channel: WEB_CHANNEL.to_string(),
            ..EventRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["ts"], "2026-10-16T09:00:00.000+02:00");
        assert_eq!(json["href"], "https://example.com");
        assert_eq!(json["label"], "open");
    }

    #[test]
    fn test_legacy_record_decodes() {
        let json = r#"{"ts":"2025-01-02T03:04:05Z","title":"t","source":"s","href":"h"}"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.link, "h");
        assert!(record.id.is_empty());
        assert!(record.channel.is_empty());
    }

    #[test]
    fn test_is_on_date_prefix() {
        let record = EventRecord {
            timestamp: "2026-10-16T23:59:59Z".to_string(),
            ..EventRecord::default()
        };

        assert!(record.is_on_date("2026-10-16"));
        assert!(!record.is_on_date("2026-10-15"));
        assert!(!record.is_on_date(""));
    }

    #[test]
    fn test_known_vote_label_case_insensitive() {
        let mut record = EventRecord {
            label: "Like".to_string(),
            ..EventRecord::default()
        };
        assert!(record.has_known_vote_label());

        record.label = "meh".to_string();
        assert!(!record.has_known_vote_label());
    }
}
