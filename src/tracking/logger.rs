//! Bounded click and feedback logs.

use super::clock::{Clock, SystemClock};
use super::reporter::{AnalyticsProps, AnalyticsReporter, FEEDBACK_EVENT, OPEN_LINK_EVENT};
use crate::Result;
use crate::config::LogSettings;
use crate::io::{DownloadSink, feedback_export_json};
use crate::models::{Card, EventRecord, LogKind, OPEN_LABEL, WEB_CHANNEL};
use crate::storage::LogStore;
use crate::storage::codec::record_entry;
use crate::view::{Counter, render_optional};
use tracing::{debug, info, warn};

/// Counts shown in the page's local counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalCounts {
    /// Click events whose timestamp falls on the current local date.
    pub today_clicks: usize,
    /// Length of the feedback log.
    pub total_feedback: usize,
}

/// Records interactions with cards into capacity-bounded local logs.
///
/// Every callback runs to completion and never fails the caller: storage
/// errors are logged and the interaction is dropped.
pub struct EventLogger<S, R, C = SystemClock> {
    store: S,
    reporter: R,
    clock: C,
    settings: LogSettings,
    click_counter: Option<Counter>,
    feedback_counter: Option<Counter>,
}

impl<S: LogStore, R: AnalyticsReporter> EventLogger<S, R> {
    /// Creates a logger using the system clock.
    #[must_use]
    pub fn new(store: S, reporter: R, settings: LogSettings) -> Self {
        Self::with_clock(store, reporter, SystemClock, settings)
    }
}

impl<S: LogStore, R: AnalyticsReporter, C: Clock> EventLogger<S, R, C> {
    /// Creates a logger reading time from `clock`.
    #[must_use]
    pub fn with_clock(store: S, reporter: R, clock: C, settings: LogSettings) -> Self {
        Self {
            store,
            reporter,
            clock,
            settings,
            click_counter: None,
            feedback_counter: None,
        }
    }

    /// Attaches the counter displays present on the page.
    #[must_use]
    pub fn with_counters(
        mut self,
        click_counter: Option<Counter>,
        feedback_counter: Option<Counter>,
    ) -> Self {
        self.click_counter = click_counter;
        self.feedback_counter = feedback_counter;
        self
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the log settings.
    pub const fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// Returns the today's-clicks display, if present.
    pub const fn click_counter(&self) -> Option<&Counter> {
        self.click_counter.as_ref()
    }

    /// Returns the total-feedback display, if present.
    pub const fn feedback_counter(&self) -> Option<&Counter> {
        self.feedback_counter.as_ref()
    }

    /// Returns the storage key of a log.
    #[must_use]
    pub fn key(&self, kind: LogKind) -> &str {
        match kind {
            LogKind::Click => &self.settings.click_key,
            LogKind::Feedback => &self.settings.feedback_key,
        }
    }

    /// Reads a whole log, oldest first.
    #[must_use]
    pub fn records(&self, kind: LogKind) -> Vec<EventRecord> {
        self.store.read(self.key(kind))
    }

    /// Appends `record` to the log under `key`, keeping only the newest
    /// entries up to the configured capacity.
    ///
    /// Entries already stored are carried over as they are; the only ones
    /// ever removed are the oldest past capacity. Returns the length of the
    /// stored log: after the append on success, or as it was read when the
    /// write fails. A failed write is logged and leaves the log unchanged.
    pub fn append_event(&self, key: &str, record: EventRecord) -> usize {
        let mut entries = self.store.read_entries(key);
        let stored = entries.len();

        let entry = match record_entry(&record) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "failed to encode event");
                return stored;
            },
        };
        entries.push(entry);
        trim_to_capacity(&mut entries, self.settings.capacity);

        if let Err(e) = self.store.write_entries(key, &entries) {
            warn!(key, error = %e, "failed to persist event log");
            return stored;
        }
        debug!(key, len = entries.len(), "event appended");
        entries.len()
    }

    /// Builds a record from a card's own metadata.
    ///
    /// `fallback_href` is used only when the card has no link of its own.
    #[must_use]
    pub fn build_record(&self, card: &Card, fallback_href: &str, label: &str) -> EventRecord {
        EventRecord {
            timestamp: self.clock.timestamp(),
            id: card.id.to_string(),
            title: card.title.clone(),
            source: card.source.clone(),
            link: card
                .link
                .clone()
                .unwrap_or_else(|| fallback_href.to_string()),
            label: label.to_string(),
            channel: WEB_CHANNEL.to_string(),
        }
    }

    /// Records that a link inside `card` was opened.
    ///
    /// Returns false, doing nothing, when the link has no enclosing card.
    pub fn track_click(&mut self, card: Option<&Card>, href: &str) -> bool {
        let Some(card) = card else {
            debug!(href, "click outside any card ignored");
            return false;
        };

        let record = self.build_record(card, href, OPEN_LABEL);
        self.append_event(&self.settings.click_key, record);
        self.render_local_counts();

        self.reporter
            .report(OPEN_LINK_EVENT, &AnalyticsProps::new(&card.source));
        true
    }

    /// Records a feedback vote on `card`.
    ///
    /// A missing or blank vote label, or a button outside any card, is a
    /// no-op that returns false.
    pub fn track_feedback(&mut self, card: Option<&Card>, label: Option<&str>) -> bool {
        let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
            debug!("feedback without a vote label ignored");
            return false;
        };
        let Some(card) = card else {
            debug!(label, "feedback outside any card ignored");
            return false;
        };

        let record = self.build_record(card, "", label);
        self.append_event(&self.settings.feedback_key, record);
        self.render_local_counts();

        self.reporter.report(
            FEEDBACK_EVENT,
            &AnalyticsProps::new(&card.source).with_label(label),
        );
        true
    }

    /// Computes the local counts from the stored logs.
    #[must_use]
    pub fn local_counts(&self) -> LocalCounts {
        let today = self.clock.today();
        let today_clicks = self
            .records(LogKind::Click)
            .iter()
            .filter(|record| record.is_on_date(&today))
            .count();
        let total_feedback = self.records(LogKind::Feedback).len();

        LocalCounts {
            today_clicks,
            total_feedback,
        }
    }

    /// Recomputes the local counts and writes them into the displays present.
    pub fn render_local_counts(&mut self) -> LocalCounts {
        let counts = self.local_counts();
        render_optional(self.click_counter.as_mut(), counts.today_clicks);
        render_optional(self.feedback_counter.as_mut(), counts.total_feedback);
        counts
    }

    /// Offers the whole feedback log to `sink` as a pretty-printed JSON file.
    ///
    /// The transient handle used for the offer is released afterwards.
    /// Returns the number of exported records.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the offer fails.
    pub fn download_feedback<D: DownloadSink>(&self, sink: &mut D) -> Result<usize> {
        let records = self.records(LogKind::Feedback);
        let body = feedback_export_json(&records)?;

        let handle = sink.offer(&self.settings.export_filename, body.as_bytes())?;
        sink.release(handle);

        info!(
            records = records.len(),
            filename = %self.settings.export_filename,
            "feedback exported"
        );
        Ok(records.len())
    }
}

/// Drops the oldest entries so at most `capacity` remain.
pub fn trim_to_capacity<T>(records: &mut Vec<T>, capacity: usize) {
    let capacity = capacity.max(1);
    if records.len() > capacity {
        let excess = records.len() - capacity;
        records.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryDownloadSink;
    use crate::storage::MemoryLogStore;
    use crate::tracking::{FixedClock, NoopReporter, RecordingReporter, UNKNOWN_SOURCE};
    use std::sync::Arc;

    const NOW: &str = "2026-10-16T10:15:00+02:00";

    fn settings(capacity: usize) -> LogSettings {
        LogSettings {
            capacity,
            ..LogSettings::default()
        }
    }

    fn logger(
        capacity: usize,
    ) -> EventLogger<MemoryLogStore, Arc<RecordingReporter>, FixedClock> {
        EventLogger::with_clock(
            MemoryLogStore::new(),
            Arc::new(RecordingReporter::new()),
            FixedClock::parse(NOW).unwrap(),
            settings(capacity),
        )
        .with_counters(Some(Counter::new()), Some(Counter::new()))
    }

    fn card() -> Card {
        Card::new("rss::1", 70.0)
            .with_title("Model release")
            .with_source("Source: Lab Blog")
            .with_link("https://lab.example/post")
    }

    fn record_at(ts: &str, id: &str) -> EventRecord {
        EventRecord {
            timestamp: ts.to_string(),
            id: id.to_string(),
            label: OPEN_LABEL.to_string(),
            ..EventRecord::default()
        }
    }

    #[test]
    fn test_trim_keeps_newest_in_order() {
        let mut records: Vec<_> = (0..7).map(|i| record_at("t", &i.to_string())).collect();
        trim_to_capacity(&mut records, 5);

        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_trim_zero_capacity_keeps_one() {
        let mut records = vec![record_at("t", "a"), record_at("t", "b")];
        trim_to_capacity(&mut records, 0);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "b");
    }

    #[test]
    fn test_append_at_capacity_stays_bounded() {
        let logger = logger(3);
        let key = logger.settings().click_key.clone();
        for i in 0..3 {
            logger.append_event(&key, record_at("t", &i.to_string()));
        }

        let len = logger.append_event(&key, record_at("t", "new"));

        assert_eq!(len, 3);
        let ids: Vec<_> = logger
            .records(LogKind::Click)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["1", "2", "new"]);
    }

    #[test]
    fn test_append_recovers_from_corrupt_log() {
        let store = MemoryLogStore::with_item("anm_click_events", "{{garbage");
        let logger = EventLogger::new(store, NoopReporter, LogSettings::default());

        let len = logger.append_event("anm_click_events", record_at("t", "a"));
        assert_eq!(len, 1);
    }

    #[test]
    fn test_append_keeps_entries_it_cannot_read() {
        let store = MemoryLogStore::with_item(
            "anm_click_events",
            r#"[{"ts":"2026-10-15T01:00:00Z","id":"x","extra":"keep"},{"ts":17,"id":"y"}]"#,
        );
        let logger = EventLogger::new(store, NoopReporter, LogSettings::default());

        let len = logger.append_event("anm_click_events", record_at("t", "new"));

        assert_eq!(len, 3);
        let entries = logger.store().read_entries("anm_click_events");
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            serde_json::json!({"ts":"2026-10-15T01:00:00Z","id":"x","extra":"keep"})
        );
        assert_eq!(entries[1], serde_json::json!({"ts":17,"id":"y"}));
        assert_eq!(entries[2]["id"], "new");
    }

    #[test]
    fn test_append_leaves_legacy_entries_untouched() {
        let legacy = r#"{"ts":"2025-01-02T03:04:05Z","title":"t","source":"s","href":"h"}"#;
        let store = MemoryLogStore::with_item("anm_click_events", format!("[{legacy}]"));
        let logger = EventLogger::new(store, NoopReporter, LogSettings::default());

        logger.append_event("anm_click_events", record_at("t", "new"));

        let entries = logger.store().read_entries("anm_click_events");
        let expected: serde_json::Value = serde_json::from_str(legacy).unwrap();
        assert_eq!(entries[0], expected);
        assert!(entries[0].get("channel").is_none());
    }

    #[test]
    fn test_failed_write_reports_stored_length() {
        struct ReadOnlyStore(MemoryLogStore);

        impl LogStore for ReadOnlyStore {
            fn get_item(&self, key: &str) -> Result<Option<String>> {
                self.0.get_item(key)
            }

            fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
                Err(crate::Error::failed("set_item", "read-only"))
            }
        }

        let store = ReadOnlyStore(MemoryLogStore::with_item(
            "anm_click_events",
            r#"[{"ts":"t","id":"a"}]"#,
        ));
        let logger = EventLogger::new(store, NoopReporter, LogSettings::default());

        assert_eq!(logger.append_event("anm_click_events", record_at("t", "b")), 1);
        assert_eq!(logger.records(LogKind::Click).len(), 1);
    }

    #[test]
    fn test_track_click_builds_record_from_card() {
        let mut logger = logger(500);
        assert!(logger.track_click(Some(&card()), "https://anchor.example"));

        let records = logger.records(LogKind::Click);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "rss::1");
        assert_eq!(record.title, "Model release");
        assert_eq!(record.source, "Lab Blog");
        assert_eq!(record.link, "https://lab.example/post");
        assert_eq!(record.label, "open");
        assert_eq!(record.channel, "web");
        assert_eq!(record.timestamp, "2026-10-16T10:15:00.000+02:00");
        assert_eq!(logger.click_counter().map(Counter::text), Some("1"));
    }

    #[test]
    fn test_track_click_falls_back_to_anchor_href() {
        let mut logger = logger(500);
        let bare = Card::new("x", 1.0);
        logger.track_click(Some(&bare), "https://anchor.example");

        assert_eq!(logger.records(LogKind::Click)[0].link, "https://anchor.example");
    }

    #[test]
    fn test_track_click_outside_card_is_noop() {
        let mut logger = logger(500);
        assert!(!logger.track_click(None, "https://anchor.example"));
        assert!(logger.records(LogKind::Click).is_empty());
    }

    #[test]
    fn test_track_click_reports_open_link() {
        let reporter = Arc::new(RecordingReporter::new());
        let mut logger = EventLogger::with_clock(
            MemoryLogStore::new(),
            Arc::clone(&reporter),
            FixedClock::parse(NOW).unwrap(),
            LogSettings::default(),
        );

        logger.track_click(Some(&card()), "");
        logger.track_click(Some(&Card::new("y", 0.0)), "");

        let events = reporter.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, OPEN_LINK_EVENT);
        assert_eq!(events[0].1.source, "Lab Blog");
        assert_eq!(events[0].1.label, None);
        assert_eq!(events[1].1.source, UNKNOWN_SOURCE);
    }

    #[test]
    fn test_track_feedback_appends_and_reports() {
        let reporter = Arc::new(RecordingReporter::new());
        let mut logger = EventLogger::with_clock(
            MemoryLogStore::new(),
            Arc::clone(&reporter),
            FixedClock::parse(NOW).unwrap(),
            LogSettings::default(),
        )
        .with_counters(None, Some(Counter::new()));

        assert!(logger.track_feedback(Some(&card()), Some("like")));

        let records = logger.records(LogKind::Feedback);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "like");
        assert_eq!(logger.feedback_counter().map(Counter::text), Some("1"));
        assert_eq!(reporter.events()[0].0, FEEDBACK_EVENT);
        assert_eq!(reporter.events()[0].1.label.as_deref(), Some("like"));
    }

    #[test]
    fn test_track_feedback_without_label_is_noop() {
        let mut logger = logger(500);
        logger.render_local_counts();

        assert!(!logger.track_feedback(Some(&card()), None));
        assert!(!logger.track_feedback(Some(&card()), Some("  ")));

        assert!(logger.records(LogKind::Feedback).is_empty());
        assert_eq!(logger.feedback_counter().map(Counter::text), Some("0"));
        assert_eq!(logger.click_counter().map(Counter::text), Some("0"));
    }

    #[test]
    fn test_today_counts_only_current_date() {
        let mut logger = logger(500);
        let key = logger.settings().click_key.clone();
        logger.append_event(&key, record_at("2026-10-15T23:59:00.000+02:00", "y"));
        for id in ["a", "b", "c"] {
            logger.append_event(&key, record_at("2026-10-16T08:00:00.000+02:00", id));
        }

        let counts = logger.render_local_counts();

        assert_eq!(counts.today_clicks, 3);
        assert_eq!(logger.click_counter().map(Counter::text), Some("3"));
    }

    #[test]
    fn test_download_feedback_pretty_json() {
        let mut logger = logger(500);
        logger.track_feedback(Some(&card()), Some("like"));
        let mut sink = MemoryDownloadSink::new();

        let exported = logger.download_feedback(&mut sink).unwrap();

        assert_eq!(exported, 1);
        let downloads = sink.downloads();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].filename, "anm_feedback_export.json");
        let text = String::from_utf8(downloads[0].contents.clone()).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert_eq!(sink.outstanding(), 0);
    }

    #[test]
    fn test_download_empty_log() {
        let logger = logger(500);
        let mut sink = MemoryDownloadSink::new();

        assert_eq!(logger.download_feedback(&mut sink).unwrap(), 0);
        assert_eq!(sink.downloads()[0].contents, b"[]");
    }
}
