//! Optional analytics reporting hook.

use std::sync::{Arc, Mutex};
use tracing::info;

/// Event name reported when a card link is opened.
pub const OPEN_LINK_EVENT: &str = "open_link";

/// Event name reported when feedback is given.
pub const FEEDBACK_EVENT: &str = "feedback";

/// Source reported when a card carries no source label.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Property bag sent with an analytics event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsProps {
    /// Source label of the card.
    pub source: String,
    /// Vote label, for feedback events.
    pub label: Option<String>,
}

impl AnalyticsProps {
    /// Creates props for `source`, substituting [`UNKNOWN_SOURCE`] when blank.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let source = if source.trim().is_empty() {
            UNKNOWN_SOURCE.to_string()
        } else {
            source.to_string()
        };
        Self {
            source,
            label: None,
        }
    }

    /// Attaches a vote label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Outbound analytics call.
///
/// Reporting is fire-and-forget: implementations must not fail the caller
/// and there is no result to inspect.
pub trait AnalyticsReporter: Send + Sync {
    /// Reports a named event.
    fn report(&self, event: &str, props: &AnalyticsProps);
}

/// Reporter used when no analytics hook is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl AnalyticsReporter for NoopReporter {
    fn report(&self, _event: &str, _props: &AnalyticsProps) {}
}

/// Reporter emitting analytics events as structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl AnalyticsReporter for TracingReporter {
    fn report(&self, event: &str, props: &AnalyticsProps) {
        info!(
            target: "digestdeck::analytics",
            event,
            source = %props.source,
            label = props.label.as_deref().unwrap_or_default(),
            "analytics event"
        );
    }
}

/// Reporter that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(String, AnalyticsProps)>>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events received so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<(String, AnalyticsProps)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsReporter for RecordingReporter {
    fn report(&self, event: &str, props: &AnalyticsProps) {
        if let Ok(mut events) = self.events.lock() {
            events.push((event.to_string(), props.clone()));
        }
    }
}

impl<T: AnalyticsReporter + ?Sized> AnalyticsReporter for Arc<T> {
    fn report(&self, event: &str, props: &AnalyticsProps) {
        (**self).report(event, props);
    }
}

impl<T: AnalyticsReporter + ?Sized> AnalyticsReporter for Box<T> {
    fn report(&self, event: &str, props: &AnalyticsProps) {
        (**self).report(event, props);
    }
}

impl<T: AnalyticsReporter> AnalyticsReporter for Option<T> {
    fn report(&self, event: &str, props: &AnalyticsProps) {
        if let Some(reporter) = self {
            reporter.report(event, props);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_source_is_unknown() {
        assert_eq!(AnalyticsProps::new("  ").source, UNKNOWN_SOURCE);
        assert_eq!(AnalyticsProps::new("Hacker News").source, "Hacker News");
    }

    #[test]
    fn test_recording_through_arc() {
        let recorder = Arc::new(RecordingReporter::new());
        let shared: Arc<RecordingReporter> = Arc::clone(&recorder);

        shared.report(FEEDBACK_EVENT, &AnalyticsProps::new("s").with_label("like"));

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "feedback");
        assert_eq!(events[0].1.label.as_deref(), Some("like"));
    }

    #[test]
    fn test_absent_reporter_is_silent() {
        let reporter: Option<RecordingReporter> = None;
        reporter.report(OPEN_LINK_EVENT, &AnalyticsProps::new("s"));
    }
}
