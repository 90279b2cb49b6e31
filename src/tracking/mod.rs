//! Interaction tracking.
//!
//! Click and feedback events are appended to bounded logs in a
//! [`LogStore`](crate::storage::LogStore), counted for the page's local
//! counters and optionally forwarded to an analytics hook.

mod clock;
mod logger;
mod reporter;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logger::{EventLogger, LocalCounts, trim_to_capacity};
pub use reporter::{
    AnalyticsProps, AnalyticsReporter, FEEDBACK_EVENT, NoopReporter, OPEN_LINK_EVENT,
    RecordingReporter, TracingReporter, UNKNOWN_SOURCE,
};
