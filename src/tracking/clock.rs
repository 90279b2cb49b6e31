//! Time source for event timestamps and the "today" boundary.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

/// Source of the current time.
///
/// Timestamps and the current date come from the same clock, so a record
/// written "now" always counts as "today".
pub trait Clock: Send + Sync {
    /// Returns the current time with its UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Returns the current time as an ISO-8601 timestamp with milliseconds.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Returns the current date as `YYYY-MM-DD`.
    fn today(&self) -> String {
        self.now().format("%Y-%m-%d").to_string()
    }
}

/// Clock reading the system time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Parses an RFC 3339 instant.
    ///
    /// # Errors
    ///
    /// Returns an error if `instant` is not valid RFC 3339.
    pub fn parse(instant: &str) -> crate::Result<Self> {
        DateTime::parse_from_rfc3339(instant)
            .map(Self)
            .map_err(|e| crate::Error::InvalidInput(format!("bad instant '{instant}': {e}")))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
