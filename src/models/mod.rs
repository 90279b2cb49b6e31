//! Data models for digestdeck.
//!
//! Cards are the read-only inputs produced by the page template, controls are
//! the reader's current filter and sort choices, and event records are the
//! interactions kept in the local logs.

mod card;
mod controls;
mod elements;
mod event;

pub(crate) use card::attr_text;
pub use card::{Card, CardAttributes, CardId, DEFAULT_TIER, Tier, normalize_source, parse_score};
pub use controls::{ControlState, Controls, SortMode, TierFilter};
pub use elements::{FeedbackButton, LinkClick};
pub use event::{EventRecord, KNOWN_VOTE_LABELS, LogKind, OPEN_LABEL, WEB_CHANNEL};
