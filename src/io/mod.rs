//! Deck loading, feedback export and feedback import.
//!
//! | Direction | Format | Entry point |
//! |-----------|--------|-------------|
//! | Deck in | JSON array of card attributes, or digest `{items}` | [`load_deck`] |
//! | Feedback out | Pretty-printed JSON array | [`feedback_export_json`], [`DownloadSink`] |
//! | Feedback in | JSON array appended to a JSONL archive | [`import_feedback`] |

mod deck;
mod export;
mod import;

pub use deck::{load_deck, parse_deck};
pub use export::{
    DirectoryDownloadSink, Download, DownloadSink, MemoryDownloadSink, feedback_export_json,
};
pub use import::{ImportResult, import_feedback};
