//! # Digestdeck
//!
//! Client-side enhancement layer for a static news digest page.
//!
//! Digestdeck takes a fixed list of pre-rendered digest cards and keeps the
//! page in sync with the reader's controls: it filters cards by free-text
//! query, repository flag and tier, orders them by relevance score with a
//! stable sort, and records click and feedback interactions in bounded
//! device-local logs that can be exported as JSON.
//!
//! ## Features
//!
//! - Filter predicate conjunction over query, github-only toggle and tier
//! - Stable score sort with reattach-in-place semantics
//! - Append-only, capacity-bounded click and feedback logs
//! - Pluggable log stores (in-memory, filesystem)
//! - Optional analytics reporting hook
//! - Feedback export and JSONL archive import
//!
//! ## Example
//!
//! ```rust,ignore
//! use digestdeck::{Board, Controls, DeckConfig, MemoryLogStore, NoopReporter, Page};
//!
//! let cards = digestdeck::io::load_deck("latest.json".as_ref())?;
//! let mut board = Board::mount(
//!     Page::with_cards(cards),
//!     MemoryLogStore::new(),
//!     NoopReporter,
//!     &DeckConfig::default(),
//! )
//! .expect("deck has cards");
//! board.on_controls_changed(&Controls::new().with_query("rust"));
//! println!("{} visible", board.controller().visible_count());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod board;
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod storage;
pub mod tracking;
pub mod view;

// Re-exports for convenience
pub use board::{Board, Page};
pub use config::DeckConfig;
pub use models::{
    Card, CardAttributes, CardId, ControlState, Controls, EventRecord, LogKind, SortMode, Tier,
    TierFilter,
};
pub use storage::{FilesystemLogStore, LogStore, MemoryLogStore};
pub use tracking::{AnalyticsReporter, Clock, EventLogger, NoopReporter, SystemClock};
pub use view::{CardGrid, Counter, ViewController};

/// Error type for digestdeck operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed deck or import files, unsafe storage keys |
/// | `OperationFailed` | I/O errors, serialization failures, poisoned locks |
///
/// Interaction callbacks never surface these to the reader; they are logged
/// and the page continues with a safe default.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from any displayable cause.
    pub fn failed(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for digestdeck operations.
pub type Result<T> = std::result::Result<T, Error>;
