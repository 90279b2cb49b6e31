//! Local log store trait.

use crate::Result;
use crate::models::EventRecord;
use crate::storage::codec::{decode_entries, encode_entries, encode_log, records_from_entries};
use serde_json::Value;

/// Device-local key-value storage holding serialized event logs.
///
/// Implementations only move text in and out under a key, the way browser
/// local storage does. Decoding and encoding of the stored sequence is
/// provided on top: [`read`](Self::read) and [`write`](Self::write) work on
/// typed records, [`read_entries`](Self::read_entries) and
/// [`write_entries`](Self::write_entries) on the entries exactly as stored.
///
/// # Shared access
///
/// A store may be shared by several pages or processes at once. Appends are
/// read-modify-write sequences with no locking between them, so two writers
/// appending concurrently can lose an entry: the last write wins. This is an
/// accepted limitation of local logs.
pub trait LogStore: Send + Sync {
    /// Returns the raw text stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the raw text stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Reads the entries stored under `key` without interpreting them.
    ///
    /// Never fails: a missing, unreadable or corrupt log reads as empty.
    fn read_entries(&self, key: &str) -> Vec<Value> {
        match self.get_item(key) {
            Ok(Some(text)) => decode_entries(&text),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::debug!(key, error = %e, "log unreadable, treating as empty");
                Vec::new()
            },
        }
    }

    /// Reads the log stored under `key` as records.
    ///
    /// Never fails. Entries that do not decode as records are skipped.
    fn read(&self, key: &str) -> Vec<EventRecord> {
        records_from_entries(self.read_entries(key))
    }

    /// Replaces the log stored under `key`.
    fn write(&self, key: &str, records: &[EventRecord]) -> Result<()> {
        let text = encode_log(records)?;
        self.set_item(key, &text)
    }

    /// Replaces the log stored under `key` with raw entries.
    fn write_entries(&self, key: &str, entries: &[Value]) -> Result<()> {
        let text = encode_entries(entries)?;
        self.set_item(key, &text)
    }
}
