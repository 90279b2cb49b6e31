//! Serialized text form of a stored log.

use crate::models::EventRecord;
use crate::{Error, Result};
use serde_json::Value;

/// Decodes stored log text into its raw entries.
///
/// Text that is not a JSON array decodes as an empty log. Entries are kept
/// exactly as stored, including ones this crate cannot interpret, so that
/// rewriting the log after an append leaves them untouched.
#[must_use]
pub fn decode_entries(text: &str) -> Vec<Value> {
    match serde_json::from_str(text) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(error = %e, "stored log is not a JSON array");
            Vec::new()
        },
    }
}

/// Decodes stored log text into records.
///
/// Entries that are not record objects are skipped individually so one bad
/// entry does not discard the rest of the log.
#[must_use]
pub fn decode_log(text: &str) -> Vec<EventRecord> {
    records_from_entries(decode_entries(text))
}

/// Interprets raw entries as records, skipping those that do not decode.
#[must_use]
pub fn records_from_entries(entries: Vec<Value>) -> Vec<EventRecord> {
    let total = entries.len();
    let records: Vec<EventRecord> = entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        tracing::debug!(skipped = total - records.len(), "skipped malformed log entries");
    }
    records
}

/// Converts a record to its stored entry form.
pub fn record_entry(record: &EventRecord) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| Error::failed("serialize_record", e))
}

/// Encodes a log as compact JSON text.
pub fn encode_log(records: &[EventRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(|e| Error::failed("serialize_log", e))
}

/// Encodes raw entries as compact JSON text.
pub fn encode_entries(entries: &[Value]) -> Result<String> {
    serde_json::to_string(entries).map_err(|e| Error::failed("serialize_log", e))
}
