//! Import of exported feedback into an append-only JSONL archive.

use crate::models::{KNOWN_VOTE_LABELS, WEB_CHANNEL};
use crate::tracking::Clock;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Result of a feedback import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Rows appended to the archive.
    pub imported: usize,
    /// Rows skipped because they were not objects or had no known vote label.
    pub skipped: usize,
}

/// Imports an exported feedback file into the archive at `archive`.
///
/// The input must be a JSON array. Each object row gets `ts` (from `clock`)
/// and `channel` (`web`) filled in when missing and is appended as one JSON
/// line, keeping any extra fields it carries. Rows whose label is not a
/// known vote label, compared without case, are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the input is not a JSON array, or an
/// error if the archive cannot be written.
pub fn import_feedback<R: Read>(
    reader: R,
    archive: &Path,
    clock: &impl Clock,
) -> Result<ImportResult> {
    let payload: Value = serde_json::from_reader(reader)
        .map_err(|e| Error::InvalidInput(format!("feedback file is not valid JSON: {e}")))?;
    let Value::Array(rows) = payload else {
        return Err(Error::InvalidInput(
            "feedback file must be a JSON array of events".to_string(),
        ));
    };

    if let Some(parent) = archive.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::failed("create_archive_dir", e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(archive)
        .map_err(|e| Error::failed("open_archive", e))?;
    let mut writer = BufWriter::new(file);

    let mut result = ImportResult::default();
    for row in rows {
        let Some(row) = normalize_row(row, clock) else {
            result.skipped += 1;
            continue;
        };
        let line =
            serde_json::to_string(&Value::Object(row)).map_err(|e| Error::failed("encode_row", e))?;
        writeln!(writer, "{line}").map_err(|e| Error::failed("append_archive", e))?;
        result.imported += 1;
    }
    writer.flush().map_err(|e| Error::failed("flush_archive", e))?;

    tracing::info!(
        imported = result.imported,
        skipped = result.skipped,
        archive = %archive.display(),
        "feedback imported"
    );
    Ok(result)
}

/// Fills defaults into a row, or returns `None` if it should be skipped.
fn normalize_row(row: Value, clock: &impl Clock) -> Option<Map<String, Value>> {
    let Value::Object(mut row) = row else {
        return None;
    };

    row.entry("ts")
        .or_insert_with(|| Value::String(clock.timestamp()));
    row.entry("channel")
        .or_insert_with(|| Value::String(WEB_CHANNEL.to_string()));

    let label = row
        .get("label")
        .and_then(Value::as_str)
        .map(str::to_lowercase)?;
    KNOWN_VOTE_LABELS.contains(&label.as_str()).then_some(row)
}
