//! Feedback export as a downloadable JSON file.

use crate::models::EventRecord;
use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Something that can offer a file to the reader for download.
///
/// Offering returns a transient handle (the page's object URL) which the
/// caller releases once the offer has been made.
pub trait DownloadSink {
    /// Transient resource backing an offer.
    type Handle;

    /// Offers `contents` for download under `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be offered.
    fn offer(&mut self, filename: &str, contents: &[u8]) -> Result<Self::Handle>;

    /// Releases the transient resource of a finished offer.
    fn release(&mut self, handle: Self::Handle);
}

/// Serializes a feedback log as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn feedback_export_json(records: &[EventRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| Error::failed("serialize_export", e))
}

/// Download sink saving files into a directory.
///
/// Contents are staged in a temporary file inside the directory, copied to
/// the target name, and the staging file is removed on release.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    dir: PathBuf,
}

impl DirectoryDownloadSink {
    /// Creates a sink saving into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, filename: &str) -> Result<PathBuf> {
        let valid = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\']);
        if !valid {
            return Err(Error::InvalidInput(format!(
                "download file name is not a bare name: {filename}"
            )));
        }
        Ok(self.dir.join(filename))
    }
}

impl DownloadSink for DirectoryDownloadSink {
    type Handle = NamedTempFile;

    fn offer(&mut self, filename: &str, contents: &[u8]) -> Result<Self::Handle> {
        let target = self.target(filename)?;
        fs::create_dir_all(&self.dir).map_err(|e| Error::failed("create_download_dir", e))?;

        let mut staged =
            NamedTempFile::new_in(&self.dir).map_err(|e| Error::failed("stage_download", e))?;
        staged
            .write_all(contents)
            .and_then(|()| staged.flush())
            .map_err(|e| Error::failed("write_download", e))?;
        fs::copy(staged.path(), &target).map_err(|e| Error::failed("save_download", e))?;

        tracing::debug!(path = %target.display(), bytes = contents.len(), "download saved");
        Ok(staged)
    }

    fn release(&mut self, handle: Self::Handle) {
        if let Err(e) = handle.close() {
            tracing::debug!(error = %e, "failed to remove staged download");
        }
    }
}

/// A download captured by [`MemoryDownloadSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Offered file name.
    pub filename: String,
    /// File contents.
    pub contents: Vec<u8>,
}

/// Download sink keeping offers in memory.
#[derive(Debug, Default)]
pub struct MemoryDownloadSink {
    downloads: Vec<Download>,
    outstanding: usize,
}

impl MemoryDownloadSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every download offered so far.
    #[must_use]
    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }

    /// Returns the number of offers whose handle has not been released.
    #[must_use]
    pub const fn outstanding(&self) -> usize {
        self.outstanding
    }
}

impl DownloadSink for MemoryDownloadSink {
    type Handle = usize;

    fn offer(&mut self, filename: &str, contents: &[u8]) -> Result<Self::Handle> {
        self.downloads.push(Download {
            filename: filename.to_string(),
            contents: contents.to_vec(),
        });
        self.outstanding += 1;
        Ok(self.downloads.len() - 1)
    }

    fn release(&mut self, _handle: Self::Handle) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}
