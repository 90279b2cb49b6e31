//! Filesystem-based log store.
//!
//! Stands in for device-local storage when running outside a browser: each
//! key is a JSON file under a base directory.
//!
//! # Security
//!
//! - **Path traversal**: keys are validated to prevent directory escape
//! - **File size limits**: oversized files are refused instead of loaded

use crate::storage::traits::LogStore;
use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum size of a stored log file (4MB).
const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Log store keeping one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FilesystemLogStore {
    base_path: PathBuf,
}

impl FilesystemLogStore {
    /// Creates a store rooted at `base_path`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates a store, creating its directory up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_create(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| Error::failed("create_store_dir", e))?;
        Ok(Self { base_path })
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the file path for a key.
    fn item_path(&self, key: &str) -> Result<PathBuf> {
        if !Self::is_safe_key(key) {
            return Err(Error::InvalidInput(format!(
                "storage key contains invalid characters: {key}"
            )));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }

    /// Checks that a key is usable as a bare file name.
    #[must_use]
    pub fn is_safe_key(key: &str) -> bool {
        !key.is_empty()
            && key.len() <= 200
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl LogStore for FilesystemLogStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path).map_err(|e| Error::failed("read_log_metadata", e))?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::InvalidInput(format!(
                "log file exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
                path.display()
            )));
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::failed("read_log_file", e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        fs::create_dir_all(&self.base_path).map_err(|e| Error::failed("create_store_dir", e))?;

        // Stage next to the target so a crash never leaves a half-written log.
        let mut staged = NamedTempFile::new_in(&self.base_path)
            .map_err(|e| Error::failed("stage_log_file", e))?;
        staged
            .write_all(value.as_bytes())
            .map_err(|e| Error::failed("write_log_file", e))?;
        staged
            .persist(&path)
            .map_err(|e| Error::failed("persist_log_file", e))?;
        Ok(())
    }
}
