//! Configuration management.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! `DIGESTDECK_*` environment variables.

use crate::storage::FilesystemLogStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default number of records kept per log.
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Default storage key of the click log.
pub const DEFAULT_CLICK_KEY: &str = "anm_click_events";

/// Default storage key of the feedback log.
pub const DEFAULT_FEEDBACK_KEY: &str = "anm_feedback_events";

/// Default file name offered for the feedback export.
pub const DEFAULT_EXPORT_FILENAME: &str = "anm_feedback_export.json";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DIGESTDECK_DATA_DIR";

/// Environment variable overriding the log capacity.
pub const LOG_CAPACITY_ENV: &str = "DIGESTDECK_LOG_CAPACITY";

/// Main configuration for digestdeck.
#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// Directory holding the local logs.
    pub data_dir: PathBuf,
    /// Event log settings.
    pub logs: LogSettings,
    /// Diagnostic logging settings from the config file.
    pub logging: Option<LoggingSettings>,
}

/// Event log settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Maximum records kept per log; the oldest are trimmed first.
    pub capacity: usize,
    /// Storage key of the click log.
    pub click_key: String,
    /// Storage key of the feedback log.
    pub feedback_key: String,
    /// File name offered for the feedback export.
    pub export_filename: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LOG_CAPACITY,
            click_key: DEFAULT_CLICK_KEY.to_string(),
            feedback_key: DEFAULT_FEEDBACK_KEY.to_string(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

impl LogSettings {
    /// Sets the capacity, clamped so at least the newest record is kept.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}

/// Diagnostic logging section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `digestdeck=debug`.
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Write logs to this file instead of stderr.
    pub file: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Event log section.
    pub logs: Option<ConfigFileLogs>,
    /// Export section.
    pub export: Option<ConfigFileExport>,
    /// Diagnostic logging section.
    pub logging: Option<LoggingSettings>,
}

/// Logs section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLogs {
    /// Capacity per log.
    pub capacity: Option<usize>,
    /// Click log key.
    pub click_key: Option<String>,
    /// Feedback log key.
    pub feedback_key: Option<String>,
}

/// Export section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileExport {
    /// Export file name.
    pub filename: Option<String>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".digestdeck"),
            logs: LogSettings::default(),
            logging: None,
        }
    }
}

impl DeckConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::failed("read_config_file", e))?;
        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::failed("parse_config_file", e))?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/digestdeck/` on macOS)
    /// 2. XDG config dir (`~/.config/digestdeck/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("digestdeck").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("digestdeck")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|path| path.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                },
            }
        }

        Self::default()
    }

    /// Applies `DIGESTDECK_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(LOG_CAPACITY_ENV).ok(),
        )
    }

    /// Applies override values as read from the environment.
    ///
    /// An unparsable capacity is ignored.
    #[must_use]
    pub fn with_overrides(mut self, data_dir: Option<String>, capacity: Option<String>) -> Self {
        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = capacity {
            match raw.trim().parse::<usize>() {
                Ok(capacity) => self.logs = self.logs.with_capacity(capacity),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "ignoring invalid log capacity override");
                },
            }
        }
        self
    }

    /// Converts a `ConfigFile` to `DeckConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(logs) = file.logs {
            if let Some(capacity) = logs.capacity {
                config.logs = config.logs.with_capacity(capacity);
            }
            if let Some(key) = logs.click_key.and_then(|key| storage_key(key, "click_key")) {
                config.logs.click_key = key;
            }
            if let Some(key) = logs
                .feedback_key
                .and_then(|key| storage_key(key, "feedback_key"))
            {
                config.logs.feedback_key = key;
            }
        }
        if let Some(filename) = file.export.and_then(|export| export.filename) {
            config.logs.export_filename = filename;
        }
        config.logging = file.logging;

        config
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the log capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.logs = self.logs.with_capacity(capacity);
        self
    }
}

/// Accepts a configured log key only if every store can hold it.
fn storage_key(key: String, field: &str) -> Option<String> {
    if FilesystemLogStore::is_safe_key(&key) {
        Some(key)
    } else {
        tracing::warn!(field, key = %key, "ignoring unusable log key, keeping default");
        None
    }
}
