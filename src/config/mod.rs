//! TOML configuration loading.
//!
//! Separated from struct definitions so the loading logic (path discovery,
//! file I/O) stays independent of the serde schema.

mod structs;

pub use structs::{FileConfig, GeneralConfig, JsonConfig, StreamConfig, TerminalConfig};

use crate::sink::LogId;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A completely empty config file must still produce a working setup —
/// `#[serde(default)]` on every field ensures zero-config works out of
/// the box.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// App identity applies to all sinks, so it sits above any one of them.
    pub general: GeneralConfig,
    /// Stream-level defaults, currently the default log id.
    pub stream: StreamConfig,
    /// Terminal sink settings.
    pub terminal: TerminalConfig,
    /// File sink settings — base directory and line timestamps.
    pub file: FileConfig,
    /// JSONL sink settings — machine-readable records are a separate concern.
    pub json: JsonConfig,
}

impl Config {
    /// Loads the user's config from the default platform location.
    /// A missing file is not an error; it yields the defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be
    /// read, or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path instead of the default
    /// location. Useful for tests and embedders with their own layout.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn config_path() -> Result<PathBuf, crate::Error> {
        let dirs = directories::ProjectDirs::from("", "", "sectlog")
            .ok_or(crate::Error::ConfigDirNotFound)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The configured default id as a ready-to-use [`LogId`].
    #[must_use]
    pub fn default_id(&self) -> LogId {
        LogId::new(self.stream.default_id.clone())
    }
}
