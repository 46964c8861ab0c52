//! Append-only file backend with timestamped lines under a per-app
//! directory.

use super::{Channel, LogId, Sink};
use crate::config::FileConfig;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// One `<app>.log` file under a base directory, appended line by line.
#[derive(Debug, Clone)]
pub struct FileSink {
    /// Empty string means "use the platform default" resolved at write time.
    base_dir: String,
    app_name: String,
    timestamp_format: String,
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSink {
    /// XDG state dir (or data dir) keeps logs out of the user's way without
    /// any configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dir: String::new(),
            app_name: "sectlog".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }

    /// Supports `~` expansion; an empty value restores the platform default.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Determines the log file name: `<base_dir>/<app>.log`.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// strftime syntax for the per-line timestamp.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn from_config(config: &FileConfig, app_name: &str) -> Self {
        let mut sink = Self::new()
            .app_name(app_name)
            .timestamp_format(&config.timestamp_format);
        if !config.base_dir.is_empty() {
            sink = sink.base_dir(&config.base_dir);
        }
        sink
    }

    fn resolve_base_dir(&self) -> PathBuf {
        if self.base_dir.is_empty() {
            return directories::ProjectDirs::from("", "", "sectlog").map_or_else(
                || PathBuf::from("logs"),
                |dirs| {
                    dirs.state_dir()
                        .unwrap_or_else(|| dirs.data_dir())
                        .join("logs")
                },
            );
        }
        PathBuf::from(shellexpand::tilde(&self.base_dir).into_owned())
    }

    fn log_path(&self) -> PathBuf {
        self.resolve_base_dir().join(format!("{}.log", self.app_name))
    }

    fn write_line(&self, channel: Channel, text: &str, id: &LogId) {
        let path = self.log_path();
        if let Err(e) = self.try_write(&path, channel, text, id) {
            // Nowhere better to report a broken log file than stderr.
            eprintln!("sectlog: file sink write to {} failed: {e}", path.display());
        }
    }

    fn try_write(
        &self,
        path: &PathBuf,
        channel: Channel,
        text: &str,
        id: &LogId,
    ) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let timestamp = Local::now().format(&self.timestamp_format);
        let line = if id.is_empty() {
            format!("{timestamp} [{}]  {text}\n", channel.tag())
        } else {
            format!("{timestamp} [{}] {id}  {text}\n", channel.tag())
        };

        // Single atomic append keeps concurrent writers from interleaving.
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())
    }
}

impl Sink for FileSink {
    fn accept_message(&self, text: &str, id: &LogId) {
        self.write_line(Channel::Message, text, id);
    }

    fn accept_diagnostic(&self, text: &str, id: &LogId) {
        self.write_line(Channel::Diagnostic, text, id);
    }

    fn report_error(&self, text: &str, id: &LogId) {
        self.write_line(Channel::Report, text, id);
    }
}
