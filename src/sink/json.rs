//! Plain log files can't be efficiently queried — JSONL gives downstream
//! tooling a structured record per delivery without a database engine.

use super::{Channel, LogId, Sink};
use crate::config::JsonConfig;
use chrono::Local;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use ulid::Ulid;

/// Flat structure, one object per line — friendly to `grep` and `jq`.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    /// ULID is time-sortable and unique even with concurrent writers.
    id: String,
    /// RFC 3339 is the most widely supported machine-readable format.
    ts: String,
    /// Which sink capability the delivery went through.
    channel: &'a str,
    /// The stream's correlation id, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    log_id: Option<&'a str>,
    text: &'a str,
}

/// Append-only JSONL file.
#[derive(Debug, Clone)]
pub struct JsonSink {
    file_path: PathBuf,
}

impl Default for JsonSink {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSink {
    /// XDG state dir default works without configuration for common setups.
    #[must_use]
    pub fn new() -> Self {
        let file_path = directories::ProjectDirs::from("", "", "sectlog").map_or_else(
            || PathBuf::from("sectlog.jsonl"),
            |dirs| {
                dirs.state_dir()
                    .unwrap_or_else(|| dirs.data_dir())
                    .join("sectlog.jsonl")
            },
        );
        Self { file_path }
    }

    /// The default path doesn't work for every deployment.
    #[must_use]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    #[must_use]
    pub fn from_config(config: &JsonConfig) -> Self {
        let mut sink = Self::new();
        if !config.path.is_empty() {
            sink = sink.file_path(shellexpand::tilde(&config.path).into_owned());
        }
        sink
    }

    fn write_entry(&self, channel: Channel, text: &str, id: &LogId) {
        let entry = JsonEntry {
            id: Ulid::new().to_string(),
            ts: Local::now().to_rfc3339(),
            channel: channel.as_str(),
            log_id: if id.is_empty() { None } else { Some(id.as_str()) },
            text,
        };

        if let Err(e) = self.try_write(&entry) {
            eprintln!(
                "sectlog: json sink write to {} failed: {e}",
                self.file_path.display()
            );
        }
    }

    fn try_write(&self, entry: &JsonEntry<'_>) -> std::io::Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;
        file.write_all(line.as_bytes())
    }
}

impl Sink for JsonSink {
    fn accept_message(&self, text: &str, id: &LogId) {
        self.write_entry(Channel::Message, text, id);
    }

    fn accept_diagnostic(&self, text: &str, id: &LogId) {
        self.write_entry(Channel::Diagnostic, text, id);
    }

    fn report_error(&self, text: &str, id: &LogId) {
        self.write_entry(Channel::Report, text, id);
    }
}
