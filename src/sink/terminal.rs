//! Terminal is the zero-configuration backend — immediate feedback on
//! stderr without file paths or databases.

use super::{Channel, LogId, Sink};
use crate::config::TerminalConfig;
use chrono::Local;
use std::io::{self, Write};

/// Writes tagged lines to stderr. Timestamps are off by default — terminal
/// readers usually have the context a file reader lacks.
#[derive(Debug, Clone)]
pub struct TerminalSink {
    timestamps: bool,
    timestamp_format: String,
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            timestamps: false,
            timestamp_format: "%H:%M:%S".to_string(),
        }
    }

    #[must_use]
    pub const fn timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// strftime syntax, applied only when timestamps are enabled.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn from_config(config: &TerminalConfig) -> Self {
        Self::new()
            .timestamps(config.timestamps)
            .timestamp_format(&config.timestamp_format)
    }

    /// Write errors are ignored — a broken stderr leaves no better channel
    /// to report through.
    fn write_line(&self, channel: Channel, text: &str, id: &LogId) {
        let mut line = String::new();
        if self.timestamps {
            line.push_str(&Local::now().format(&self.timestamp_format).to_string());
            line.push(' ');
        }
        line.push('[');
        line.push_str(channel.tag());
        line.push(']');
        if !id.is_empty() {
            line.push(' ');
            line.push_str(id.as_str());
        }
        line.push_str("  ");
        line.push_str(text);

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }
}

impl Sink for TerminalSink {
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
