//! Configuration struct definitions.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Application name, used for the file sink's log file name.
    pub app_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_name: "sectlog".to_string(),
        }
    }
}

/// Stream configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StreamConfig {
    /// Default log id attached to deliveries when a call site supplies none.
    /// Explicit here rather than ambient state somewhere in the process.
    pub default_id: String,
}

/// Terminal sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Enable the terminal sink.
    pub enabled: bool,
    /// Prefix each line with a timestamp.
    pub timestamps: bool,
    /// Timestamp format (strftime).
    pub timestamp_format: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timestamps: false,
            timestamp_format: "%H:%M:%S".to_string(),
        }
    }
}

/// File sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Enable the file sink.
    pub enabled: bool,
    /// Base directory for log files; empty selects the platform default.
    pub base_dir: String,
    /// Timestamp format (strftime).
    pub timestamp_format: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_dir: String::new(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

/// JSONL sink configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct JsonConfig {
    /// Enable the JSONL sink.
    pub enabled: bool,
    /// Record file path; empty selects the platform default.
    pub path: String,
}
