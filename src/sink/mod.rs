//! The sink contract streams deliver into, plus the built-in backends
//! (terminal, file, JSONL, in-memory capture). Custom backends implement
//! [`Sink`] without modifying sectlog itself.

mod file;
mod json;
mod memory;
mod terminal;

pub use file::FileSink;
pub use json::JsonSink;
pub use memory::{Delivery, MemorySink};
pub use terminal::TerminalSink;

use crate::config::Config;
use std::fmt;
use ulid::Ulid;

/// Upper bound on one formatted message, shared by the substitution engine
/// and every sink implementation.
pub const MAX_MESSAGE_SIZE: usize = 2048;

/// Opaque correlation identifier attached to every delivery. Meaning is the
/// sink's business; streams only carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LogId(String);

impl LogId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// ULIDs are time-sortable and globally unique — safe even with
    /// concurrent streams minting ids.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The default-constructed id is empty; sinks usually omit it from output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which sink capability a delivery went through. Backends share tag and
/// name rendering via this enum instead of duplicating the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Ordinary accumulated output, `accept_message`.
    Message,
    /// Error-level accumulated output, `accept_diagnostic`.
    Diagnostic,
    /// Synchronous error reports (section mismatches), `report_error`.
    Report,
}

impl Channel {
    /// Bracketed severity tag for line-oriented backends.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Message => "INFO",
            Self::Diagnostic | Self::Report => "ERROR",
        }
    }

    /// Lowercase because the JSONL backend stores it as a queryable field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Diagnostic => "diagnostic",
            Self::Report => "report",
        }
    }
}

/// Selects which sink entry point a stream invokes at flush. Chosen at
/// construction, immutable for the stream's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SinkOp {
    /// Flush through `accept_message` (informational entry point).
    #[default]
    Message,
    /// Flush through `accept_diagnostic` (error entry point).
    Diagnostic,
}

impl SinkOp {
    /// Routes a flush to the bound sink capability.
    pub fn dispatch(self, sink: &dyn Sink, text: &str, id: &LogId) {
        match self {
            Self::Message => sink.accept_message(text, id),
            Self::Diagnostic => sink.accept_diagnostic(text, id),
        }
    }
}

/// Contract a stream requires from its downstream consumer.
///
/// `Send + Sync` so multiple concurrent streams may share one sink;
/// interior synchronization is the implementation's concern. None of the
/// methods return errors — a sink that cannot write has nowhere better to
/// report it, and logging must never abort the caller's control flow.
pub trait Sink: Send + Sync {
    /// Accepts a finished informational message.
    fn accept_message(&self, text: &str, id: &LogId);

    /// Accepts a finished error-level message.
    fn accept_diagnostic(&self, text: &str, id: &LogId);

    /// Accepts a synchronous error report, bypassing any buffering.
    /// Section mismatch checks land here.
    fn report_error(&self, text: &str, id: &LogId);
}

/// Shared sinks stay usable where an owned one is expected.
impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn accept_message(&self, text: &str, id: &LogId) {
        (**self).accept_message(text, id);
    }

    fn accept_diagnostic(&self, text: &str, id: &LogId) {
        (**self).accept_diagnostic(text, id);
    }

    fn report_error(&self, text: &str, id: &LogId) {
        (**self).report_error(text, id);
    }
}

/// Fans every call out to all members — one stream, several backends.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn Sink>>,
}

impl FanoutSink {
    #[must_use]
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Assembles the backends a config enables. An all-disabled config
    /// yields an empty fanout that discards everything.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut fanout = Self::new();
        if config.terminal.enabled {
            fanout = fanout.with(TerminalSink::from_config(&config.terminal));
        }
        if config.file.enabled {
            fanout = fanout.with(FileSink::from_config(&config.file, &config.general.app_name));
        }
        if config.json.enabled {
            fanout = fanout.with(JsonSink::from_config(&config.json));
        }
        fanout
    }

    #[must_use]
    pub fn with(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Tests verify the config wired up the expected number of backends.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Sink for FanoutSink {
    fn accept_message(&self, text: &str, id: &LogId) {
        for sink in &self.sinks {
            sink.accept_message(text, id);
        }
    }

    fn accept_diagnostic(&self, text: &str, id: &LogId) {
        for sink in &self.sinks {
            sink.accept_diagnostic(text, id);
        }
    }

    fn report_error(&self, text: &str, id: &LogId) {
        for sink in &self.sinks {
            sink.report_error(text, id);
        }
    }
}
