#![forbid(unsafe_code)]

//! `sectlog` - Stream-composable, section-tracking front end for logging sinks.
//!
//! Call sites build a log message incrementally through a [`LogStream`] and
//! may bracket a logical unit of work in a named section. The stream tracks
//! the open section, validates begin/end pairing, and delivers the
//! accumulated text to its sink exactly once — explicitly or at scope exit.
//!
//! # Example
//!
//! ```
//! use sectlog::{LogStream, MemorySink, SinkOp, fmt_args};
//!
//! let sink = MemorySink::new();
//! {
//!     let mut stream = LogStream::with_section(&sink, SinkOp::Message, "load");
//!     stream.sect_begin("reading %s", fmt_args!["input.dat"]);
//!     stream.push(42).push(" records");
//!     stream.sect_end("done in %t s", fmt_args![0.25]);
//! }
//! let deliveries = sink.deliveries();
//! assert_eq!(deliveries.len(), 1);
//! assert!(deliveries[0].text.contains("SectionBegin load"));
//! assert!(deliveries[0].text.contains("SectionEnd load"));
//! ```

pub mod config;
pub mod error;
pub mod fmt;
pub mod sink;
pub mod stream;

// Re-exports for convenience
pub use config::Config;
pub use error::Error;
pub use fmt::{FormatArg, FormatError, FormatErrorKind};
pub use sink::{
    Channel, FanoutSink, FileSink, JsonSink, LogId, MAX_MESSAGE_SIZE, MemorySink, Sink, SinkOp,
    TerminalSink,
};
pub use stream::LogStream;
