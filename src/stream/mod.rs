//! The section-tracking message builder. One instance per logical log
//! statement or bracketed unit of work: it accumulates formatted text,
//! validates section begin/end pairing, and guarantees the buffer reaches
//! the sink exactly once — explicitly via [`LogStream::flush`] or
//! implicitly at scope exit.

use crate::fmt::{self, FormatArg};
use crate::sink::{LogId, MAX_MESSAGE_SIZE, Sink, SinkOp};
use std::fmt::Write as _;

const SECTION_BEGIN: &str = "SectionBegin ";
const SECTION_END: &str = "SectionEnd ";

/// Stack-scoped builder bound to one sink and one of its entry points.
///
/// Every operation is best-effort and infallible from the caller's point of
/// view: formatting failures keep their partial output, section mismatches
/// go to the sink's error channel, and nothing here ever aborts the
/// caller's control flow.
pub struct LogStream<'a> {
    sink: &'a dyn Sink,
    /// Bound at construction; which sink capability the flush invokes.
    op: SinkOp,
    /// Empty when no section is open; holds exactly one name otherwise.
    sect_id: String,
    /// Attached to every delivery; updated by the id passed to `append`.
    id: LogId,
    buf: String,
    /// Lets a clean scope exit after an explicit flush skip the trailing
    /// empty delivery.
    flushed: bool,
}

impl<'a> LogStream<'a> {
    /// A stream with no section — plain incremental message building.
    #[must_use]
    pub fn new(sink: &'a dyn Sink, op: SinkOp) -> Self {
        Self {
            sink,
            op,
            sect_id: String::new(),
            id: LogId::default(),
            buf: String::new(),
            flushed: false,
        }
    }

    /// Pre-names the section this stream brackets. Naming alone counts as
    /// open: an instance that never calls [`sect_end`](Self::sect_end) gets
    /// a forced close at scope exit.
    #[must_use]
    pub fn with_section(sink: &'a dyn Sink, op: SinkOp, sect: &str) -> Self {
        let mut stream = Self::new(sink, op);
        stream.sect_id = sect.to_string();
        stream
    }

    /// Composite section id `<name><index>` for loops over numbered units.
    #[must_use]
    pub fn with_indexed_section(sink: &'a dyn Sink, op: SinkOp, sect: &str, index: u32) -> Self {
        Self::with_section(sink, op, &format!("{sect}{index}"))
    }

    /// Seeds the delivery id, typically with the configured default.
    #[must_use]
    pub fn id(mut self, id: LogId) -> Self {
        self.id = id;
        self
    }

    /// Formats `args` against `format` and appends the result, recording
    /// `id` for the eventual flush (an empty id leaves the current one in
    /// place). Output is truncated to [`MAX_MESSAGE_SIZE`]; a `%t` token is
    /// presented as `%f` without touching the caller's format string; a
    /// formatting failure keeps its partial output and is otherwise
    /// swallowed.
    pub fn append(&mut self, id: &LogId, format: &str, args: &[FormatArg]) -> &mut Self {
        if !id.is_empty() {
            self.id = id.clone();
        }
        self.push_formatted(format, args);
        self
    }

    /// Appends the display form of any value, like a stream insertion
    /// operator. Not subject to truncation.
    pub fn push<T: std::fmt::Display>(&mut self, value: T) -> &mut Self {
        let _ = write!(self.buf, "{value}");
        self
    }

    /// Marks the opening of the section named at construction, then appends
    /// the formatted text. Does not change the section id.
    pub fn sect_begin(&mut self, format: &str, args: &[FormatArg]) -> &mut Self {
        self.buf.push_str(SECTION_BEGIN);
        self.buf.push_str(&self.sect_id);
        self.buf.push(' ');
        self.push_formatted(format, args);
        self
    }

    /// Marks the close of the open section, appends the formatted text, and
    /// clears the section id. The only operation that closes a section.
    pub fn sect_end(&mut self, format: &str, args: &[FormatArg]) -> &mut Self {
        self.buf.push_str(SECTION_END);
        self.buf.push_str(&self.sect_id);
        self.buf.push(' ');
        self.push_formatted(format, args);
        self.sect_id.clear();
        self
    }

    /// Asserts that the open section is the expected one. A mismatch is
    /// reported to the sink's error channel immediately (not buffered) and
    /// execution continues.
    pub fn sect_check(&self, expected: &str) {
        if self.sect_id != expected {
            self.sink.report_error(
                &format!(
                    "expected end of section {} instead of {expected}",
                    self.sect_id
                ),
                &self.id,
            );
        }
    }

    /// [`sect_check`](Self::sect_check) against the composite `<name><index>` form.
    pub fn sect_check_indexed(&self, expected: &str, index: u32) {
        self.sect_check(&format!("{expected}{index}"));
    }

    /// Currently open section id, empty when none is open.
    #[must_use]
    pub fn sect_id(&self) -> &str {
        &self.sect_id
    }

    /// The id the next delivery will carry.
    #[must_use]
    pub fn log_id(&self) -> &LogId {
        &self.id
    }

    /// Text accumulated since the last flush, in call order.
    #[must_use]
    pub fn buffered(&self) -> &str {
        &self.buf
    }

    /// Delivers the buffer through the bound sink operation and clears it.
    /// Intended as a single terminal call; a repeat delivers an empty
    /// message, which is harmless.
    pub fn flush(&mut self) {
        self.op.dispatch(self.sink, &self.buf, &self.id);
        self.buf.clear();
        self.flushed = true;
    }

    fn push_formatted(&mut self, format: &str, args: &[FormatArg]) {
        let text = match fmt::render(format, args, MAX_MESSAGE_SIZE) {
            Ok(text) => text,
            Err(e) => e.into_partial(),
        };
        self.buf.push_str(&text);
    }
}

/// `write!(stream, ...)` works wherever chained `push` calls would.
impl std::fmt::Write for LogStream<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

/// Finalization runs on every exit path — normal return, early return,
/// unwind.
///
/// A section left open gets a forced `SectionEnd` synthesized into the
/// buffer, and that buffer is NOT delivered; only the no-open-section path
/// delivers. This asymmetry is kept for compatibility with existing log
/// consumers that treat a missing section close as a dropped unit of work.
impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        if !self.sect_id.is_empty() {
            self.buf.push_str(SECTION_END);
            self.buf.push_str(&self.sect_id);
            self.buf.push(' ');
            return;
        }
        if self.flushed && self.buf.is_empty() {
            return;
        }
        self.op.dispatch(self.sink, &self.buf, &self.id);
    }
}
