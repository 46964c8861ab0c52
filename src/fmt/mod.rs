//! Runtime printf-style substitution for stream messages.
//!
//! Streams accept their format at runtime, so substitution can fail in ways
//! `format!` never does (missing argument, unknown spec). The engine reports
//! those honestly; swallowing them is the stream's policy, not ours. Partial
//! output rendered before a failure travels inside the error so the stream
//! can still keep it.

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write as _;

/// Closed set of runtime argument kinds — one variant per family of
/// conversion specs rather than one per Rust primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Char(char),
    Bool(bool),
}

impl FormatArg {
    /// `%d` and `%i` accept any variant with a sensible signed reading.
    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Uint(v) => i64::try_from(*v).ok(),
            Self::Float(v) => Some(*v as i64),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Str(_) | Self::Char(_) => None,
        }
    }

    /// `%u` and `%x` need an unsigned reading; negatives fall back to display form.
    fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            Self::Int(v) => u64::try_from(*v).ok(),
            Self::Float(v) => u64::try_from(*v as i64).ok(),
            Self::Bool(b) => Some(u64::from(*b)),
            Self::Str(_) | Self::Char(_) => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Uint(v) => Some(*v as f64),
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            Self::Str(_) | Self::Char(_) => None,
        }
    }
}

/// `%s` accepts every variant via its display form.
impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{c}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i32> for FormatArg {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for FormatArg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FormatArg {
    fn from(v: u32) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u64> for FormatArg {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<usize> for FormatArg {
    fn from(v: usize) -> Self {
        Self::Uint(v as u64)
    }
}

impl From<f32> for FormatArg {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for FormatArg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FormatArg {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<char> for FormatArg {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<bool> for FormatArg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Builds a `&[FormatArg]` slice from mixed-type expressions for the
/// stream's append operations.
#[macro_export]
macro_rules! fmt_args {
    () => {
        &[] as &[$crate::fmt::FormatArg]
    };
    ($($arg:expr),+ $(,)?) => {
        &[$($crate::fmt::FormatArg::from($arg)),+][..]
    };
}

/// What went wrong during substitution — indices and spec chars included so
/// diagnostics can point at the offending format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// The format consumed more arguments than were supplied.
    MissingArgument(usize),
    /// Unrecognized conversion spec after `%`.
    UnknownSpec(char),
    /// The format ended in the middle of a `%` spec.
    TrailingPercent,
}

/// Carries the output rendered before the failure, so best-effort callers
/// can keep the partial text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    kind: FormatErrorKind,
    partial: String,
}

impl FormatError {
    #[must_use]
    pub const fn kind(&self) -> &FormatErrorKind {
        &self.kind
    }

    /// Recovers whatever text substitution produced before the failure.
    #[must_use]
    pub fn into_partial(self) -> String {
        self.partial
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FormatErrorKind::MissingArgument(i) => write!(f, "missing argument {i}"),
            FormatErrorKind::UnknownSpec(c) => write!(f, "unknown conversion spec '%{c}'"),
            FormatErrorKind::TrailingPercent => write!(f, "format ends inside a '%' spec"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Time-valued arguments use the `%t` convention; logs present them as
/// plain floats. The rewrite works on a private copy so the caller's
/// format string is never touched, and allocates only when needed.
fn rewrite_time_specs(format: &str) -> Cow<'_, str> {
    if format.contains("%t") {
        Cow::Owned(format.replace("%t", "%f"))
    } else {
        Cow::Borrowed(format)
    }
}

/// Byte-bounded truncation that never splits a char.
fn truncate_to(mut s: String, max_len: usize) -> String {
    if s.len() > max_len {
        let mut cut = max_len;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    s
}

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Substitutes `args` into `format`, bounding the result to `max_len` bytes.
///
/// Specs: `%d`/`%i`, `%u`, `%x`, `%f` (optional `.N` precision), `%s`, `%c`,
/// `%%`, and the `%t` alias for `%f`. An argument of the "wrong" variant is
/// coerced where a sensible reading exists and falls back to its display
/// form otherwise.
///
/// # Errors
/// [`FormatError`] on a missing argument, unknown spec, or trailing `%`;
/// the partial output is recoverable via [`FormatError::into_partial`].
pub fn render(format: &str, args: &[FormatArg], max_len: usize) -> Result<String, FormatError> {
    let format = rewrite_time_specs(format);
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::new();
    let mut next_arg = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        i += 1;

        if i >= chars.len() {
            return Err(FormatError {
                kind: FormatErrorKind::TrailingPercent,
                partial: truncate_to(out, max_len),
            });
        }

        if chars[i] == '%' {
            out.push('%');
            i += 1;
            continue;
        }

        // Optional `.N` precision, meaningful for %f only.
        let mut precision = None;
        if chars[i] == '.' {
            i += 1;
            let mut digits = 0usize;
            let mut seen = false;
            while i < chars.len() && chars[i].is_ascii_digit() {
                digits = digits
                    .saturating_mul(10)
                    .saturating_add(chars[i] as usize - '0' as usize);
                seen = true;
                i += 1;
            }
            if seen {
                // Precision beyond the message bound would only produce
                // text the truncation throws away.
                precision = Some(digits.min(max_len));
            }
            if i >= chars.len() {
                return Err(FormatError {
                    kind: FormatErrorKind::TrailingPercent,
                    partial: truncate_to(out, max_len),
                });
            }
        }

        let spec = chars[i];
        i += 1;

        let Some(arg) = args.get(next_arg) else {
            return Err(FormatError {
                kind: FormatErrorKind::MissingArgument(next_arg),
                partial: truncate_to(out, max_len),
            });
        };
        next_arg += 1;

        match spec {
            'd' | 'i' => match arg.as_i64() {
                Some(v) => {
                    let _ = write!(out, "{v}");
                }
                None => {
                    let _ = write!(out, "{arg}");
                }
            },
            'u' => match arg.as_u64() {
                Some(v) => {
                    let _ = write!(out, "{v}");
                }
                None => {
                    let _ = write!(out, "{arg}");
                }
            },
            'x' => match arg.as_u64() {
                Some(v) => {
                    let _ = write!(out, "{v:x}");
                }
                None => {
                    let _ = write!(out, "{arg}");
                }
            },
            'f' => match arg.as_f64() {
                Some(v) => {
                    let p = precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
                    let _ = write!(out, "{v:.p$}");
                }
                None => {
                    let _ = write!(out, "{arg}");
                }
            },
            's' | 'c' => {
                let _ = write!(out, "{arg}");
            }
            other => {
                return Err(FormatError {
                    kind: FormatErrorKind::UnknownSpec(other),
                    partial: truncate_to(out, max_len),
                });
            }
        }
    }

    Ok(truncate_to(out, max_len))
}
