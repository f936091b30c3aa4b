//! Error types for recording decode.

use std::fmt;

use crate::value::ValueKind;

/// Errors raised while decoding a recording.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// An id token is not valid hexadecimal. Never substitute a wrong id.
    #[error("object id token {token:?} is not valid hexadecimal")]
    InvalidId { token: String },

    /// An elapsed-time directive's payload is not a valid second count.
    #[error("elapsed-time directive {raw:?} is not a valid second count")]
    InvalidElapsed { raw: String },

    /// A transform record's token count maps to no known field layout.
    #[error("transform record has {count} tokens, which matches no known layout")]
    UnknownTransformLayout { count: usize },

    /// A recognized property's value failed its coercion.
    #[error("property {name} rejected value {value:?}: expected {kind}")]
    InvalidPropertyValue {
        name: String,
        value: String,
        kind: ValueKind,
    },

    /// A transform token failed to parse as a number.
    #[error("transform token {token:?} is not numeric")]
    InvalidTransformToken { token: String },

    /// The recording's absolute time anchor failed to parse.
    #[error("reference time {value:?} is not a valid RFC 3339 timestamp")]
    InvalidReferenceTime { value: String },

    /// Parent inference found no eligible launch platform.
    #[error("no launch platform candidate for weapon {id:x}")]
    UnresolvedParent { id: u64 },

    /// The recording could not be read.
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    /// A decode failure tagged with the 1-based line it occurred on.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wrap this error with the line it occurred on.
    pub fn at_line(self, line: usize) -> Self {
        DecodeError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

/// A decode error tagged with the 1-based line it occurred on.
#[derive(Debug)]
pub struct LineError {
    pub line: usize,
    pub error: DecodeError,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Outcome of a best-effort decode run.
///
/// Lines that fail are reported here instead of aborting the run; the
/// model keeps everything that decoded cleanly.
#[derive(Debug, Default)]
pub struct DecodeReport {
    /// Number of lines consumed from the source.
    pub lines_read: usize,
    /// Per-line failures, in input order.
    pub errors: Vec<LineError>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
