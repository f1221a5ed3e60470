//! Error types for the segno-serial crate.

use thiserror::Error;

/// A corrupt, truncated or version-mismatched payload.
///
/// Propagates up to abort the whole load; a document read never
/// partially applies.
#[derive(Error, Debug)]
pub enum SerializationFormatError {
    /// The input ended before the value did.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The file does not start with the document magic.
    #[error("bad magic {found:?}, expected {expected:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    /// The file claims a format version this build does not read.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),

    /// A discriminant byte outside the closed set for its type.
    #[error("invalid {what} tag {tag}")]
    InvalidTag { what: &'static str, tag: u8 },

    /// A string field that is not valid UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,

    /// Trailing bytes after a complete top-level value.
    #[error("{0} trailing bytes after document")]
    TrailingBytes(usize),

    /// Structured-form error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying stream error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The decoded data violates a graph invariant (duplicate ids).
    #[error(transparent)]
    Graph(#[from] segno_model::GraphError),
}

/// Result type alias using SerializationFormatError.
pub type Result<T> = std::result::Result<T, SerializationFormatError>;
