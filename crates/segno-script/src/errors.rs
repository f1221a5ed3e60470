//! Error types for the segno-script crate.

use thiserror::Error;

/// Failure to compile a script source.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The source does not parse.
    #[error("script compile error: {0}")]
    Compile(#[from] rhai::ParseError),
}

/// Result type alias using ScriptError.
pub type Result<T> = std::result::Result<T, ScriptError>;
