//! Error types for the segno-command crate.

use thiserror::Error;

use segno_model::{GraphError, ObjectKind, Path, PathError};
use segno_serial::SerializationFormatError;

/// Failure to construct, apply or decode a command.
///
/// Path errors are recoverable (the one operation is aborted); graph
/// errors during apply indicate a collaborator bug and are treated as
/// fatal for the document by callers.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command's target path no longer resolves.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A structural mutation failed mid-command.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A command payload could not be decoded.
    #[error(transparent)]
    Format(#[from] SerializationFormatError),

    /// A serialized command carries a tag no factory is registered for.
    #[error("unknown command tag {0}")]
    UnknownCommand(u8),

    /// Rename aimed at an unnamed object kind.
    #[error("a {found} cannot be renamed")]
    NotRenameable { found: ObjectKind },

    /// A script edit aimed at a non-script process.
    #[error("process at {path} is not a script")]
    NotAScript { path: Path },
}

/// Result type alias using CommandError.
pub type Result<T> = std::result::Result<T, CommandError>;
