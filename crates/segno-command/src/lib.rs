//! Undoable commands over the score document.
//!
//! Every edit is a [`Command`]: a reversible, serializable unit of
//! mutation addressing its targets by path. The [`CommandStack`] keeps
//! a linear history with a cursor and the clean/dirty saved marker; the
//! [`CommandRegistry`] turns serialized histories back into live
//! commands.

mod command;
pub mod commands;
mod errors;
mod registry;
mod stack;

pub use command::{Command, CommandKind};
pub use errors::{CommandError, Result};
pub use registry::{write_command, write_history, CommandRegistry};
pub use stack::{CommandStack, StackEvent, StackSubscriberId};
