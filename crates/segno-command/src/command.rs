//! The command contract.

use std::any::Any;
use std::fmt;

use segno_model::Document;
use segno_serial::BinaryWriter;

use crate::errors::Result;

/// Closed set of command types, used as the wire tag for serialized
/// commands and as the registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Rename,
    MoveEvent,
    CreateIntervalBetween,
    CreateIntervalAndEndEvent,
    RemoveInterval,
    AddProcess,
    RemoveProcess,
    EditScript,
    CreateCable,
    RemoveCable,
}

impl CommandKind {
    /// Stable wire tag.
    pub fn tag(self) -> u8 {
        match self {
            CommandKind::Rename => 0,
            CommandKind::MoveEvent => 1,
            CommandKind::CreateIntervalBetween => 2,
            CommandKind::CreateIntervalAndEndEvent => 3,
            CommandKind::RemoveInterval => 4,
            CommandKind::AddProcess => 5,
            CommandKind::RemoveProcess => 6,
            CommandKind::EditScript => 7,
            CommandKind::CreateCable => 8,
            CommandKind::RemoveCable => 9,
        }
    }

    /// Inverse of [`CommandKind::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => CommandKind::Rename,
            1 => CommandKind::MoveEvent,
            2 => CommandKind::CreateIntervalBetween,
            3 => CommandKind::CreateIntervalAndEndEvent,
            4 => CommandKind::RemoveInterval,
            5 => CommandKind::AddProcess,
            6 => CommandKind::RemoveProcess,
            7 => CommandKind::EditScript,
            8 => CommandKind::CreateCable,
            9 => CommandKind::RemoveCable,
            _ => return None,
        })
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A reversible unit of document mutation.
///
/// Commands hold paths to their targets plus enough before/after state
/// to reverse themselves; they never hold references into the graph.
/// Construction must not mutate anything — the first mutation is the
/// `redo()` run by [`crate::CommandStack::submit`]. Repeated
/// `undo(); redo();` must reproduce the exact same document state as the
/// first `redo()`.
pub trait Command: Any {
    fn kind(&self) -> CommandKind;

    /// Human-readable label for history views.
    fn label(&self) -> String;

    /// Apply the mutation.
    fn redo(&self, doc: &mut Document) -> Result<()>;

    /// Reverse the mutation.
    fn undo(&self, doc: &mut Document) -> Result<()>;

    /// Write the payload; `(kind tag, payload)` must reconstruct an
    /// equivalent command through the registry.
    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()>;

    /// Try to absorb `other`, the command submitted immediately after
    /// this one. Returns whether the merge happened; a refusal must
    /// leave both commands untouched. The default refuses everything;
    /// implementations accept only the same command type aimed at the
    /// same target.
    fn merge_with(&mut self, other: &dyn Command) -> bool {
        let _ = other;
        false
    }

    /// Downcast support for merge checks.
    fn as_any(&self) -> &dyn Any;
}
