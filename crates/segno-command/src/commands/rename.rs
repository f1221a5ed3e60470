//! Renaming any named object.

use std::any::Any;

use segno_model::{Document, Path};
use segno_serial::{BinRead, BinWrite, BinaryReader, BinaryWriter};

use crate::command::{Command, CommandKind};
use crate::errors::{CommandError, Result};

/// Set the name of the object at a path. Consecutive renames of the
/// same target merge into one history entry, keeping the first old
/// name, so a character-by-character edit undoes in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Rename {
    path: Path,
    old_name: String,
    new_name: String,
}

impl Rename {
    pub fn new(doc: &Document, path: Path, new_name: impl Into<String>) -> Result<Self> {
        let target = doc.resolve(&path)?;
        let old_name = target
            .name()
            .ok_or(CommandError::NotRenameable {
                found: target.kind(),
            })?
            .to_string();
        Ok(Self {
            path,
            old_name,
            new_name: new_name.into(),
        })
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            path: Path::read(r)?,
            old_name: r.read_str()?,
            new_name: r.read_str()?,
        })
    }

    fn apply(&self, doc: &mut Document, name: &str) -> Result<()> {
        {
            let mut target = doc.resolve_mut(&self.path)?;
            if !target.set_name(name) {
                return Err(CommandError::NotRenameable {
                    found: target.kind(),
                });
            }
        }
        doc.touch(self.path.clone());
        Ok(())
    }
}

impl Command for Rename {
    fn kind(&self) -> CommandKind {
        CommandKind::Rename
    }

    fn label(&self) -> String {
        format!("Rename to \"{}\"", self.new_name)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        self.apply(doc, &self.new_name)
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        self.apply(doc, &self.old_name)
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.path.write(w)?;
        w.write_str(&self.old_name)?;
        w.write_str(&self.new_name)?;
        Ok(())
    }

    fn merge_with(&mut self, other: &dyn Command) -> bool {
        let Some(next) = other.as_any().downcast_ref::<Rename>() else {
            return false;
        };
        if next.path != self.path {
            return false;
        }
        self.new_name = next.new_name.clone();
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
