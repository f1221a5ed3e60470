//! Editing a script process.

use std::any::Any;

use segno_model::{Cable, Document, IdMap, Path, Port, ProcessKind};
use segno_serial::{BinRead, BinWrite, BinaryReader, BinaryWriter};

use crate::command::{Command, CommandKind};
use crate::errors::{CommandError, Result};

/// Replace the source of a script process, together with the port list
/// the new source implies.
///
/// Cables into the old ports are captured before the swap. Redo re-adds
/// the captured cables whose endpoints still resolve against the new
/// ports and silently drops the rest; undo restores the old source, the
/// old ports and every captured cable.
#[derive(Debug, Clone, PartialEq)]
pub struct EditScript {
    path: Path,
    new_source: String,
    old_source: String,
    new_ports: Vec<Port>,
    old_ports: Vec<Port>,
    old_cables: Vec<Cable>,
}

impl EditScript {
    pub fn new(
        doc: &Document,
        path: Path,
        new_source: impl Into<String>,
        new_ports: Vec<Port>,
    ) -> Result<Self> {
        let process = doc.resolve_process(&path)?;
        let old_source = process
            .script_source()
            .ok_or_else(|| CommandError::NotAScript { path: path.clone() })?
            .to_string();
        Ok(Self {
            old_ports: process.ports.iter().cloned().collect(),
            old_cables: doc.cables_touching(&path),
            path,
            new_source: new_source.into(),
            old_source,
            new_ports,
        })
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            path: Path::read(r)?,
            new_source: r.read_str()?,
            old_source: r.read_str()?,
            new_ports: Vec::read(r)?,
            old_ports: Vec::read(r)?,
            old_cables: Vec::read(r)?,
        })
    }

    fn swap(&self, doc: &mut Document, source: &str, ports: &[Port]) -> Result<()> {
        {
            let process = doc.resolve_process_mut(&self.path)?;
            match &mut process.kind {
                ProcessKind::Script { source: current } => *current = source.to_string(),
                _ => {
                    return Err(CommandError::NotAScript {
                        path: self.path.clone(),
                    })
                }
            }
            process.ports = IdMap::from_vec(ports.to_vec())?;
        }
        doc.touch(self.path.clone());
        Ok(())
    }
}

impl Command for EditScript {
    fn kind(&self) -> CommandKind {
        CommandKind::EditScript
    }

    fn label(&self) -> String {
        "Edit script".to_string()
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        for cable in &self.old_cables {
            doc.remove_cable(&cable.id)?;
        }
        self.swap(doc, &self.new_source, &self.new_ports)?;
        // Keep the cables whose endpoints survived the port change.
        for cable in &self.old_cables {
            if doc.add_cable(cable.clone()).is_err() {
                log::debug!("cable {} dropped by script edit", cable.id);
            }
        }
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        // Only the surviving subset is present at this point.
        for cable in &self.old_cables {
            if doc.cables.contains(&cable.id) {
                doc.remove_cable(&cable.id)?;
            }
        }
        self.swap(doc, &self.old_source, &self.old_ports)?;
        for cable in &self.old_cables {
            doc.add_cable(cable.clone())?;
        }
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.path.write(w)?;
        w.write_str(&self.new_source)?;
        w.write_str(&self.old_source)?;
        self.new_ports.write(w)?;
        self.old_ports.write(w)?;
        self.old_cables.write(w)?;
        Ok(())
    }

    fn merge_with(&mut self, other: &dyn Command) -> bool {
        let Some(next) = other.as_any().downcast_ref::<EditScript>() else {
            return false;
        };
        // Port changes between the edits would make the absorbed cable
        // captures disagree; only plain text edits merge.
        if next.path != self.path || next.old_ports != self.new_ports {
            return false;
        }
        self.new_source = next.new_source.clone();
        self.new_ports = next.new_ports.clone();
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
