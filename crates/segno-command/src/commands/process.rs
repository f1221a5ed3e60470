//! Attaching and detaching processes.

use std::any::Any;

use segno_model::{Cable, Document, Id, Interval, Path, Process};
use segno_serial::{BinRead, BinWrite, BinaryReader, BinaryWriter};

use crate::command::{Command, CommandKind};
use crate::errors::Result;

/// Attach a fully-built process to an interval. The process is captured
/// as a payload blob, so redo after a reload recreates the same ports
/// with the same identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct AddProcess {
    interval: Id<Interval>,
    process_id: Id<Process>,
    saved: Vec<u8>,
}

impl AddProcess {
    pub fn new(doc: &Document, interval: Id<Interval>, process: &Process) -> Result<Self> {
        doc.intervals.find(&interval)?;
        Ok(Self {
            interval,
            process_id: process.id.clone(),
            saved: process.to_bytes()?,
        })
    }

    pub fn process_id(&self) -> &Id<Process> {
        &self.process_id
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            interval: Id::read(r)?,
            process_id: Id::read(r)?,
            saved: r.read_bytes()?,
        })
    }
}

impl Command for AddProcess {
    fn kind(&self) -> CommandKind {
        CommandKind::AddProcess
    }

    fn label(&self) -> String {
        format!("Add process to interval {}", self.interval)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        let process = Process::from_bytes(&self.saved)?;
        doc.add_process(&self.interval, process)?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        doc.remove_process(&self.interval, &self.process_id)?;
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.interval.write(w)?;
        self.process_id.write(w)?;
        w.write_bytes(&self.saved)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Detach a process, capturing it and the cables into its ports so undo
/// restores both.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveProcess {
    interval: Id<Interval>,
    process_id: Id<Process>,
    saved: Vec<u8>,
    cables: Vec<Cable>,
}

impl RemoveProcess {
    pub fn new(doc: &Document, interval: Id<Interval>, process_id: Id<Process>) -> Result<Self> {
        let process = doc.intervals.find(&interval)?.processes.find(&process_id)?;
        let prefix = Path::interval(&interval).process(&process_id);
        Ok(Self {
            saved: process.to_bytes()?,
            cables: doc.cables_touching(&prefix),
            interval,
            process_id,
        })
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            interval: Id::read(r)?,
            process_id: Id::read(r)?,
            saved: r.read_bytes()?,
            cables: Vec::read(r)?,
        })
    }
}

impl Command for RemoveProcess {
    fn kind(&self) -> CommandKind {
        CommandKind::RemoveProcess
    }

    fn label(&self) -> String {
        format!("Remove process {}", self.process_id)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        for cable in &self.cables {
            doc.remove_cable(&cable.id)?;
        }
        doc.remove_process(&self.interval, &self.process_id)?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        let process = Process::from_bytes(&self.saved)?;
        doc.add_process(&self.interval, process)?;
        for cable in &self.cables {
            doc.add_cable(cable.clone())?;
        }
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.interval.write(w)?;
        self.process_id.write(w)?;
        w.write_bytes(&self.saved)?;
        self.cables.write(w)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
