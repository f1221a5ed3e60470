//! Creating and removing intervals.

use std::any::Any;

use segno_model::{Cable, Document, Event, Id, Interval, Path, TimeNode};
use segno_serial::{BinRead, BinWrite, BinaryReader, BinaryWriter};

use crate::command::{Command, CommandKind};
use crate::errors::Result;

/// Create an interval between two existing events. Identifiers are
/// minted at construction so every redo recreates the same objects.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIntervalBetween {
    id: Id<Interval>,
    name: String,
    start: Id<Event>,
    end: Id<Event>,
}

impl CreateIntervalBetween {
    pub fn new(
        doc: &Document,
        name: impl Into<String>,
        start: Id<Event>,
        end: Id<Event>,
    ) -> Result<Self> {
        // Invalid endpoints are rejected here, before submit.
        doc.events.find(&start)?;
        doc.events.find(&end)?;
        Ok(Self {
            id: doc.intervals.mint(),
            name: name.into(),
            start,
            end,
        })
    }

    pub fn interval_id(&self) -> &Id<Interval> {
        &self.id
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            id: Id::read(r)?,
            name: r.read_str()?,
            start: Id::read(r)?,
            end: Id::read(r)?,
        })
    }
}

impl Command for CreateIntervalBetween {
    fn kind(&self) -> CommandKind {
        CommandKind::CreateIntervalBetween
    }

    fn label(&self) -> String {
        format!("Create interval \"{}\"", self.name)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        doc.create_interval_between(
            self.id.clone(),
            self.name.clone(),
            self.start.clone(),
            self.end.clone(),
        )?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        doc.remove_interval(&self.id)?;
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        w.write_str(&self.name)?;
        self.start.write(w)?;
        self.end.write(w)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Base building block of a scenario: from an existing event, create an
/// end event with its own time-node and an interval spanning the two.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIntervalAndEndEvent {
    name: String,
    start: Id<Event>,
    duration: i64,
    new_interval: Id<Interval>,
    new_event: Id<Event>,
    new_node: Id<TimeNode>,
}

impl CreateIntervalAndEndEvent {
    pub fn new(
        doc: &Document,
        name: impl Into<String>,
        start: Id<Event>,
        duration: i64,
    ) -> Result<Self> {
        doc.events.find(&start)?;
        Ok(Self {
            name: name.into(),
            start,
            duration,
            new_interval: doc.intervals.mint(),
            new_event: doc.events.mint(),
            new_node: doc.timenodes.mint(),
        })
    }

    pub fn interval_id(&self) -> &Id<Interval> {
        &self.new_interval
    }

    pub fn event_id(&self) -> &Id<Event> {
        &self.new_event
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            name: r.read_str()?,
            start: Id::read(r)?,
            duration: r.read_i64()?,
            new_interval: Id::read(r)?,
            new_event: Id::read(r)?,
            new_node: Id::read(r)?,
        })
    }
}

impl Command for CreateIntervalAndEndEvent {
    fn kind(&self) -> CommandKind {
        CommandKind::CreateIntervalAndEndEvent
    }

    fn label(&self) -> String {
        format!("Create interval \"{}\" and end event", self.name)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        doc.create_interval_and_end_event(
            self.name.clone(),
            self.start.clone(),
            self.duration,
            self.new_interval.clone(),
            self.new_event.clone(),
            self.new_node.clone(),
        )?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        doc.remove_interval(&self.new_interval)?;
        // Dropping the last event also drops the minted time-node.
        doc.remove_event(&self.new_event)?;
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_str(&self.name)?;
        self.start.write(w)?;
        w.write_i64(self.duration)?;
        self.new_interval.write(w)?;
        self.new_event.write(w)?;
        self.new_node.write(w)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Remove an interval, capturing its full subtree and the cables into
/// its processes so undo can restore everything exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveInterval {
    id: Id<Interval>,
    saved: Vec<u8>,
    cables: Vec<Cable>,
}

impl RemoveInterval {
    pub fn new(doc: &Document, id: Id<Interval>) -> Result<Self> {
        let interval = doc.intervals.find(&id)?;
        Ok(Self {
            saved: interval.to_bytes()?,
            cables: doc.cables_touching(&Path::interval(&id)),
            id,
        })
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            id: Id::read(r)?,
            saved: r.read_bytes()?,
            cables: Vec::read(r)?,
        })
    }
}

impl Command for RemoveInterval {
    fn kind(&self) -> CommandKind {
        CommandKind::RemoveInterval
    }

    fn label(&self) -> String {
        format!("Remove interval {}", self.id)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        for cable in &self.cables {
            doc.remove_cable(&cable.id)?;
        }
        doc.remove_interval(&self.id)?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        let interval = Interval::from_bytes(&self.saved)?;
        doc.add_interval(interval)?;
        for cable in &self.cables {
            doc.add_cable(cable.clone())?;
        }
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        w.write_bytes(&self.saved)?;
        self.cables.write(w)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
