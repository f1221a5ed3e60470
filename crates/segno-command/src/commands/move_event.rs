//! Moving events in time.

use std::any::Any;

use segno_model::{Document, Event, Id};
use segno_serial::{BinRead, BinWrite, BinaryReader, BinaryWriter};

use crate::command::{Command, CommandKind};
use crate::errors::Result;

/// Move an event (and with it the whole time-node) to a new date.
/// Consecutive moves of the same event merge, so a drag gesture is one
/// history entry undoing to the position before the drag started.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEvent {
    event: Id<Event>,
    old_date: i64,
    new_date: i64,
}

impl MoveEvent {
    pub fn new(doc: &Document, event: Id<Event>, new_date: i64) -> Result<Self> {
        let old_date = doc.events.find(&event)?.date;
        Ok(Self {
            event,
            old_date,
            new_date,
        })
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            event: Id::read(r)?,
            old_date: r.read_i64()?,
            new_date: r.read_i64()?,
        })
    }
}

impl Command for MoveEvent {
    fn kind(&self) -> CommandKind {
        CommandKind::MoveEvent
    }

    fn label(&self) -> String {
        format!("Move event {}", self.event)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        doc.set_event_date(&self.event, self.new_date)?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        doc.set_event_date(&self.event, self.old_date)?;
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.event.write(w)?;
        w.write_i64(self.old_date)?;
        w.write_i64(self.new_date)?;
        Ok(())
    }

    fn merge_with(&mut self, other: &dyn Command) -> bool {
        let Some(next) = other.as_any().downcast_ref::<MoveEvent>() else {
            return false;
        };
        if next.event != self.event {
            return false;
        }
        self.new_date = next.new_date;
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        let mut doc = Document::new("score");
        doc.create_event_with_timenode(Id::num(1), Id::num(1), "start", 0)
            .unwrap();
        doc.create_interval_and_end_event(
            "intro",
            Id::num(1),
            1000,
            Id::num(1),
            Id::num(2),
            Id::num(2),
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_move_event_redo_undo() {
        let mut doc = sample_document();
        let before = doc.clone();
        let command = MoveEvent::new(&doc, Id::num(2), 2500).unwrap();

        command.redo(&mut doc).unwrap();
        assert_eq!(doc.events.find(&Id::num(2)).unwrap().date, 2500);
        assert_eq!(doc.timenodes.find(&Id::num(2)).unwrap().date, 2500);

        command.undo(&mut doc).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_consecutive_moves_merge() {
        let doc = sample_document();
        let mut first = MoveEvent::new(&doc, Id::num(2), 1200).unwrap();
        let second = MoveEvent::new(&doc, Id::num(2), 1500).unwrap();
        assert!(first.merge_with(&second));
        assert_eq!(first.new_date, 1500);
        assert_eq!(first.old_date, 1000);

        let other = MoveEvent::new(&doc, Id::num(1), 0).unwrap();
        assert!(!first.merge_with(&other));
    }

    #[test]
    fn test_payload_round_trips() {
        let doc = sample_document();
        let command = MoveEvent::new(&doc, Id::num(2), 2500).unwrap();

        let mut w = BinaryWriter::new();
        command.write_payload(&mut w).unwrap();
        let bytes = w.into_bytes();
        let mut r = BinaryReader::new(&bytes);
        assert_eq!(MoveEvent::read_payload(&mut r).unwrap(), command);
        assert_eq!(r.remaining(), 0);
    }
}
