//! Connecting and disconnecting ports.

use std::any::Any;

use segno_model::{Cable, Document, Id, Path};
use segno_serial::{BinRead, BinWrite, BinaryReader, BinaryWriter};

use crate::command::{Command, CommandKind};
use crate::errors::Result;

/// Connect an output port to an input port.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCable {
    cable: Cable,
}

impl CreateCable {
    pub fn new(doc: &Document, source: Path, sink: Path) -> Result<Self> {
        // Direction checks run in add_cable; here we only reject
        // endpoints that do not resolve at all.
        doc.resolve_port(&source)?;
        doc.resolve_port(&sink)?;
        Ok(Self {
            cable: Cable::new(doc.cables.mint(), source, sink),
        })
    }

    pub fn cable_id(&self) -> &Id<Cable> {
        &self.cable.id
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            cable: Cable::read(r)?,
        })
    }
}

impl Command for CreateCable {
    fn kind(&self) -> CommandKind {
        CommandKind::CreateCable
    }

    fn label(&self) -> String {
        format!("Connect {} to {}", self.cable.source, self.cable.sink)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        doc.add_cable(self.cable.clone())?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        doc.remove_cable(&self.cable.id)?;
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.cable.write(w)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Disconnect a cable, keeping a copy for undo.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveCable {
    cable: Cable,
}

impl RemoveCable {
    pub fn new(doc: &Document, id: &Id<Cable>) -> Result<Self> {
        Ok(Self {
            cable: doc.cables.find(id)?.clone(),
        })
    }

    pub fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            cable: Cable::read(r)?,
        })
    }
}

impl Command for RemoveCable {
    fn kind(&self) -> CommandKind {
        CommandKind::RemoveCable
    }

    fn label(&self) -> String {
        format!("Disconnect {} from {}", self.cable.source, self.cable.sink)
    }

    fn redo(&self, doc: &mut Document) -> Result<()> {
        doc.remove_cable(&self.cable.id)?;
        Ok(())
    }

    fn undo(&self, doc: &mut Document) -> Result<()> {
        doc.add_cable(self.cable.clone())?;
        Ok(())
    }

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        self.cable.write(w)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segno_model::{Port, PortDirection, PortType, Process, ProcessKind};

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
        let mut process = Process::new(
            Id::num(1),
            "script",
            ProcessKind::Script {
                source: "40 + 2".to_string(),
            },
        );
        process
            .ports
            .add(Port::new(Id::num(1), "in", PortDirection::In, PortType::Value))
            .unwrap();
        process
            .ports
            .add(Port::new(Id::num(2), "out", PortDirection::Out, PortType::Value))
            .unwrap();
        doc.add_process(&Id::num(1), process).unwrap();
        doc
    }

    /// (source, sink) port paths within the sample process.
    fn port_paths() -> (Path, Path) {
        let process = Path::interval(&Id::num(1)).process(&Id::num(1));
        (process.clone().port(&Id::num(2)), process.port(&Id::num(1)))
    }

    #[test]
    fn test_create_cable_redo_undo() {
        let mut doc = sample_document();
        let (source, sink) = port_paths();
        let command = CreateCable::new(&doc, source, sink).unwrap();

        command.redo(&mut doc).unwrap();
        assert!(doc.cables.contains(command.cable_id()));

        command.undo(&mut doc).unwrap();
        assert!(doc.cables.is_empty());

        command.redo(&mut doc).unwrap();
        assert!(doc.cables.contains(command.cable_id()));
    }

    #[test]
    fn test_create_cable_rejects_missing_endpoint() {
        let doc = sample_document();
        let (source, _) = port_paths();
        let stale = Path::interval(&Id::num(1))
            .process(&Id::num(1))
            .port(&Id::num(9));
        assert!(CreateCable::new(&doc, source, stale).is_err());
    }

    #[test]
    fn test_remove_cable_redo_undo() {
        let mut doc = sample_document();
        let (source, sink) = port_paths();
        doc.add_cable(Cable::new(Id::num(1), source, sink)).unwrap();
        let before = doc.clone();

        let command = RemoveCable::new(&doc, &Id::num(1)).unwrap();
        command.redo(&mut doc).unwrap();
        assert!(doc.cables.is_empty());

        command.undo(&mut doc).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_payload_round_trips() {
        let mut doc = sample_document();
        let (source, sink) = port_paths();
        let create = CreateCable::new(&doc, source.clone(), sink.clone()).unwrap();

        let bytes = {
            let mut w = BinaryWriter::new();
            create.write_payload(&mut w).unwrap();
            w.into_bytes()
        };
        let mut r = BinaryReader::new(&bytes);
        assert_eq!(CreateCable::read_payload(&mut r).unwrap(), create);
        assert_eq!(r.remaining(), 0);

        doc.add_cable(Cable::new(Id::num(1), source, sink)).unwrap();
        let remove = RemoveCable::new(&doc, &Id::num(1)).unwrap();
        let bytes = {
            let mut w = BinaryWriter::new();
            remove.write_payload(&mut w).unwrap();
            w.into_bytes()
        };
        let mut r = BinaryReader::new(&bytes);
        assert_eq!(RemoveCable::read_payload(&mut r).unwrap(), remove);
        assert_eq!(r.remaining(), 0);
    }
}
