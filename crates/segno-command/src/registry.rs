//! Mapping serialized command tags back to concrete commands.

use std::collections::HashMap;

use segno_serial::{BinaryReader, BinaryWriter, SerializationFormatError};

use crate::command::{Command, CommandKind};
use crate::commands::{
    AddProcess, CreateCable, CreateIntervalAndEndEvent, CreateIntervalBetween, EditScript,
    MoveEvent, RemoveCable, RemoveInterval, RemoveProcess, Rename,
};
use crate::errors::{CommandError, Result};

type Factory = fn(&mut BinaryReader<'_>) -> Result<Box<dyn Command>>;

/// Explicit factory table from command kind to payload decoder.
///
/// The registry is passed to whatever loads serialized histories; there
/// is no global table. An empty registry is valid and decodes nothing.
pub struct CommandRegistry {
    table: HashMap<u8, Factory>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// A registry knowing every built-in command.
    pub fn with_builtin_commands() -> Self {
        let mut registry = Self::new();
        registry.register(CommandKind::Rename, |r| {
            Ok(Box::new(Rename::read_payload(r)?))
        });
        registry.register(CommandKind::MoveEvent, |r| {
            Ok(Box::new(MoveEvent::read_payload(r)?))
        });
        registry.register(CommandKind::CreateIntervalBetween, |r| {
            Ok(Box::new(CreateIntervalBetween::read_payload(r)?))
        });
        registry.register(CommandKind::CreateIntervalAndEndEvent, |r| {
            Ok(Box::new(CreateIntervalAndEndEvent::read_payload(r)?))
        });
        registry.register(CommandKind::RemoveInterval, |r| {
            Ok(Box::new(RemoveInterval::read_payload(r)?))
        });
        registry.register(CommandKind::AddProcess, |r| {
            Ok(Box::new(AddProcess::read_payload(r)?))
        });
        registry.register(CommandKind::RemoveProcess, |r| {
            Ok(Box::new(RemoveProcess::read_payload(r)?))
        });
        registry.register(CommandKind::EditScript, |r| {
            Ok(Box::new(EditScript::read_payload(r)?))
        });
        registry.register(CommandKind::CreateCable, |r| {
            Ok(Box::new(CreateCable::read_payload(r)?))
        });
        registry.register(CommandKind::RemoveCable, |r| {
            Ok(Box::new(RemoveCable::read_payload(r)?))
        });
        registry
    }

    /// Register (or replace) the factory for one command kind.
    pub fn register(&mut self, kind: CommandKind, factory: Factory) {
        self.table.insert(kind.tag(), factory);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Decode one framed command: a kind tag followed by a
    /// length-prefixed payload. The payload must be consumed exactly.
    pub fn read_command(&self, r: &mut BinaryReader<'_>) -> Result<Box<dyn Command>> {
        let tag = r.read_u8()?;
        let payload = r.read_bytes()?;
        let factory = self.table.get(&tag).ok_or(CommandError::UnknownCommand(tag))?;
        let mut payload_reader = BinaryReader::new(&payload);
        let command = factory(&mut payload_reader)?;
        if payload_reader.remaining() != 0 {
            return Err(SerializationFormatError::TrailingBytes(payload_reader.remaining()).into());
        }
        Ok(command)
    }

    /// Decode a whole history: a u32 count of framed commands.
    pub fn read_history(&self, data: &[u8]) -> Result<Vec<Box<dyn Command>>> {
        let mut r = BinaryReader::new(data);
        let count = r.read_u32()? as usize;
        let mut commands = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            commands.push(self.read_command(&mut r)?);
        }
        if r.remaining() != 0 {
            return Err(SerializationFormatError::TrailingBytes(r.remaining()).into());
        }
        Ok(commands)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame one command: kind tag, then the length-prefixed payload.
pub fn write_command(command: &dyn Command, w: &mut BinaryWriter) -> Result<()> {
    w.write_u8(command.kind().tag())?;
    let mut payload = BinaryWriter::new();
    command.write_payload(&mut payload)?;
    w.write_bytes(&payload.into_bytes())?;
    Ok(())
}

/// Serialize a whole history in submission order.
pub fn write_history(commands: &[Box<dyn Command>]) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    w.write_u32(commands.len() as u32)?;
    for command in commands {
        write_command(command.as_ref(), &mut w)?;
    }
    Ok(w.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use segno_model::{Document, Id, Path};

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
    fn test_round_trip_through_registry() {
        let doc = sample_document();
        let rename =
            crate::commands::Rename::new(&doc, Path::interval(&Id::num(1)), "verse").unwrap();

        let mut w = BinaryWriter::new();
        write_command(&rename, &mut w).unwrap();
        let bytes = w.into_bytes();

        let registry = CommandRegistry::with_builtin_commands();
        let mut r = BinaryReader::new(&bytes);
        let back = registry.read_command(&mut r).unwrap();
        assert_eq!(back.kind(), CommandKind::Rename);
        assert_eq!(back.label(), rename.label());
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let mut w = BinaryWriter::new();
        w.write_u8(200).unwrap();
        w.write_bytes(&[]).unwrap();
        let bytes = w.into_bytes();

        let registry = CommandRegistry::with_builtin_commands();
        let mut r = BinaryReader::new(&bytes);
        let err = registry.read_command(&mut r).map(|_| ()).unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand(200)));
    }

    #[test]
    fn test_empty_registry_decodes_nothing() {
        let doc = sample_document();
        let command = crate::commands::MoveEvent::new(&doc, Id::num(2), 500).unwrap();
        let mut w = BinaryWriter::new();
        write_command(&command, &mut w).unwrap();
        let bytes = w.into_bytes();

        let registry = CommandRegistry::new();
        let mut r = BinaryReader::new(&bytes);
        let err = registry.read_command(&mut r).map(|_| ()).unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand(1)));
    }

    #[test]
    fn test_history_replay_reproduces_document() {
        let mut doc = sample_document();
        let mut commands: Vec<Box<dyn Command>> = Vec::new();

        let create =
            crate::commands::CreateIntervalAndEndEvent::new(&doc, "verse", Id::num(2), 2000)
                .unwrap();
        create.redo(&mut doc).unwrap();
        commands.push(Box::new(create));

        let rename =
            crate::commands::Rename::new(&doc, Path::interval(&Id::num(2)), "chorus").unwrap();
        rename.redo(&mut doc).unwrap();
        commands.push(Box::new(rename));

        let bytes = write_history(&commands).unwrap();
        let registry = CommandRegistry::with_builtin_commands();
        let decoded = registry.read_history(&bytes).unwrap();

        let mut replayed = sample_document();
        for command in &decoded {
            command.redo(&mut replayed).unwrap();
        }
        assert_eq!(doc, replayed);
    }
}
