//! Binary stream form of every model type.
//!
//! The layouts here are the wire contract: field order is fixed, all
//! multi-byte integers are big-endian, and every discriminated type
//! starts with its tag byte. Changing any of this is a format version
//! bump.

use segno_model::{
    Cable, Document, Event, GraphNode, Id, IdMap, IdValue, Interval, ObjectKind, Path, Port,
    PortDirection, PortType, Process, ProcessKind, TimeNode, Value,
};

use crate::binary::{BinRead, BinWrite, BinaryReader, BinaryWriter};
use crate::errors::{Result, SerializationFormatError};

impl BinWrite for IdValue {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        match self {
            IdValue::Num(n) => {
                w.write_u8(0)?;
                w.write_i64(*n)
            }
            IdValue::Tag(s) => {
                w.write_u8(1)?;
                w.write_str(s)
            }
        }
    }
}

impl BinRead for IdValue {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        match r.read_u8()? {
            0 => Ok(IdValue::Num(r.read_i64()?)),
            1 => Ok(IdValue::Tag(r.read_str()?)),
            tag => Err(SerializationFormatError::InvalidTag {
                what: "identifier",
                tag,
            }),
        }
    }
}

impl<T> BinWrite for Id<T> {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        self.value().write(w)
    }
}

impl<T> BinRead for Id<T> {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        IdValue::read(r).map(Id::from_value)
    }
}

impl BinWrite for ObjectKind {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u8(self.tag())
    }
}

impl BinRead for ObjectKind {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        let tag = r.read_u8()?;
        ObjectKind::from_tag(tag).ok_or(SerializationFormatError::InvalidTag {
            what: "object kind",
            tag,
        })
    }
}

impl BinWrite for Path {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u32(self.steps().len() as u32)?;
        for step in self.steps() {
            step.kind.write(w)?;
            step.id.write(w)?;
        }
        Ok(())
    }
}

impl BinRead for Path {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        let len = r.read_u32()? as usize;
        let mut path = Path::root();
        for _ in 0..len {
            let kind = ObjectKind::read(r)?;
            let id = IdValue::read(r)?;
            path = path.pushed(kind, id);
        }
        Ok(path)
    }
}

impl BinWrite for Value {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u8(self.tag())?;
        match self {
            Value::None => Ok(()),
            Value::Bool(b) => w.write_bool(*b),
            Value::Int(n) => w.write_i64(*n),
            Value::Float(x) => w.write_f64(*x),
            Value::Str(s) => w.write_str(s),
            Value::List(items) => items.write(w),
        }
    }
}

impl BinRead for Value {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(match r.read_u8()? {
            0 => Value::None,
            1 => Value::Bool(r.read_bool()?),
            2 => Value::Int(r.read_i64()?),
            3 => Value::Float(r.read_f64()?),
            4 => Value::Str(r.read_str()?),
            5 => Value::List(Vec::read(r)?),
            tag => {
                return Err(SerializationFormatError::InvalidTag { what: "value", tag })
            }
        })
    }
}

impl<T: GraphNode + BinWrite> BinWrite for IdMap<T> {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u32(self.len() as u32)?;
        for entry in self.iter() {
            entry.write(w)?;
        }
        Ok(())
    }
}

impl<T: GraphNode + BinRead> BinRead for IdMap<T> {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        let entries = Vec::<T>::read(r)?;
        Ok(IdMap::from_vec(entries)?)
    }
}

impl BinWrite for PortDirection {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u8(self.tag())
    }
}

impl BinRead for PortDirection {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        let tag = r.read_u8()?;
        PortDirection::from_tag(tag).ok_or(SerializationFormatError::InvalidTag {
            what: "port direction",
            tag,
        })
    }
}

impl BinWrite for PortType {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u8(self.tag())
    }
}

impl BinRead for PortType {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        let tag = r.read_u8()?;
        PortType::from_tag(tag).ok_or(SerializationFormatError::InvalidTag {
            what: "port type",
            tag,
        })
    }
}

impl BinWrite for Port {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        w.write_str(&self.name)?;
        self.direction.write(w)?;
        self.port_type.write(w)?;
        self.default_value.write(w)
    }
}

impl BinRead for Port {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Port {
            id: Id::read(r)?,
            name: r.read_str()?,
            direction: PortDirection::read(r)?,
            port_type: PortType::read(r)?,
            default_value: Value::read(r)?,
        })
    }
}

impl BinWrite for ProcessKind {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u8(self.tag())?;
        match self {
            ProcessKind::Script { source } => w.write_str(source),
            ProcessKind::Media { path } => w.write_str(path),
            ProcessKind::Effect { effect } => w.write_str(effect),
        }
    }
}

impl BinRead for ProcessKind {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(match r.read_u8()? {
            0 => ProcessKind::Script {
                source: r.read_str()?,
            },
            1 => ProcessKind::Media {
                path: r.read_str()?,
            },
            2 => ProcessKind::Effect {
                effect: r.read_str()?,
            },
            tag => {
                return Err(SerializationFormatError::InvalidTag {
                    what: "process kind",
                    tag,
                })
            }
        })
    }
}

impl BinWrite for Process {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        w.write_str(&self.name)?;
        self.kind.write(w)?;
        self.ports.write(w)
    }
}

impl BinRead for Process {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Process {
            id: Id::read(r)?,
            name: r.read_str()?,
            kind: ProcessKind::read(r)?,
            ports: IdMap::read(r)?,
        })
    }
}

impl BinWrite for Event {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        w.write_str(&self.name)?;
        w.write_i64(self.date)?;
        self.timenode.write(w)?;
        self.condition.write(w)
    }
}

impl BinRead for Event {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Event {
            id: Id::read(r)?,
            name: r.read_str()?,
            date: r.read_i64()?,
            timenode: Id::read(r)?,
            condition: Option::read(r)?,
        })
    }
}

impl BinWrite for TimeNode {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        w.write_str(&self.name)?;
        w.write_i64(self.date)?;
        self.events.write(w)
    }
}

impl BinRead for TimeNode {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(TimeNode {
            id: Id::read(r)?,
            name: r.read_str()?,
            date: r.read_i64()?,
            events: Vec::read(r)?,
        })
    }
}

impl BinWrite for Interval {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        w.write_str(&self.name)?;
        w.write_str(&self.comment)?;
        self.start_event.write(w)?;
        self.end_event.write(w)?;
        w.write_i64(self.duration)?;
        w.write_f64(self.height)?;
        self.processes.write(w)
    }
}

impl BinRead for Interval {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Interval {
            id: Id::read(r)?,
            name: r.read_str()?,
            comment: r.read_str()?,
            start_event: Id::read(r)?,
            end_event: Id::read(r)?,
            duration: r.read_i64()?,
            height: r.read_f64()?,
            processes: IdMap::read(r)?,
        })
    }
}

impl BinWrite for Cable {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        self.id.write(w)?;
        self.source.write(w)?;
        self.sink.write(w)
    }
}

impl BinRead for Cable {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Cable {
            id: Id::read(r)?,
            source: Path::read(r)?,
            sink: Path::read(r)?,
        })
    }
}

impl BinWrite for Document {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_str(&self.name)?;
        self.intervals.write(w)?;
        self.events.write(w)?;
        self.timenodes.write(w)?;
        self.cables.write(w)
    }
}

impl BinRead for Document {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        let mut doc = Document::new(r.read_str()?);
        doc.intervals = IdMap::read(r)?;
        doc.events = IdMap::read(r)?;
        doc.timenodes = IdMap::read(r)?;
        doc.cables = IdMap::read(r)?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: BinWrite + BinRead + PartialEq + std::fmt::Debug>(value: &T) {
        let bytes = value.to_bytes().unwrap();
        let back = T::from_bytes(&bytes).unwrap();
        assert_eq!(*value, back);
    }

    #[test]
    fn test_id_value_round_trip() {
        round_trip(&IdValue::Num(-7));
        round_trip(&IdValue::Tag("legacy".to_string()));
    }

    #[test]
    fn test_path_round_trip() {
        round_trip(&Path::root());
        round_trip(
            &Path::interval(&Id::num(1))
                .process(&Id::tag("alt"))
                .port(&Id::num(3)),
        );
    }

    #[test]
    fn test_value_round_trip() {
        round_trip(&Value::List(vec![
            Value::None,
            Value::Bool(false),
            Value::Int(12),
            Value::Float(-0.5),
            Value::Str("s".to_string()),
            Value::List(vec![Value::Int(1)]),
        ]));
    }

    #[test]
    fn test_port_round_trip() {
        let mut port = Port::new(Id::num(3), "gain", PortDirection::In, PortType::Value);
        port.default_value = Value::Float(1.0);
        round_trip(&port);
    }

    #[test]
    fn test_process_round_trip() {
        let mut process = Process::new(
            Id::num(2),
            "fx",
            ProcessKind::Effect {
                effect: "reverb".to_string(),
            },
        );
        process
            .ports
            .add(Port::new(Id::num(1), "in", PortDirection::In, PortType::Audio))
            .unwrap();
        round_trip(&process);
    }

    #[test]
    fn test_bad_kind_tag_fails() {
        let mut w = BinaryWriter::new();
        w.write_u8(99).unwrap();
        let err = ObjectKind::from_bytes(&w.into_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SerializationFormatError::InvalidTag { what: "object kind", tag: 99 }
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected_on_read() {
        let port = Port::new(Id::num(1), "p", PortDirection::In, PortType::Value);
        let mut w = BinaryWriter::new();
        w.write_u32(2).unwrap();
        port.write(&mut w).unwrap();
        port.write(&mut w).unwrap();
        let err = IdMap::<Port>::from_bytes(&w.into_bytes()).unwrap_err();
        assert!(matches!(err, SerializationFormatError::Graph(_)));
    }
}
