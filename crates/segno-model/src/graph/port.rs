//! Typed dataflow ports.

use serde::{Deserialize, Serialize};

use crate::graph::idmap::GraphNode;
use crate::identifier::Id;
use crate::path::ObjectKind;
use crate::value::Value;

/// Whether a port consumes or produces data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    In,
    Out,
}

impl PortDirection {
    pub fn tag(self) -> u8 {
        match self {
            PortDirection::In => 0,
            PortDirection::Out => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PortDirection::In),
            1 => Some(PortDirection::Out),
            _ => None,
        }
    }
}

/// What flows through a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Value,
    Audio,
    Midi,
}

impl PortType {
    pub fn tag(self) -> u8 {
        match self {
            PortType::Value => 0,
            PortType::Audio => 1,
            PortType::Midi => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PortType::Value),
            1 => Some(PortType::Audio),
            2 => Some(PortType::Midi),
            _ => None,
        }
    }
}

/// A typed endpoint on a process. Cables reference ports by path; the
/// port itself owns nothing beyond its default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: Id<Port>,
    #[serde(default)]
    pub name: String,
    pub direction: PortDirection,
    pub port_type: PortType,
    /// Value presented when nothing is connected.
    #[serde(default)]
    pub default_value: Value,
}

impl Port {
    pub fn new(
        id: Id<Port>,
        name: impl Into<String>,
        direction: PortDirection,
        port_type: PortType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            direction,
            port_type,
            default_value: Value::None,
        }
    }
}

impl GraphNode for Port {
    const KIND: ObjectKind = ObjectKind::Port;

    fn id(&self) -> &Id<Port> {
        &self.id
    }
}
