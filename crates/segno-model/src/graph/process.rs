//! Processes: editable behaviors hosted by an interval.

use serde::{Deserialize, Serialize};

use crate::graph::idmap::{GraphNode, IdMap};
use crate::graph::port::{Port, PortDirection};
use crate::identifier::Id;
use crate::path::ObjectKind;

/// The behavior a process carries. Only the editable structure lives
/// here; the execution engines around it are someone else's problem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProcessKind {
    /// A script, kept as source; hosts compile it on their side.
    Script { source: String },
    /// A media file reference.
    Media { path: String },
    /// A named effect.
    Effect { effect: String },
}

impl ProcessKind {
    pub fn tag(&self) -> u8 {
        match self {
            ProcessKind::Script { .. } => 0,
            ProcessKind::Media { .. } => 1,
            ProcessKind::Effect { .. } => 2,
        }
    }
}

/// An editable behavior attached to an interval, with typed ports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: Id<Process>,
    #[serde(default)]
    pub name: String,
    pub kind: ProcessKind,
    #[serde(default)]
    pub ports: IdMap<Port>,
}

impl Process {
    pub fn new(id: Id<Process>, name: impl Into<String>, kind: ProcessKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            ports: IdMap::new(),
        }
    }

    /// Input ports, in insertion order.
    pub fn inlets(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|port| port.direction == PortDirection::In)
    }

    /// Output ports, in insertion order.
    pub fn outlets(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|port| port.direction == PortDirection::Out)
    }

    /// The script source, for script processes.
    pub fn script_source(&self) -> Option<&str> {
        match &self.kind {
            ProcessKind::Script { source } => Some(source),
            _ => None,
        }
    }
}

impl GraphNode for Process {
    const KIND: ObjectKind = ObjectKind::Process;

    fn id(&self) -> &Id<Process> {
        &self.id
    }
}
