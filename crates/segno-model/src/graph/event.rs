//! Events: point triggers on the timeline.

use serde::{Deserialize, Serialize};

use crate::graph::idmap::GraphNode;
use crate::graph::timenode::TimeNode;
use crate::identifier::Id;
use crate::path::ObjectKind;

/// A point condition/trigger linking intervals. Belongs to exactly one
/// time-node (a weak back-reference; the time-node is the owner of the
/// grouping, the document owns both).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id<Event>,
    #[serde(default)]
    pub name: String,
    /// Position in ticks. Kept in sync with the owning time-node.
    #[serde(default)]
    pub date: i64,
    pub timenode: Id<TimeNode>,
    /// Optional trigger expression, evaluated by the playback engine.
    #[serde(default)]
    pub condition: Option<String>,
}

impl Event {
    pub fn new(id: Id<Event>, name: impl Into<String>, date: i64, timenode: Id<TimeNode>) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            timenode,
            condition: None,
        }
    }
}

impl GraphNode for Event {
    const KIND: ObjectKind = ObjectKind::Event;

    fn id(&self) -> &Id<Event> {
        &self.id
    }
}
