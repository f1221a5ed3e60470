//! Time-nodes: synchronization points grouping simultaneous events.

use serde::{Deserialize, Serialize};

use crate::graph::event::Event;
use crate::graph::idmap::GraphNode;
use crate::identifier::Id;
use crate::path::ObjectKind;

/// A synchronization point. Events at the same date share one time-node;
/// the event list is a weak relation, ownership stays with the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeNode {
    pub id: Id<TimeNode>,
    #[serde(default)]
    pub name: String,
    /// Position in ticks; all grouped events share it.
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub events: Vec<Id<Event>>,
}

impl TimeNode {
    pub fn new(id: Id<TimeNode>, name: impl Into<String>, date: i64) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            events: Vec::new(),
        }
    }

    /// Detach an event; returns whether it was attached.
    pub fn detach_event(&mut self, event: &Id<Event>) -> bool {
        let before = self.events.len();
        self.events.retain(|id| id != event);
        self.events.len() != before
    }
}

impl GraphNode for TimeNode {
    const KIND: ObjectKind = ObjectKind::TimeNode;

    fn id(&self) -> &Id<TimeNode> {
        &self.id
    }
}
