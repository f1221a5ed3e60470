//! Intervals: timed spans hosting processes.

use serde::{Deserialize, Serialize};

use crate::graph::event::Event;
use crate::graph::idmap::{GraphNode, IdMap};
use crate::graph::process::Process;
use crate::identifier::Id;
use crate::path::ObjectKind;

/// A timed span between two events. Owns its processes; the endpoint
/// events are weak references into the document's event container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub id: Id<Interval>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub start_event: Id<Event>,
    pub end_event: Id<Event>,
    /// Nominal duration in ticks.
    #[serde(default)]
    pub duration: i64,
    /// Relative vertical position of the span in the score view.
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub processes: IdMap<Process>,
}

impl Interval {
    pub fn new(
        id: Id<Interval>,
        name: impl Into<String>,
        start_event: Id<Event>,
        end_event: Id<Event>,
        duration: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            comment: String::new(),
            start_event,
            end_event,
            duration,
            height: 0.5,
            processes: IdMap::new(),
        }
    }

    /// Whether `event` is one of this interval's endpoints.
    pub fn touches_event(&self, event: &Id<Event>) -> bool {
        self.start_event == *event || self.end_event == *event
    }
}

impl GraphNode for Interval {
    const KIND: ObjectKind = ObjectKind::Interval;

    fn id(&self) -> &Id<Interval> {
        &self.id
    }
}
