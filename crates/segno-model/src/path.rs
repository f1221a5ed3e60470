//! Symbolic object addresses.
//!
//! A [`Path`] is an ordered sequence of `(kind, identifier)` steps from the
//! document root down to one object. Commands store paths instead of
//! references because the object a command targets may be destroyed and
//! recreated by undo/redo; a path is re-resolved against the live graph
//! right before each use and simply fails if the target is gone.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::{Cable, Event, Interval, Port, Process, TimeNode};
use crate::identifier::{Id, IdValue};

/// The closed set of addressable object kinds.
///
/// Dispatch on object types goes through this enum, never through runtime
/// comparison of type-name strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Document,
    Interval,
    Event,
    TimeNode,
    Process,
    Port,
    Cable,
}

impl ObjectKind {
    /// Stable wire tag for the binary form.
    pub fn tag(self) -> u8 {
        match self {
            ObjectKind::Document => 0,
            ObjectKind::Interval => 1,
            ObjectKind::Event => 2,
            ObjectKind::TimeNode => 3,
            ObjectKind::Process => 4,
            ObjectKind::Port => 5,
            ObjectKind::Cable => 6,
        }
    }

    /// Inverse of [`ObjectKind::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => ObjectKind::Document,
            1 => ObjectKind::Interval,
            2 => ObjectKind::Event,
            3 => ObjectKind::TimeNode,
            4 => ObjectKind::Process,
            5 => ObjectKind::Port,
            6 => ObjectKind::Cable,
            _ => return None,
        })
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Document => "document",
            ObjectKind::Interval => "interval",
            ObjectKind::Event => "event",
            ObjectKind::TimeNode => "timenode",
            ObjectKind::Process => "process",
            ObjectKind::Port => "port",
            ObjectKind::Cable => "cable",
        };
        f.write_str(name)
    }
}

/// One step of a path: which kind of child, and which sibling.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub kind: ObjectKind,
    pub id: IdValue,
}

impl PathStep {
    pub fn new(kind: ObjectKind, id: impl Into<IdValue>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Symbolic address of an object within one document.
///
/// An empty path addresses the document root itself. Paths are pure values;
/// they own nothing and are only meaningful relative to the document they
/// were built from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Append one step.
    pub fn pushed(mut self, kind: ObjectKind, id: impl Into<IdValue>) -> Self {
        self.steps.push(PathStep::new(kind, id));
        self
    }

    /// Path to a top-level interval.
    pub fn interval(id: &Id<Interval>) -> Self {
        Self::root().pushed(ObjectKind::Interval, id.value().clone())
    }

    /// Path to a top-level event.
    pub fn event(id: &Id<Event>) -> Self {
        Self::root().pushed(ObjectKind::Event, id.value().clone())
    }

    /// Path to a time-node.
    pub fn timenode(id: &Id<TimeNode>) -> Self {
        Self::root().pushed(ObjectKind::TimeNode, id.value().clone())
    }

    /// Path to a cable.
    pub fn cable(id: &Id<Cable>) -> Self {
        Self::root().pushed(ObjectKind::Cable, id.value().clone())
    }

    /// Descend into a process of the interval this path addresses.
    pub fn process(self, id: &Id<Process>) -> Self {
        self.pushed(ObjectKind::Process, id.value().clone())
    }

    /// Descend into a port of the process this path addresses.
    pub fn port(self, id: &Id<Port>) -> Self {
        self.pushed(ObjectKind::Port, id.value().clone())
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Kind of the object this path addresses.
    pub fn target_kind(&self) -> ObjectKind {
        self.steps
            .last()
            .map_or(ObjectKind::Document, |step| step.kind)
    }

    /// Identifier of the final step, if any.
    pub fn target_id(&self) -> Option<&IdValue> {
        self.steps.last().map(|step| &step.id)
    }

    /// Path to the parent object (root's parent is root).
    pub fn parent(&self) -> Path {
        let mut steps = self.steps.clone();
        steps.pop();
        Path { steps }
    }

    /// Whether `prefix` addresses this object or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.steps.len() >= prefix.steps.len()
            && self.steps[..prefix.steps.len()] == prefix.steps[..]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("/");
        }
        for step in &self.steps {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_round_trip() {
        for tag in 0..7u8 {
            let kind = ObjectKind::from_tag(tag).unwrap();
            assert_eq!(kind.tag(), tag);
        }
        assert!(ObjectKind::from_tag(7).is_none());
    }

    #[test]
    fn test_root_path() {
        let root = Path::root();
        assert!(root.is_root());
        assert_eq!(root.target_kind(), ObjectKind::Document);
        assert_eq!(root.to_string(), "/");
    }

    #[test]
    fn test_nested_path() {
        let path = Path::interval(&Id::num(1))
            .process(&Id::num(2))
            .port(&Id::num(3));
        assert_eq!(path.steps().len(), 3);
        assert_eq!(path.target_kind(), ObjectKind::Port);
        assert_eq!(path.to_string(), "/interval:1/process:2/port:3");
    }

    #[test]
    fn test_parent_and_prefix() {
        let port = Path::interval(&Id::num(1))
            .process(&Id::num(2))
            .port(&Id::num(3));
        let process = port.parent();
        assert_eq!(process.target_kind(), ObjectKind::Process);
        assert!(port.starts_with(&process));
        assert!(port.starts_with(&Path::root()));
        assert!(!process.starts_with(&port));

        let other = Path::interval(&Id::num(9));
        assert!(!port.starts_with(&other));
    }

    #[test]
    fn test_json_round_trip() {
        let path = Path::interval(&Id::num(1)).process(&Id::tag("legacy"));
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
