//! The document root: owner of the whole object graph.

use serde::{Deserialize, Serialize};

use crate::errors::{GraphError, PathError};
use crate::graph::cable::Cable;
use crate::graph::event::Event;
use crate::graph::idmap::IdMap;
use crate::graph::interval::Interval;
use crate::graph::port::{Port, PortDirection};
use crate::graph::process::Process;
use crate::graph::timenode::TimeNode;
use crate::identifier::Id;
use crate::notify::{ChangeKind, GraphChange, Notifier, SubscriberId};
use crate::path::{ObjectKind, Path, PathStep};

/// Shared reference to any addressable object.
#[derive(Debug)]
pub enum ObjectRef<'a> {
    Document(&'a Document),
    Interval(&'a Interval),
    Event(&'a Event),
    TimeNode(&'a TimeNode),
    Process(&'a Process),
    Port(&'a Port),
    Cable(&'a Cable),
}

impl ObjectRef<'_> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectRef::Document(_) => ObjectKind::Document,
            ObjectRef::Interval(_) => ObjectKind::Interval,
            ObjectRef::Event(_) => ObjectKind::Event,
            ObjectRef::TimeNode(_) => ObjectKind::TimeNode,
            ObjectRef::Process(_) => ObjectKind::Process,
            ObjectRef::Port(_) => ObjectKind::Port,
            ObjectRef::Cable(_) => ObjectKind::Cable,
        }
    }

    /// The object's display name; cables are unnamed.
    pub fn name(&self) -> Option<&str> {
        match self {
            ObjectRef::Document(doc) => Some(&doc.name),
            ObjectRef::Interval(interval) => Some(&interval.name),
            ObjectRef::Event(event) => Some(&event.name),
            ObjectRef::TimeNode(node) => Some(&node.name),
            ObjectRef::Process(process) => Some(&process.name),
            ObjectRef::Port(port) => Some(&port.name),
            ObjectRef::Cable(_) => None,
        }
    }
}

/// Exclusive reference to any addressable object.
#[derive(Debug)]
pub enum ObjectMut<'a> {
    Document(&'a mut Document),
    Interval(&'a mut Interval),
    Event(&'a mut Event),
    TimeNode(&'a mut TimeNode),
    Process(&'a mut Process),
    Port(&'a mut Port),
    Cable(&'a mut Cable),
}

impl ObjectMut<'_> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectMut::Document(_) => ObjectKind::Document,
            ObjectMut::Interval(_) => ObjectKind::Interval,
            ObjectMut::Event(_) => ObjectKind::Event,
            ObjectMut::TimeNode(_) => ObjectKind::TimeNode,
            ObjectMut::Process(_) => ObjectKind::Process,
            ObjectMut::Port(_) => ObjectKind::Port,
            ObjectMut::Cable(_) => ObjectKind::Cable,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ObjectMut::Document(doc) => Some(&doc.name),
            ObjectMut::Interval(interval) => Some(&interval.name),
            ObjectMut::Event(event) => Some(&event.name),
            ObjectMut::TimeNode(node) => Some(&node.name),
            ObjectMut::Process(process) => Some(&process.name),
            ObjectMut::Port(port) => Some(&port.name),
            ObjectMut::Cable(_) => None,
        }
    }

    /// Set the object's name; returns false for unnamed kinds.
    pub fn set_name(&mut self, name: &str) -> bool {
        match self {
            ObjectMut::Document(doc) => doc.name = name.to_string(),
            ObjectMut::Interval(interval) => interval.name = name.to_string(),
            ObjectMut::Event(event) => event.name = name.to_string(),
            ObjectMut::TimeNode(node) => node.name = name.to_string(),
            ObjectMut::Process(process) => process.name = name.to_string(),
            ObjectMut::Port(port) => port.name = name.to_string(),
            ObjectMut::Cable(_) => return false,
        }
        true
    }
}

/// The root of the object graph.
///
/// Ownership is strictly tree-shaped: the document owns intervals, events,
/// time-nodes and cables; intervals own processes; processes own ports.
/// Everything across that tree (interval endpoints, time-node groupings,
/// cable endpoints) is an identifier or path, never a reference.
///
/// All mutation happens through `&mut self` on one designated thread; the
/// document provides no internal locking.
#[derive(Debug, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub intervals: IdMap<Interval>,
    #[serde(default)]
    pub events: IdMap<Event>,
    #[serde(default)]
    pub timenodes: IdMap<TimeNode>,
    #[serde(default)]
    pub cables: IdMap<Cable>,
    #[serde(skip)]
    notifier: Notifier,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intervals: IdMap::new(),
            events: IdMap::new(),
            timenodes: IdMap::new(),
            cables: IdMap::new(),
            notifier: Notifier::new(),
        }
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Register a structural-change listener.
    pub fn subscribe(&mut self, listener: Box<dyn FnMut(&GraphChange)>) -> SubscriberId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.notifier.unsubscribe(id);
    }

    /// Announce an in-place modification of the object at `path`.
    pub fn touch(&mut self, path: Path) {
        self.emit(path, ChangeKind::Modified);
    }

    fn emit(&mut self, path: Path, kind: ChangeKind) {
        self.notifier.emit(&GraphChange::new(path, kind));
    }

    // ------------------------------------------------------------------
    // Path resolution
    // ------------------------------------------------------------------

    /// Walk a path through the live graph.
    ///
    /// Fails with [`PathError::StepNotFound`] when a container lacks the
    /// identifier, and [`PathError::KindMismatch`] when the declared kind
    /// cannot be reached from the current node. Stale paths from undo
    /// history land here; resolution never dangles.
    pub fn resolve(&self, path: &Path) -> Result<ObjectRef<'_>, PathError> {
        let mut current = ObjectRef::Document(self);
        for (index, step) in path.steps().iter().enumerate() {
            let found = current.kind();
            current = match (current, step.kind) {
                (ObjectRef::Document(doc), ObjectKind::Interval) => doc
                    .intervals
                    .get(&Id::from_value(step.id.clone()))
                    .map(ObjectRef::Interval)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectRef::Document(doc), ObjectKind::Event) => doc
                    .events
                    .get(&Id::from_value(step.id.clone()))
                    .map(ObjectRef::Event)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectRef::Document(doc), ObjectKind::TimeNode) => doc
                    .timenodes
                    .get(&Id::from_value(step.id.clone()))
                    .map(ObjectRef::TimeNode)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectRef::Document(doc), ObjectKind::Cable) => doc
                    .cables
                    .get(&Id::from_value(step.id.clone()))
                    .map(ObjectRef::Cable)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectRef::Interval(interval), ObjectKind::Process) => interval
                    .processes
                    .get(&Id::from_value(step.id.clone()))
                    .map(ObjectRef::Process)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectRef::Process(process), ObjectKind::Port) => process
                    .ports
                    .get(&Id::from_value(step.id.clone()))
                    .map(ObjectRef::Port)
                    .ok_or_else(|| step_not_found(index, step))?,
                (_, requested) => {
                    return Err(PathError::KindMismatch {
                        step: index,
                        requested,
                        found,
                    })
                }
            };
        }
        Ok(current)
    }

    /// Mutable counterpart of [`Document::resolve`].
    pub fn resolve_mut(&mut self, path: &Path) -> Result<ObjectMut<'_>, PathError> {
        let mut current = ObjectMut::Document(self);
        for (index, step) in path.steps().iter().enumerate() {
            let found = current.kind();
            current = match (current, step.kind) {
                (ObjectMut::Document(doc), ObjectKind::Interval) => doc
                    .intervals
                    .get_mut(&Id::from_value(step.id.clone()))
                    .map(ObjectMut::Interval)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectMut::Document(doc), ObjectKind::Event) => doc
                    .events
                    .get_mut(&Id::from_value(step.id.clone()))
                    .map(ObjectMut::Event)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectMut::Document(doc), ObjectKind::TimeNode) => doc
                    .timenodes
                    .get_mut(&Id::from_value(step.id.clone()))
                    .map(ObjectMut::TimeNode)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectMut::Document(doc), ObjectKind::Cable) => doc
                    .cables
                    .get_mut(&Id::from_value(step.id.clone()))
                    .map(ObjectMut::Cable)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectMut::Interval(interval), ObjectKind::Process) => interval
                    .processes
                    .get_mut(&Id::from_value(step.id.clone()))
                    .map(ObjectMut::Process)
                    .ok_or_else(|| step_not_found(index, step))?,
                (ObjectMut::Process(process), ObjectKind::Port) => process
                    .ports
                    .get_mut(&Id::from_value(step.id.clone()))
                    .map(ObjectMut::Port)
                    .ok_or_else(|| step_not_found(index, step))?,
                (_, requested) => {
                    return Err(PathError::KindMismatch {
                        step: index,
                        requested,
                        found,
                    })
                }
            };
        }
        Ok(current)
    }

    pub fn resolve_interval(&self, path: &Path) -> Result<&Interval, PathError> {
        match self.resolve(path)? {
            ObjectRef::Interval(interval) => Ok(interval),
            other => Err(wrong_target(ObjectKind::Interval, other.kind())),
        }
    }

    pub fn resolve_event(&self, path: &Path) -> Result<&Event, PathError> {
        match self.resolve(path)? {
            ObjectRef::Event(event) => Ok(event),
            other => Err(wrong_target(ObjectKind::Event, other.kind())),
        }
    }

    pub fn resolve_process(&self, path: &Path) -> Result<&Process, PathError> {
        match self.resolve(path)? {
            ObjectRef::Process(process) => Ok(process),
            other => Err(wrong_target(ObjectKind::Process, other.kind())),
        }
    }

    pub fn resolve_process_mut(&mut self, path: &Path) -> Result<&mut Process, PathError> {
        match self.resolve_mut(path)? {
            ObjectMut::Process(process) => Ok(process),
            other => Err(wrong_target(ObjectKind::Process, other.kind())),
        }
    }

    pub fn resolve_port(&self, path: &Path) -> Result<&Port, PathError> {
        match self.resolve(path)? {
            ObjectRef::Port(port) => Ok(port),
            other => Err(wrong_target(ObjectKind::Port, other.kind())),
        }
    }

    // ------------------------------------------------------------------
    // Scenario structure
    // ------------------------------------------------------------------

    /// Create a time-node and a first event attached to it, both at `date`.
    pub fn create_event_with_timenode(
        &mut self,
        event_id: Id<Event>,
        node_id: Id<TimeNode>,
        name: impl Into<String>,
        date: i64,
    ) -> Result<(), GraphError> {
        let name = name.into();
        let mut node = TimeNode::new(node_id.clone(), name.clone(), date);
        node.events.push(event_id.clone());
        self.timenodes.add(node)?;
        if let Err(err) = self
            .events
            .add(Event::new(event_id.clone(), name, date, node_id.clone()))
        {
            // Roll back the half-created pair.
            let _ = self.timenodes.remove(&node_id);
            return Err(err);
        }
        self.emit(Path::timenode(&node_id), ChangeKind::Added);
        self.emit(Path::event(&event_id), ChangeKind::Added);
        Ok(())
    }

    /// Create an interval between two existing events.
    pub fn create_interval_between(
        &mut self,
        id: Id<Interval>,
        name: impl Into<String>,
        start: Id<Event>,
        end: Id<Event>,
    ) -> Result<(), GraphError> {
        let start_date = self.events.find(&start)?.date;
        let end_date = self.events.find(&end)?.date;
        self.intervals.add(Interval::new(
            id.clone(),
            name,
            start,
            end,
            end_date - start_date,
        ))?;
        self.emit(Path::interval(&id), ChangeKind::Added);
        Ok(())
    }

    /// Base building block of a scenario: from an existing event, create
    /// an end event (with its own time-node) `duration` ticks later and
    /// an interval spanning the two.
    #[allow(clippy::too_many_arguments)]
    pub fn create_interval_and_end_event(
        &mut self,
        name: impl Into<String>,
        start: Id<Event>,
        duration: i64,
        new_interval: Id<Interval>,
        new_event: Id<Event>,
        new_node: Id<TimeNode>,
    ) -> Result<(), GraphError> {
        let name = name.into();
        let start_date = self.events.find(&start)?.date;
        self.create_event_with_timenode(
            new_event.clone(),
            new_node,
            format!("{}.end", name),
            start_date + duration,
        )?;
        self.create_interval_between(new_interval, name, start, new_event)
    }

    /// Remove an interval and return it (processes included).
    ///
    /// Cables into the interval's processes are the caller's concern;
    /// commands capture and remove them first.
    pub fn remove_interval(&mut self, id: &Id<Interval>) -> Result<Interval, GraphError> {
        let interval = self.intervals.remove(id)?;
        self.emit(Path::interval(id), ChangeKind::Removed);
        Ok(interval)
    }

    /// Re-insert a previously removed interval.
    pub fn add_interval(&mut self, interval: Interval) -> Result<(), GraphError> {
        let id = interval.id.clone();
        self.intervals.add(interval)?;
        self.emit(Path::interval(&id), ChangeKind::Added);
        Ok(())
    }

    /// Remove an event, detaching it from its time-node; the time-node is
    /// dropped once its last event goes. Fails while any interval still
    /// uses the event as an endpoint.
    pub fn remove_event(&mut self, id: &Id<Event>) -> Result<Event, GraphError> {
        if let Some(interval) = self.intervals.iter().find(|iv| iv.touches_event(id)) {
            return Err(GraphError::EventInUse {
                id: id.value().clone(),
                interval: interval.id.value().clone(),
            });
        }
        let event = self.events.remove(id)?;
        let node_id = event.timenode.clone();
        let mut drop_node = false;
        if let Some(node) = self.timenodes.get_mut(&node_id) {
            node.detach_event(id);
            drop_node = node.events.is_empty();
        }
        self.emit(Path::event(id), ChangeKind::Removed);
        if drop_node {
            let _ = self.timenodes.remove(&node_id);
            self.emit(Path::timenode(&node_id), ChangeKind::Removed);
        }
        Ok(event)
    }

    /// Move an event in time. The whole time-node moves with it, so every
    /// grouped sibling keeps the shared date. Returns the previous date.
    pub fn set_event_date(&mut self, id: &Id<Event>, date: i64) -> Result<i64, GraphError> {
        let node_id = self.events.find(id)?.timenode.clone();
        let node = self.timenodes.find_mut(&node_id)?;
        let old_date = node.date;
        node.date = date;
        let grouped: Vec<Id<Event>> = node.events.clone();
        for event_id in &grouped {
            if let Some(event) = self.events.get_mut(event_id) {
                event.date = date;
            }
        }
        self.emit(Path::timenode(&node_id), ChangeKind::Modified);
        Ok(old_date)
    }

    // ------------------------------------------------------------------
    // Processes
    // ------------------------------------------------------------------

    /// Attach a process to an interval.
    pub fn add_process(
        &mut self,
        interval: &Id<Interval>,
        process: Process,
    ) -> Result<(), GraphError> {
        let process_id = process.id.clone();
        self.intervals.find_mut(interval)?.processes.add(process)?;
        self.emit(
            Path::interval(interval).process(&process_id),
            ChangeKind::Added,
        );
        Ok(())
    }

    /// Detach and return a process. Cables into its ports are the
    /// caller's concern, as with [`Document::remove_interval`].
    pub fn remove_process(
        &mut self,
        interval: &Id<Interval>,
        process: &Id<Process>,
    ) -> Result<Process, GraphError> {
        let removed = self.intervals.find_mut(interval)?.processes.remove(process)?;
        self.emit(
            Path::interval(interval).process(process),
            ChangeKind::Removed,
        );
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Cables
    // ------------------------------------------------------------------

    /// Connect two ports. Both endpoints must resolve to live ports with
    /// the right directions (source out, sink in).
    pub fn add_cable(&mut self, cable: Cable) -> Result<(), GraphError> {
        self.check_endpoint(&cable, &cable.source, PortDirection::Out, "source")?;
        self.check_endpoint(&cable, &cable.sink, PortDirection::In, "sink")?;
        let id = cable.id.clone();
        self.cables.add(cable)?;
        self.emit(Path::cable(&id), ChangeKind::Added);
        Ok(())
    }

    pub fn remove_cable(&mut self, id: &Id<Cable>) -> Result<Cable, GraphError> {
        let cable = self.cables.remove(id)?;
        self.emit(Path::cable(id), ChangeKind::Removed);
        Ok(cable)
    }

    /// Cables with an endpoint at or below `prefix`, cloned for capture
    /// into a command payload.
    pub fn cables_touching(&self, prefix: &Path) -> Vec<Cable> {
        self.cables
            .iter()
            .filter(|cable| cable.touches(prefix))
            .cloned()
            .collect()
    }

    fn check_endpoint(
        &self,
        cable: &Cable,
        endpoint: &Path,
        expected: PortDirection,
        role: &'static str,
    ) -> Result<(), GraphError> {
        let port = self
            .resolve_port(endpoint)
            .map_err(|_| GraphError::StaleEndpoint {
                cable: cable.id.value().clone(),
                role,
                endpoint: endpoint.to_string(),
            })?;
        if port.direction != expected {
            return Err(GraphError::EndpointDirection {
                cable: cable.id.value().clone(),
                role,
                endpoint: endpoint.to_string(),
                expected: match expected {
                    PortDirection::Out => "output",
                    PortDirection::In => "input",
                },
            });
        }
        Ok(())
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        // Listeners stay with the original; a clone is a bare snapshot.
        Self {
            name: self.name.clone(),
            intervals: self.intervals.clone(),
            events: self.events.clone(),
            timenodes: self.timenodes.clone(),
            cables: self.cables.clone(),
            notifier: Notifier::new(),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.intervals == other.intervals
            && self.events == other.events
            && self.timenodes == other.timenodes
            && self.cables == other.cables
    }
}

fn step_not_found(index: usize, step: &PathStep) -> PathError {
    PathError::StepNotFound {
        step: index,
        kind: step.kind,
        id: step.id.clone(),
    }
}

fn wrong_target(expected: ObjectKind, found: ObjectKind) -> PathError {
    PathError::WrongTarget { expected, found }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::port::PortType;
    use crate::graph::process::ProcessKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Document with one interval between two events, a script process
    /// with one inlet and one outlet.
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

    #[test]
    fn test_scenario_construction() {
        let doc = sample_document();
        assert_eq!(doc.intervals.len(), 1);
        assert_eq!(doc.events.len(), 2);
        assert_eq!(doc.timenodes.len(), 2);
        let interval = doc.intervals.get(&Id::num(1)).unwrap();
        assert_eq!(interval.duration, 1000);
        assert_eq!(doc.events.get(&Id::num(2)).unwrap().date, 1000);
    }

    #[test]
    fn test_resolve_path_of_live_object() {
        let doc = sample_document();
        let path = Path::interval(&Id::num(1)).process(&Id::num(1));
        let process = doc.resolve_process(&path).unwrap();
        assert_eq!(process.name, "script");

        let port_path = path.clone().port(&Id::num(2));
        assert_eq!(doc.resolve_port(&port_path).unwrap().name, "out");
    }

    #[test]
    fn test_resolve_fails_after_removal() {
        let mut doc = sample_document();
        let path = Path::interval(&Id::num(1));
        assert!(doc.resolve(&path).is_ok());
        doc.remove_interval(&Id::num(1)).unwrap();
        let err = doc.resolve(&path).unwrap_err();
        assert!(matches!(err, PathError::StepNotFound { step: 0, .. }));
    }

    #[test]
    fn test_resolve_kind_mismatch() {
        let doc = sample_document();
        // An event cannot contain a process.
        let path = Path::event(&Id::num(1)).process(&Id::num(1));
        let err = doc.resolve(&path).unwrap_err();
        assert!(matches!(
            err,
            PathError::KindMismatch {
                step: 1,
                requested: ObjectKind::Process,
                found: ObjectKind::Event,
            }
        ));
    }

    #[test]
    fn test_wrong_target() {
        let doc = sample_document();
        let err = doc.resolve_event(&Path::interval(&Id::num(1))).unwrap_err();
        assert!(matches!(err, PathError::WrongTarget { .. }));
    }

    #[test]
    fn test_remove_event_in_use_fails() {
        let mut doc = sample_document();
        let err = doc.remove_event(&Id::num(2)).unwrap_err();
        assert!(matches!(err, GraphError::EventInUse { .. }));
    }

    #[test]
    fn test_remove_event_drops_empty_timenode() {
        let mut doc = sample_document();
        doc.remove_interval(&Id::num(1)).unwrap();
        doc.remove_event(&Id::num(2)).unwrap();
        assert!(doc.timenodes.get(&Id::num(2)).is_none());
        assert!(doc.timenodes.get(&Id::num(1)).is_some());
    }

    #[test]
    fn test_set_event_date_moves_timenode() {
        let mut doc = sample_document();
        let old = doc.set_event_date(&Id::num(2), 2500).unwrap();
        assert_eq!(old, 1000);
        assert_eq!(doc.events.get(&Id::num(2)).unwrap().date, 2500);
        assert_eq!(doc.timenodes.get(&Id::num(2)).unwrap().date, 2500);
    }

    #[test]
    fn test_cable_validation() {
        let mut doc = sample_document();
        let process = Path::interval(&Id::num(1)).process(&Id::num(1));
        let source = process.clone().port(&Id::num(2));
        let sink = process.clone().port(&Id::num(1));

        // Source must be an output; the error names the bad endpoint.
        let backwards = Cable::new(Id::num(1), sink.clone(), source.clone());
        assert!(matches!(
            doc.add_cable(backwards).unwrap_err(),
            GraphError::EndpointDirection {
                role: "source",
                expected: "output",
                ..
            }
        ));

        doc.add_cable(Cable::new(Id::num(1), source.clone(), sink.clone()))
            .unwrap();
        assert_eq!(doc.cables.len(), 1);

        // A stale endpoint is rejected.
        let stale = process.clone().port(&Id::num(9));
        assert!(matches!(
            doc.add_cable(Cable::new(Id::num(2), source, stale)).unwrap_err(),
            GraphError::StaleEndpoint { role: "sink", .. }
        ));
    }

    #[test]
    fn test_cables_touching() {
        let mut doc = sample_document();
        let process = Path::interval(&Id::num(1)).process(&Id::num(1));
        doc.add_cable(Cable::new(
            Id::num(1),
            process.clone().port(&Id::num(2)),
            process.clone().port(&Id::num(1)),
        ))
        .unwrap();
        assert_eq!(doc.cables_touching(&Path::interval(&Id::num(1))).len(), 1);
        assert_eq!(doc.cables_touching(&Path::interval(&Id::num(9))).len(), 0);
    }

    #[test]
    fn test_change_notifications() {
        let mut doc = Document::new("score");
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            doc.subscribe(Box::new(move |change: &GraphChange| {
                seen.borrow_mut().push(change.clone());
            }));
        }
        doc.create_event_with_timenode(Id::num(1), Id::num(1), "start", 0)
            .unwrap();
        let changes = seen.borrow();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert_eq!(changes[0].path, Path::timenode(&Id::num(1)));
        assert_eq!(changes[1].path, Path::event(&Id::num(1)));
    }

    #[test]
    fn test_clone_is_equal_snapshot() {
        let doc = sample_document();
        let copy = doc.clone();
        assert_eq!(doc, copy);
    }
}
