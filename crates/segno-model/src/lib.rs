//! Segno Model - Object graph and addressing for Segno scores.
//!
//! This crate provides the structural core of a Segno document:
//!
//! - **Identifiers** - Typed, stable identifiers for sibling objects
//! - **Paths** - Symbolic addresses that survive undo/redo and reload
//! - **Graph** - The owned tree of intervals, events, time-nodes,
//!   processes, ports and cables
//! - **Values** - A closed tagged value type shared by both wire forms
//! - **Notifications** - Synchronous structural-change observers
//!
//! # Concurrency
//!
//! The graph has a single logical owner. Every mutation goes through
//! `&mut Document` on one designated thread; the crate contains no
//! internal locking, by contract rather than omission. Background work
//! hands its results to the owning thread before touching the graph.

pub mod errors;
pub mod graph;
pub mod identifier;
pub mod notify;
pub mod path;
pub mod value;

pub use errors::{GraphError, PathError};
pub use graph::{
    Cable, Document, Event, GraphNode, IdMap, Interval, ObjectMut, ObjectRef, Port,
    PortDirection, PortType, Process, ProcessKind, TimeNode,
};
pub use identifier::{Id, IdValue};
pub use notify::{ChangeKind, GraphChange, Notifier, SubscriberId};
pub use path::{ObjectKind, Path, PathStep};
pub use value::Value;
