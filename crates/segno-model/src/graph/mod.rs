//! The live object graph: documents, intervals, events, time-nodes,
//! processes, ports and cables.

pub mod cable;
pub mod document;
pub mod event;
pub mod idmap;
pub mod interval;
pub mod port;
pub mod process;
pub mod timenode;

pub use cable::Cable;
pub use document::{Document, ObjectMut, ObjectRef};
pub use event::Event;
pub use idmap::{GraphNode, IdMap};
pub use interval::Interval;
pub use port::{Port, PortDirection, PortType};
pub use process::{Process, ProcessKind};
pub use timenode::TimeNode;
