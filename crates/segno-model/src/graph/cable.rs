//! Cables: dataflow connections between ports.

use serde::{Deserialize, Serialize};

use crate::graph::idmap::GraphNode;
use crate::identifier::Id;
use crate::path::{ObjectKind, Path};

/// A dataflow connection between two ports.
///
/// Endpoints are paths, not references: a cable never owns or pins the
/// ports it connects, and a stale endpoint fails resolution instead of
/// dangling. Owned by the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cable {
    pub id: Id<Cable>,
    /// Path to the source (output) port.
    pub source: Path,
    /// Path to the sink (input) port.
    pub sink: Path,
}

impl Cable {
    pub fn new(id: Id<Cable>, source: Path, sink: Path) -> Self {
        Self { id, source, sink }
    }

    /// Whether either endpoint lies at or below `prefix`.
    pub fn touches(&self, prefix: &Path) -> bool {
        self.source.starts_with(prefix) || self.sink.starts_with(prefix)
    }
}

impl GraphNode for Cable {
    const KIND: ObjectKind = ObjectKind::Cable;

    fn id(&self) -> &Id<Cable> {
        &self.id
    }
}
