//! Ordered, identifier-keyed child containers.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::GraphError;
use crate::identifier::{Id, IdValue};
use crate::path::ObjectKind;

/// A node type that can live in an [`IdMap`].
pub trait GraphNode: Sized {
    /// The addressable kind of this node type.
    const KIND: ObjectKind;

    /// This node's identifier among its siblings.
    fn id(&self) -> &Id<Self>;
}

/// Ordered container of sibling nodes, keyed by identifier.
///
/// Iteration order is insertion order. The mint counter only moves
/// forward within a session, so an identifier freed by a removal is not
/// handed out again while undo history may still refer to it; counters
/// are recycled across document reloads.
#[derive(Clone, Debug)]
pub struct IdMap<T: GraphNode> {
    entries: Vec<T>,
    next: i64,
}

// Equality is over the live children only. The mint counter is session
// state: it survives removals, so undoing an insertion restores an
// equal container even though the counter moved on.
impl<T: GraphNode + PartialEq> PartialEq for IdMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T: GraphNode + Eq> Eq for IdMap<T> {}

impl<T: GraphNode> Default for IdMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GraphNode> IdMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 1,
        }
    }

    /// Rebuild a container from an ordered list, failing on duplicate
    /// identifiers. Used by deserialization.
    pub fn from_vec(entries: Vec<T>) -> Result<Self, GraphError> {
        let mut map = Self::new();
        for entry in entries {
            map.add(entry)?;
        }
        Ok(map)
    }

    /// The identifier the next [`IdMap::add`] of a minted node should use.
    ///
    /// Minting does not reserve: two mints without an intervening add
    /// return the same identifier.
    pub fn mint(&self) -> Id<T> {
        Id::num(self.next)
    }

    /// Insert a node. Fails with [`GraphError::DuplicateId`] if its
    /// identifier is already live among the siblings.
    pub fn add(&mut self, node: T) -> Result<(), GraphError> {
        let id = node.id().clone();
        if self.contains(&id) {
            return Err(GraphError::DuplicateId {
                kind: T::KIND,
                id: id.into_value(),
            });
        }
        if let IdValue::Num(n) = id.value() {
            self.next = self.next.max(n + 1);
        }
        self.entries.push(node);
        Ok(())
    }

    /// Remove and return a node. Fails with [`GraphError::NotFound`] on an
    /// absent identifier.
    pub fn remove(&mut self, id: &Id<T>) -> Result<T, GraphError> {
        match self.entries.iter().position(|entry| entry.id() == id) {
            Some(index) => Ok(self.entries.remove(index)),
            None => Err(GraphError::NotFound {
                kind: T::KIND,
                id: id.value().clone(),
            }),
        }
    }

    pub fn contains(&self, id: &Id<T>) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    pub fn get(&self, id: &Id<T>) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn get_mut(&mut self, id: &Id<T>) -> Option<&mut T> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    /// Like [`IdMap::get`], but with the container's error on absence.
    pub fn find(&self, id: &Id<T>) -> Result<&T, GraphError> {
        self.get(id).ok_or_else(|| GraphError::NotFound {
            kind: T::KIND,
            id: id.value().clone(),
        })
    }

    /// Like [`IdMap::get_mut`], but with the container's error on absence.
    pub fn find_mut(&mut self, id: &Id<T>) -> Result<&mut T, GraphError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id() == id)
            .ok_or_else(|| GraphError::NotFound {
                kind: T::KIND,
                id: id.value().clone(),
            })
    }

    /// Children in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Id<T>> {
        self.entries.iter().map(|entry| entry.id())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T: GraphNode> IntoIterator for &'a IdMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// The JSON form of a container is its ordered child list; the mint
// counter is recomputed on load.

impl<T: GraphNode + Serialize> Serialize for IdMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: GraphNode + Deserialize<'de>> Deserialize<'de> for IdMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<T>::deserialize(deserializer)?;
        IdMap::from_vec(entries).map_err(D::Error::custom)
    }
}
