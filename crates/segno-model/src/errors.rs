//! Error types for the segno-model crate.

use thiserror::Error;

use crate::identifier::IdValue;
use crate::path::ObjectKind;

/// Failure to resolve a [`crate::Path`] against the live graph.
///
/// Always recoverable: the caller aborts the single operation that needed
/// the object. Stale and foreign paths end up here, never in a dangling
/// reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A step's container has no child with that identifier.
    #[error("path step {step}: no {kind} with identifier {id}")]
    StepNotFound {
        step: usize,
        kind: ObjectKind,
        id: IdValue,
    },

    /// A step asks a node for a child kind it cannot contain.
    #[error("path step {step}: a {found} cannot contain a {requested}")]
    KindMismatch {
        step: usize,
        requested: ObjectKind,
        found: ObjectKind,
    },

    /// The path resolved, but to a different kind than the caller needed.
    #[error("path addresses a {found}, expected a {expected}")]
    WrongTarget {
        expected: ObjectKind,
        found: ObjectKind,
    },
}

/// Structural mutation errors.
///
/// These indicate a collaborator bug (paths are re-resolved immediately
/// before use), so callers log them and abort rather than trying to
/// recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// `add` with an identifier already present among live siblings.
    #[error("duplicate {kind} identifier {id}")]
    DuplicateId { kind: ObjectKind, id: IdValue },

    /// `remove` or a lookup on an absent identifier.
    #[error("no {kind} with identifier {id}")]
    NotFound { kind: ObjectKind, id: IdValue },

    /// Removing an event still referenced by an interval.
    #[error("event {id} is still an endpoint of interval {interval}")]
    EventInUse { id: IdValue, interval: IdValue },

    /// A cable endpoint does not resolve to a live port.
    #[error("cable {cable}: stale {role} endpoint {endpoint}")]
    StaleEndpoint {
        cable: IdValue,
        role: &'static str,
        endpoint: String,
    },

    /// A cable endpoint resolves to a port of the wrong direction.
    #[error("cable {cable}: {role} {endpoint} must be an {expected} port")]
    EndpointDirection {
        cable: IdValue,
        role: &'static str,
        endpoint: String,
        expected: &'static str,
    },
}
