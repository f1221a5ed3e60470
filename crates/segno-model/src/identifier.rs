//! Typed identifiers for graph objects.
//!
//! Every object in a document is distinguished from its siblings by an
//! [`Id<T>`]. The raw value is either a plain integer minted by the owning
//! container, or an "alternative" string tag for objects that were rebuilt
//! across schema versions and can no longer share the integer namespace.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The raw value of an identifier.
///
/// Serialized as a discriminated union in both wire forms so that numeric
/// and tag identifiers never alias each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdValue {
    /// Plain integer identifier, unique among live siblings.
    Num(i64),
    /// Alternative tag identifier, outside the integer namespace.
    Tag(String),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Num(n) => write!(f, "{}", n),
            IdValue::Tag(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i64> for IdValue {
    fn from(n: i64) -> Self {
        IdValue::Num(n)
    }
}

impl From<&str> for IdValue {
    fn from(s: &str) -> Self {
        IdValue::Tag(s.to_string())
    }
}

impl From<String> for IdValue {
    fn from(s: String) -> Self {
        IdValue::Tag(s)
    }
}

/// Identifier of an object of type `T` within its owning container.
///
/// Minted by the container on insertion and immutable for the object's
/// lifetime. The phantom parameter only exists to keep identifiers of
/// different object types from being mixed up; it carries no data.
pub struct Id<T> {
    value: IdValue,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw identifier value.
    pub fn new(value: impl Into<IdValue>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Numeric identifier.
    pub fn num(n: i64) -> Self {
        Self::new(n)
    }

    /// Alternative tag identifier.
    pub fn tag(s: impl Into<String>) -> Self {
        Self::new(s.into())
    }

    /// The raw value.
    pub fn value(&self) -> &IdValue {
        &self.value
    }

    /// Consume into the raw value.
    pub fn into_value(self) -> IdValue {
        self.value
    }

    /// Re-type the identifier. Used when crossing serialization
    /// boundaries where only the raw value is stored.
    pub fn from_value(value: IdValue) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

// Manual impls so that `T` is not required to implement anything.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IdValue::deserialize(deserializer).map(Id::from_value)
    }
}
