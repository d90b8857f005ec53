//! Reference-or-document relationship fields.

use serde::{Deserialize, Serialize};

/// A typed document with a numeric primary id.
pub trait Entity {
    /// Returns the document id.
    fn id(&self) -> i64;
}

/// A relationship field value: either an unresolved reference id or the
/// referenced document, depending on the resolution depth of the query that
/// produced it. Consuming code matches on the variant instead of casting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    /// An unresolved reference.
    Id(i64),
    /// A resolved document.
    Doc(Box<T>),
}

impl<T> Relation<T> {
    /// Returns the referenced document if it has been resolved.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Relation::Id(_) => None,
            Relation::Doc(doc) => Some(doc),
        }
    }
}

impl<T: Entity> Relation<T> {
    /// Returns the referenced document id.
    #[inline]
    pub fn id(&self) -> i64 {
        match self {
            Relation::Id(id) => *id,
            Relation::Doc(doc) => doc.id(),
        }
    }
}

impl<T> Default for Relation<T> {
    /// An unresolved reference to no document.
    #[inline]
    fn default() -> Self {
        Relation::Id(0)
    }
}

impl<T> From<i64> for Relation<T> {
    #[inline]
    fn from(id: i64) -> Self {
        Relation::Id(id)
    }
}
