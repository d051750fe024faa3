//! Graph boundary: edge definitions, raw edge collections and traversal.
//!
//! The [`Graph`] trait is the contract the mapping layer relies on. It is
//! implemented by the storage client; [`MemoryGraph`] is the in-process
//! implementation used for embedding and tests.

mod edge;
mod memory;

#[cfg(test)]
mod memory_tests;

pub use edge::{vertex_collection, Direction, EdgeDocument, EdgeStore};
pub use memory::{MemoryGraph, RawEdgeCollection};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// An edge definition: which collections an edge collection connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeDefinition {
    collection: String,
    from: Vec<String>,
    to: Vec<String>,
}

impl EdgeDefinition {
    /// Creates an edge definition.
    #[must_use]
    pub fn new(collection: &str, from: Vec<String>, to: Vec<String>) -> Self {
        Self {
            collection: collection.to_string(),
            from,
            to,
        }
    }

    /// Returns the edge collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the source vertex collections.
    #[must_use]
    pub fn from(&self) -> &[String] {
        &self.from
    }

    /// Returns the destination vertex collections.
    #[must_use]
    pub fn to(&self) -> &[String] {
        &self.to
    }
}

impl fmt::Display for EdgeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.collection,
            self.from.join("|"),
            self.to.join("|")
        )
    }
}

/// Graph operations consumed by the mapping layer.
///
/// Implementations are shared process-wide behind an `Arc<dyn Graph>` and
/// must be safe to read concurrently.
pub trait Graph: Send + Sync + fmt::Debug {
    /// Returns the graph name.
    fn name(&self) -> &str;

    /// Registers an edge definition.
    ///
    /// # Errors
    ///
    /// Returns `Error::Registration` if the graph rejects the definition,
    /// e.g. because the collection is already defined with other endpoints.
    fn add_edge_definition(&self, definition: &EdgeDefinition) -> Result<()>;

    /// Returns the definition registered for `collection`, if any.
    fn edge_definition(&self, collection: &str) -> Option<EdgeDefinition>;

    /// Returns all registered edge definitions.
    fn edge_definitions(&self) -> Vec<EdgeDefinition>;

    /// Returns the raw storage handle for an edge collection.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if no such edge collection exists.
    fn edge_collection(&self, name: &str) -> Result<RawEdgeCollection>;

    /// Returns the vertices adjacent to `vertex_id` through `collection`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if no such edge collection exists.
    fn neighbors(
        &self,
        collection: &str,
        vertex_id: &str,
        direction: Direction,
    ) -> Result<Vec<String>>;
}
