//! In-memory graph implementation.

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::sync::Arc;

use super::{Direction, EdgeDefinition, EdgeStore, Graph};
use crate::error::{Error, Result};

/// Shared handle to the storage of one edge collection.
///
/// Clones point at the same store. Two handles are equal when they share
/// the same underlying store.
#[derive(Debug, Clone)]
pub struct RawEdgeCollection {
    name: String,
    store: Arc<RwLock<EdgeStore>>,
}

impl RawEdgeCollection {
    /// Creates a handle over a fresh, empty store.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            store: Arc::new(RwLock::new(EdgeStore::new())),
        }
    }

    /// Returns the edge collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acquires shared access to the store.
    pub fn read(&self) -> RwLockReadGuard<'_, EdgeStore> {
        self.store.read()
    }

    /// Acquires exclusive access to the store.
    pub fn write(&self) -> RwLockWriteGuard<'_, EdgeStore> {
        self.store.write()
    }
}

impl PartialEq for RawEdgeCollection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.store, &other.store)
    }
}

impl Eq for RawEdgeCollection {}

/// Graph kept entirely in process memory.
///
/// Registering a definition creates its edge collection. A collection can
/// be defined once; registering the identical triple again is accepted and
/// changes nothing, registering different endpoints is rejected.
#[derive(Debug)]
pub struct MemoryGraph {
    name: String,
    definitions: RwLock<IndexMap<String, EdgeDefinition>>,
    collections: RwLock<HashMap<String, RawEdgeCollection>>,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_GRAPH_NAME)
    }
}

impl MemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            definitions: RwLock::new(IndexMap::new()),
            collections: RwLock::new(HashMap::new()),
        }
    }

    fn collection(&self, name: &str) -> Result<RawEdgeCollection> {
        self.collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }
}

impl Graph for MemoryGraph {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_edge_definition(&self, definition: &EdgeDefinition) -> Result<()> {
        let mut definitions = self.definitions.write();

        if let Some(existing) = definitions.get(definition.collection()) {
            if existing == definition {
                return Ok(());
            }
            return Err(Error::Registration {
                collection: definition.collection().to_string(),
                reason: format!("already defined as {existing}, refusing {definition}"),
            });
        }

        self.collections
            .write()
            .entry(definition.collection().to_string())
            .or_insert_with(|| RawEdgeCollection::new(definition.collection()));
        definitions.insert(definition.collection().to_string(), definition.clone());

        tracing::debug!(graph = %self.name, definition = %definition, "Edge definition added");
        Ok(())
    }

    fn edge_definition(&self, collection: &str) -> Option<EdgeDefinition> {
        self.definitions.read().get(collection).cloned()
    }

    fn edge_definitions(&self) -> Vec<EdgeDefinition> {
        self.definitions.read().values().cloned().collect()
    }

    fn edge_collection(&self, name: &str) -> Result<RawEdgeCollection> {
        self.collection(name)
    }

    fn neighbors(
        &self,
        collection: &str,
        vertex_id: &str,
        direction: Direction,
    ) -> Result<Vec<String>> {
        let raw = self.collection(collection)?;
        let neighbors = raw.read().neighbors(vertex_id, direction);
        Ok(neighbors)
    }
}
