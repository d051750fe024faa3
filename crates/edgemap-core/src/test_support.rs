//! Graph double recording registration calls.

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::graph::{Direction, EdgeDefinition, Graph, MemoryGraph, RawEdgeCollection};

/// Delegates to a `MemoryGraph` and records every `add_edge_definition` call.
#[derive(Debug, Default)]
pub(crate) struct CountingGraph {
    inner: MemoryGraph,
    calls: Mutex<Vec<EdgeDefinition>>,
    reject: bool,
}

impl CountingGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A graph that refuses every registration.
    pub(crate) fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<EdgeDefinition> {
        self.calls.lock().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Graph for CountingGraph {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn add_edge_definition(&self, definition: &EdgeDefinition) -> Result<()> {
        self.calls.lock().push(definition.clone());
        if self.reject {
            return Err(Error::Registration {
                collection: definition.collection().to_string(),
                reason: "read-only graph".to_string(),
            });
        }
        self.inner.add_edge_definition(definition)
    }

    fn edge_definition(&self, collection: &str) -> Option<EdgeDefinition> {
        self.inner.edge_definition(collection)
    }

    fn edge_definitions(&self) -> Vec<EdgeDefinition> {
        self.inner.edge_definitions()
    }

    fn edge_collection(&self, name: &str) -> Result<RawEdgeCollection> {
        self.inner.edge_collection(name)
    }

    fn neighbors(
        &self,
        collection: &str,
        vertex_id: &str,
        direction: Direction,
    ) -> Result<Vec<String>> {
        self.inner.neighbors(collection, vertex_id, direction)
    }
}
