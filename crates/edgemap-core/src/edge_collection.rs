//! Edge collections: the contract every edge collection type satisfies and
//! the factory that defines one.
//!
//! Defining an edge collection type walks a one-way path:
//!
//! ```text
//! Undeclared ──define()──▶ Adopting ──register──▶ Registered
//!                             │
//!                             └── resolution / registration error: definition aborted
//! ```
//!
//! Registration is synchronous and happens exactly once, inside
//! [`EdgeCollectionType::define`]. A type that fails either step is never
//! handed out.

use std::sync::Arc;

use crate::collection::{Collection, CollectionHandle};
use crate::config::ConflictPolicy;
use crate::error::{Error, Result};
use crate::graph::{Direction, EdgeDefinition, EdgeDocument, Graph, RawEdgeCollection};
use crate::model::{EdgeModelDescriptor, Endpoints};
use crate::naming::{pluralize, NamingConvention};

/// Behaviour shared by every edge collection type.
///
/// Implementors provide their identity (type name, edge model, graph and
/// naming convention); everything else is derived from those.
pub trait EdgeCollection: Send + Sync {
    /// Returns the edge collection type name, e.g. `SomeEdgesCollection`.
    fn type_name(&self) -> &str;

    /// Returns the edge model this collection manages.
    fn edge_class(&self) -> &EdgeModelDescriptor;

    /// Returns the graph this collection is registered with.
    fn graph(&self) -> &Arc<dyn Graph>;

    /// Returns the naming convention used for derivations.
    fn naming(&self) -> &NamingConvention;

    /// Returns how a conflicting graph definition is handled.
    fn conflict_policy(&self) -> ConflictPolicy {
        ConflictPolicy::Error
    }

    /// Returns the storage collection name, e.g. `some_edges`.
    fn collection_name(&self) -> String {
        self.naming().collection_name(self.type_name())
    }

    /// Returns the edge definition for this collection.
    ///
    /// Endpoints are always sequences, even when the model declares a single
    /// collection.
    fn edge_definition(&self) -> EdgeDefinition {
        EdgeDefinition::new(
            &self.collection_name(),
            self.edge_class().from().to_vec(),
            self.edge_class().to().to_vec(),
        )
    }

    /// Returns the raw storage handle of this collection from the graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if the graph does not know the
    /// collection.
    fn connection(&self) -> Result<RawEdgeCollection> {
        self.graph().edge_collection(&self.collection_name())
    }

    /// Registers this collection's edge definition with the graph.
    ///
    /// Idempotent: if the graph already holds the identical definition
    /// nothing is written. A different existing definition is kept when the
    /// conflict policy is [`ConflictPolicy::Skip`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Registration` if the graph holds a different
    /// definition under [`ConflictPolicy::Error`], or if the graph rejects
    /// the write.
    fn add_edge_definition_to_graph(&self) -> Result<()> {
        let definition = self.edge_definition();
        let graph = self.graph();

        match graph.edge_definition(definition.collection()) {
            Some(existing) if existing == definition => {
                tracing::debug!(
                    graph = graph.name(),
                    definition = %definition,
                    "Edge definition already registered"
                );
                Ok(())
            }
            Some(existing) => {
                tracing::warn!(
                    graph = graph.name(),
                    existing = %existing,
                    requested = %definition,
                    policy = ?self.conflict_policy(),
                    "Conflicting edge definition"
                );
                match self.conflict_policy() {
                    ConflictPolicy::Skip => Ok(()),
                    ConflictPolicy::Error => Err(Error::Registration {
                        collection: definition.collection().to_string(),
                        reason: format!("already defined as {existing}"),
                    }),
                }
            }
            None => {
                graph.add_edge_definition(&definition)?;
                tracing::info!(
                    graph = graph.name(),
                    type_name = self.type_name(),
                    definition = %definition,
                    "Edge definition registered"
                );
                Ok(())
            }
        }
    }

    /// Returns the vertices adjacent to `vertex_id` through this collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot traverse this collection.
    fn neighbors(&self, vertex_id: &str, direction: Direction) -> Result<Vec<String>> {
        self.graph()
            .neighbors(&self.collection_name(), vertex_id, direction)
    }
}

/// Finds the edge model a collection type name maps to.
///
/// The suffix is stripped from `type_name` and the remaining stem is matched
/// against the pluralized name of each model.
///
/// # Errors
///
/// Returns `Error::Resolution` if the name lacks the suffix, or if no model
/// or more than one model matches the stem.
pub fn resolve_edge_class<'a, I>(
    type_name: &str,
    models: I,
    naming: &NamingConvention,
) -> Result<EdgeModelDescriptor>
where
    I: IntoIterator<Item = &'a EdgeModelDescriptor>,
{
    let stem = naming.stem(type_name).ok_or_else(|| Error::Resolution {
        type_name: type_name.to_string(),
        reason: format!("name does not end with '{}'", naming.suffix()),
    })?;

    let matches: Vec<&EdgeModelDescriptor> = models
        .into_iter()
        .filter(|model| pluralize(model.name()) == stem)
        .collect();

    match matches.as_slice() {
        [model] => Ok((*model).clone()),
        [] => Err(Error::Resolution {
            type_name: type_name.to_string(),
            reason: format!("no edge model registered for '{stem}'"),
        }),
        ambiguous => Err(Error::Resolution {
            type_name: type_name.to_string(),
            reason: format!(
                "models {:?} all pluralize to '{stem}'",
                ambiguous.iter().map(|m| m.name()).collect::<Vec<_>>()
            ),
        }),
    }
}

/// A defined, registered edge collection type.
///
/// Obtained through [`EdgeCollectionType::define`] or the registry; holding
/// one means its edge definition is present in the graph.
#[derive(Debug)]
pub struct EdgeCollectionType {
    type_name: String,
    edge_class: EdgeModelDescriptor,
    graph: Arc<dyn Graph>,
    naming: NamingConvention,
    conflict_policy: ConflictPolicy,
}

impl EdgeCollectionType {
    /// Defines an edge collection type and registers it with the graph.
    ///
    /// Resolves the edge model from `type_name` by convention, then performs
    /// the one registration call.
    ///
    /// # Errors
    ///
    /// - `Error::Resolution` if no model matches `type_name`.
    /// - `Error::Registration` if the graph rejects the definition.
    pub fn define<'a, I>(
        type_name: &str,
        models: I,
        graph: Arc<dyn Graph>,
        naming: NamingConvention,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a EdgeModelDescriptor>,
    {
        let edge_class = resolve_edge_class(type_name, models, &naming)?;
        Self::define_for(type_name, edge_class, graph, naming, ConflictPolicy::default())
    }

    /// Defines an edge collection type for an already known edge model and
    /// registers it with the graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::Registration` if the graph rejects the definition, or
    /// holds a different one under [`ConflictPolicy::Error`].
    pub fn define_for(
        type_name: &str,
        edge_class: EdgeModelDescriptor,
        graph: Arc<dyn Graph>,
        naming: NamingConvention,
        conflict_policy: ConflictPolicy,
    ) -> Result<Self> {
        tracing::trace!(type_name, model = edge_class.name(), "Adopting edge collection");

        let collection_type = Self {
            type_name: type_name.to_string(),
            edge_class,
            graph,
            naming,
            conflict_policy,
        };
        collection_type.add_edge_definition_to_graph()?;

        Ok(collection_type)
    }
}

impl EdgeCollection for EdgeCollectionType {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn edge_class(&self) -> &EdgeModelDescriptor {
        &self.edge_class
    }

    fn graph(&self) -> &Arc<dyn Graph> {
        &self.graph
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }
}

/// Defines the edge collection for `model` without a registry and opens it.
///
/// Uses the default naming convention.
///
/// # Errors
///
/// Returns an error if the name is invalid, the graph rejects the
/// definition, or the collection cannot be opened.
pub fn define_edge_collection(
    model: EdgeModelDescriptor,
    graph: Arc<dyn Graph>,
) -> Result<EdgeCollectionHandle> {
    let naming = NamingConvention::default();
    let type_name = naming.collection_type_name(model.name())?;
    let collection_type = EdgeCollectionType::define_for(
        &type_name,
        model,
        graph,
        naming,
        ConflictPolicy::default(),
    )?;
    EdgeCollectionHandle::open(Arc::new(collection_type))
}

/// An opened edge collection: the edge surface plus generic collection
/// operations delegated to the composed [`CollectionHandle`].
///
/// Inserted and replaced edges must connect the model's collections.
#[derive(Debug, Clone)]
pub struct EdgeCollectionHandle {
    collection_type: Arc<EdgeCollectionType>,
    collection: CollectionHandle,
}

impl EdgeCollectionHandle {
    /// Opens a handle on a defined edge collection type.
    ///
    /// # Errors
    ///
    /// Returns `Error::CollectionNotFound` if the graph has no storage for
    /// the collection.
    pub fn open(collection_type: Arc<EdgeCollectionType>) -> Result<Self> {
        let collection = CollectionHandle::new(collection_type.connection()?);
        Ok(Self {
            collection_type,
            collection,
        })
    }

    /// Returns the edge collection type this handle was opened on.
    #[must_use]
    pub fn collection_type(&self) -> &Arc<EdgeCollectionType> {
        &self.collection_type
    }

    /// Returns the composed generic collection.
    #[must_use]
    pub fn collection(&self) -> &CollectionHandle {
        &self.collection
    }

    /// Returns the edges leaving `vertex_id`.
    #[must_use]
    pub fn outbound(&self, vertex_id: &str) -> Vec<EdgeDocument> {
        let store = self.collection.raw().read();
        store.outgoing(vertex_id).into_iter().cloned().collect()
    }

    /// Returns the edges arriving at `vertex_id`.
    #[must_use]
    pub fn inbound(&self, vertex_id: &str) -> Vec<EdgeDocument> {
        let store = self.collection.raw().read();
        store.incoming(vertex_id).into_iter().cloned().collect()
    }

    fn check_endpoints(&self, edge: &EdgeDocument) -> Result<()> {
        let model = self.edge_class();
        check_endpoint(&self.collection_name(), edge.from(), model.from())?;
        check_endpoint(&self.collection_name(), edge.to(), model.to())
    }
}

fn check_endpoint(collection: &str, vertex_id: &str, allowed: &Endpoints) -> Result<()> {
    if allowed.contains(crate::graph::vertex_collection(vertex_id)) {
        return Ok(());
    }
    Err(Error::EndpointMismatch {
        collection: collection.to_string(),
        vertex: vertex_id.to_string(),
        allowed: allowed.to_vec(),
    })
}

impl EdgeCollection for EdgeCollectionHandle {
    fn type_name(&self) -> &str {
        self.collection_type.type_name()
    }

    fn edge_class(&self) -> &EdgeModelDescriptor {
        self.collection_type.edge_class()
    }

    fn graph(&self) -> &Arc<dyn Graph> {
        self.collection_type.graph()
    }

    fn naming(&self) -> &NamingConvention {
        self.collection_type.naming()
    }

    fn conflict_policy(&self) -> ConflictPolicy {
        self.collection_type.conflict_policy()
    }
}

impl Collection for EdgeCollectionHandle {
    type Document = EdgeDocument;

    fn name(&self) -> &str {
        self.collection.name()
    }

    fn get(&self, key: &str) -> Result<EdgeDocument> {
        self.collection.get(key)
    }

    fn insert(&self, document: EdgeDocument) -> Result<String> {
        self.check_endpoints(&document)?;
        self.collection.insert(document)
    }

    fn replace(&self, key: &str, document: EdgeDocument) -> Result<EdgeDocument> {
        self.check_endpoints(&document)?;
        self.collection.replace(key, document)
    }

    fn remove(&self, key: &str) -> Result<EdgeDocument> {
        self.collection.remove(key)
    }

    fn count(&self) -> usize {
        self.collection.count()
    }

    fn all(&self) -> Vec<EdgeDocument> {
        self.collection.all()
    }
}
