//! Edge collection registry.
//!
//! The registry is the application namespace for edge mapping: it knows the
//! registered edge models and the edge collection types defined for them.
//! Resolving a model either returns the type the application defined or
//! defines one on the spot.

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::config::{ConflictPolicy, EdgeMapConfig};
use crate::edge_collection::{
    resolve_edge_class, EdgeCollection, EdgeCollectionHandle, EdgeCollectionType,
};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::model::{EdgeModel, EdgeModelDescriptor};
use crate::naming::NamingConvention;

#[derive(Debug, Default)]
struct Namespace {
    models: IndexMap<String, EdgeModelDescriptor>,
    collections: IndexMap<String, Arc<EdgeCollectionType>>,
}

impl Namespace {
    /// Returns true if `model` is not registered yet.
    fn check_model(&self, model: &EdgeModelDescriptor) -> Result<bool> {
        if model.name().is_empty() {
            return Err(Error::InvalidName("edge model name is empty".to_string()));
        }
        match self.models.get(model.name()) {
            Some(existing) if existing == model => Ok(false),
            Some(_) => Err(Error::ModelConflict(model.name().to_string())),
            None => Ok(true),
        }
    }

    fn add_model(&mut self, model: &EdgeModelDescriptor) -> Result<()> {
        if self.check_model(model)? {
            self.models
                .insert(model.name().to_string(), model.clone());
        }
        Ok(())
    }
}

/// Maps edge models to their edge collection types.
///
/// Resolve-or-create runs under a single lock, so concurrent resolution of
/// the same model yields one type and one graph registration.
///
/// # Example
///
/// ```rust,ignore
/// use edgemap_core::{EdgeCollectionRegistry, EdgeModelDescriptor, MemoryGraph};
/// use std::sync::Arc;
///
/// let registry = EdgeCollectionRegistry::new(Arc::new(MemoryGraph::default()));
/// let model = EdgeModelDescriptor::new("AmazingEdge", "users", "posts");
///
/// let collection = registry.for_model(&model)?;
/// assert_eq!(collection.collection_name(), "amazing_edges");
/// ```
#[derive(Debug)]
pub struct EdgeCollectionRegistry {
    graph: Arc<dyn Graph>,
    naming: NamingConvention,
    conflict_policy: ConflictPolicy,
    namespace: Mutex<Namespace>,
}

impl EdgeCollectionRegistry {
    /// Creates an empty registry using the default naming convention.
    #[must_use]
    pub fn new(graph: Arc<dyn Graph>) -> Self {
        Self::with_naming(graph, NamingConvention::default())
    }

    /// Creates an empty registry with a custom naming convention.
    #[must_use]
    pub fn with_naming(graph: Arc<dyn Graph>, naming: NamingConvention) -> Self {
        Self {
            graph,
            naming,
            conflict_policy: ConflictPolicy::default(),
            namespace: Mutex::new(Namespace::default()),
        }
    }

    /// Sets how conflicting graph definitions are handled for types defined
    /// from now on.
    #[must_use]
    pub fn with_conflict_policy(mut self, conflict_policy: ConflictPolicy) -> Self {
        self.conflict_policy = conflict_policy;
        self
    }

    /// Creates a registry from configuration and registers every model it
    /// declares.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, names a different
    /// graph than `graph`, or any declared model fails to resolve or
    /// register.
    pub fn from_config(graph: Arc<dyn Graph>, config: &EdgeMapConfig) -> Result<Self> {
        config.validate()?;
        if graph.name() != config.graph.name {
            return Err(Error::Config(format!(
                "configured graph '{}' does not match graph '{}'",
                config.graph.name,
                graph.name()
            )));
        }
        let naming = NamingConvention::with_suffix(&config.naming.collection_suffix)?;
        let registry = Self::with_naming(graph, naming)
            .with_conflict_policy(config.registration.on_conflict);
        registry.auto_register(&config.models)?;
        Ok(registry)
    }

    /// Returns the graph edge definitions are registered with.
    #[must_use]
    pub fn graph(&self) -> &Arc<dyn Graph> {
        &self.graph
    }

    /// Returns the naming convention.
    #[must_use]
    pub fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    /// Returns the conflict policy applied to new types.
    #[must_use]
    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.conflict_policy
    }

    /// Makes an edge model known to the namespace.
    ///
    /// Registering an identical descriptor again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::ModelConflict` if a different model with the same name
    /// is registered, or `Error::InvalidName` for an empty name.
    pub fn register_model(&self, model: EdgeModelDescriptor) -> Result<()> {
        self.namespace.lock().add_model(&model)
    }

    /// Makes a static edge model known to the namespace.
    ///
    /// # Errors
    ///
    /// See [`register_model`](Self::register_model).
    pub fn register<M: EdgeModel>(&self) -> Result<()> {
        self.register_model(M::descriptor())
    }

    /// Returns a registered model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<EdgeModelDescriptor> {
        self.namespace.lock().models.get(name).cloned()
    }

    /// Returns all registered models in registration order.
    #[must_use]
    pub fn models(&self) -> Vec<EdgeModelDescriptor> {
        self.namespace.lock().models.values().cloned().collect()
    }

    /// Returns the edge collection type for `model`, defining it if needed.
    ///
    /// If a type named after the model already exists it is returned as is;
    /// an application-defined type always wins. Otherwise a new type is
    /// defined for `model` itself, which registers its edge definition with
    /// the graph. The model is recorded only once the definition succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the model name is empty, conflicts with a
    /// registered model, or the graph rejects the definition.
    pub fn for_model(&self, model: &EdgeModelDescriptor) -> Result<Arc<EdgeCollectionType>> {
        let type_name = self.naming.collection_type_name(model.name())?;
        let mut namespace = self.namespace.lock();

        if let Some(existing) = namespace.collections.get(&type_name) {
            tracing::trace!(type_name = %type_name, "Edge collection resolved");
            return Ok(Arc::clone(existing));
        }

        let is_new_model = namespace.check_model(model)?;
        let collection_type = self.bind_locked(&mut namespace, &type_name, model.clone())?;
        if is_new_model {
            namespace
                .models
                .insert(model.name().to_string(), model.clone());
        }
        Ok(collection_type)
    }

    /// Returns the edge collection type for a static edge model.
    ///
    /// # Errors
    ///
    /// See [`for_model`](Self::for_model).
    pub fn for_edge<M: EdgeModel>(&self) -> Result<Arc<EdgeCollectionType>> {
        self.for_model(&M::descriptor())
    }

    /// Defines a new edge collection type named `type_name`.
    ///
    /// The edge model is resolved from the name, and the edge definition is
    /// registered with the graph exactly once.
    ///
    /// # Errors
    ///
    /// - `Error::CollectionExists` if the name is already bound.
    /// - `Error::Resolution` if no registered model matches the name.
    /// - `Error::Registration` if the graph rejects the definition.
    pub fn create_edge_collection(&self, type_name: &str) -> Result<Arc<EdgeCollectionType>> {
        let mut namespace = self.namespace.lock();
        if namespace.collections.contains_key(type_name) {
            return Err(Error::CollectionExists(type_name.to_string()));
        }
        self.create_locked(&mut namespace, type_name)
    }

    /// Defines an application edge collection type ahead of resolution.
    ///
    /// Later calls to [`for_model`](Self::for_model) for the matching model
    /// return this type.
    ///
    /// # Errors
    ///
    /// See [`create_edge_collection`](Self::create_edge_collection).
    pub fn define(&self, type_name: &str) -> Result<Arc<EdgeCollectionType>> {
        tracing::debug!(type_name, "Defining application edge collection");
        self.create_edge_collection(type_name)
    }

    /// Returns a defined edge collection type by name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<Arc<EdgeCollectionType>> {
        self.namespace.lock().collections.get(type_name).cloned()
    }

    /// Returns the edge collection type defined for a model name, if any.
    #[must_use]
    pub fn collection_for_model(&self, model_name: &str) -> Option<Arc<EdgeCollectionType>> {
        let type_name = self.naming.collection_type_name(model_name).ok()?;
        self.get(&type_name)
    }

    /// Resolves `model` and opens its edge collection.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails or the graph has no storage for
    /// the collection.
    pub fn open(&self, model: &EdgeModelDescriptor) -> Result<EdgeCollectionHandle> {
        EdgeCollectionHandle::open(self.for_model(model)?)
    }

    /// Returns the names of all defined edge collection types.
    #[must_use]
    pub fn type_names(&self) -> Vec<String> {
        self.namespace.lock().collections.keys().cloned().collect()
    }

    /// Returns the number of defined edge collection types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespace.lock().collections.len()
    }

    /// Returns true if no edge collection type is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers and resolves every model in `models`.
    ///
    /// Intended to run once at startup. Returns the number of edge
    /// collection types defined by this call.
    ///
    /// # Errors
    ///
    /// Stops at the first model that fails to register or resolve.
    pub fn auto_register(&self, models: &[EdgeModelDescriptor]) -> Result<usize> {
        let before = self.len();
        for model in models {
            self.for_model(model)?;
            self.register_model(model.clone())?;
        }
        let defined = self.len() - before;
        tracing::info!(
            graph = self.graph.name(),
            models = models.len(),
            defined,
            "Edge collections auto-registered"
        );
        Ok(defined)
    }

    fn create_locked(
        &self,
        namespace: &mut Namespace,
        type_name: &str,
    ) -> Result<Arc<EdgeCollectionType>> {
        let edge_class = resolve_edge_class(type_name, namespace.models.values(), &self.naming)?;
        self.bind_locked(namespace, type_name, edge_class)
    }

    fn bind_locked(
        &self,
        namespace: &mut Namespace,
        type_name: &str,
        edge_class: EdgeModelDescriptor,
    ) -> Result<Arc<EdgeCollectionType>> {
        let collection_type = Arc::new(EdgeCollectionType::define_for(
            type_name,
            edge_class,
            Arc::clone(&self.graph),
            self.naming.clone(),
            self.conflict_policy,
        )?);
        namespace
            .collections
            .insert(type_name.to_string(), Arc::clone(&collection_type));

        tracing::debug!(
            type_name,
            collection = %collection_type.collection_name(),
            "Edge collection defined"
        );
        Ok(collection_type)
    }
}
