//! # `EdgeMap` Core
//!
//! Maps application edge models to graph edge collections and keeps the
//! graph's edge definitions in step with the model layer.
//!
//! ## Features
//!
//! - **Convention-based resolution**: `AmazingEdge` is managed by
//!   `AmazingEdgesCollection`, stored in `amazing_edges`
//! - **Explicit definitions win**: application-defined collection types are
//!   returned untouched
//! - **Exactly-once registration**: defining a collection type registers its
//!   `(collection, from, to)` edge definition with the graph once
//! - **Composition**: edge collections expose generic collection CRUD plus
//!   edge-specific operations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use edgemap_core::{
//!     Collection, Direction, EdgeCollection, EdgeCollectionRegistry, EdgeDocument,
//!     EdgeModelDescriptor, MemoryGraph,
//! };
//! use std::sync::Arc;
//!
//! let graph = Arc::new(MemoryGraph::new("social"));
//! let registry = EdgeCollectionRegistry::new(graph);
//!
//! let follows = EdgeModelDescriptor::new("Follow", "users", "users");
//! let collection = registry.open(&follows)?;
//!
//! collection.insert(EdgeDocument::new("users/1", "users/2"))?;
//! let neighbors = collection.neighbors("users/1", Direction::Outbound)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod collection;
pub mod config;
pub mod edge_collection;
pub mod error;
pub mod graph;
pub mod model;
pub mod naming;
pub mod resolver;
#[cfg(test)]
mod resolver_tests;
#[cfg(test)]
mod test_support;

pub use collection::{Collection, CollectionHandle};
pub use config::{
    ConfigError, ConflictPolicy, EdgeMapConfig, GraphConfig, LoggingConfig, NamingConfig,
    RegistrationConfig,
};
pub use edge_collection::{
    define_edge_collection, resolve_edge_class, EdgeCollection, EdgeCollectionHandle,
    EdgeCollectionType,
};
pub use error::{Error, Result};
pub use graph::{
    Direction, EdgeDefinition, EdgeDocument, EdgeStore, Graph, MemoryGraph, RawEdgeCollection,
};
pub use model::{EdgeModel, EdgeModelDescriptor, Endpoints};
pub use naming::NamingConvention;
pub use resolver::EdgeCollectionRegistry;
