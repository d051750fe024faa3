//! Edge documents and their storage.
//!
//! This module provides:
//! - `EdgeDocument`: a stored edge between two vertex ids with properties
//! - `EdgeStore`: keyed storage with bidirectional vertex indexes

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Direction used when walking edges from a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow edges leaving the vertex.
    Outbound,
    /// Follow edges arriving at the vertex.
    Inbound,
    /// Follow edges in both directions.
    #[default]
    Any,
}

/// An edge document stored in an edge collection.
///
/// Vertex ids use the `collection/key` form, e.g. `users/42`.
///
/// # Example
///
/// ```rust,ignore
/// use edgemap_core::EdgeDocument;
/// use serde_json::json;
///
/// let edge = EdgeDocument::new("users/1", "teams/7")
///     .with_key("m1")
///     .with_property("role", json!("owner"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDocument {
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(rename = "_from")]
    from: String,
    #[serde(rename = "_to")]
    to: String,
    #[serde(flatten)]
    properties: HashMap<String, Value>,
}

impl EdgeDocument {
    /// Creates an edge between two vertex ids. The key is assigned on insert.
    #[must_use]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            key: None,
            from: from.to_string(),
            to: to.to_string(),
            properties: HashMap::new(),
        }
    }

    /// Sets an explicit document key (builder pattern).
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Adds one property (builder pattern).
    #[must_use]
    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    /// Returns the document key, if assigned.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the source vertex id.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the destination vertex id.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns all properties of this edge.
    #[must_use]
    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.properties
    }

    /// Returns a specific property value, if it exists.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns the vertex collection of the source vertex.
    #[must_use]
    pub fn from_collection(&self) -> &str {
        vertex_collection(&self.from)
    }

    /// Returns the vertex collection of the destination vertex.
    #[must_use]
    pub fn to_collection(&self) -> &str {
        vertex_collection(&self.to)
    }

    pub(crate) fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }
}

/// Returns the collection part of a `collection/key` vertex id.
#[must_use]
pub fn vertex_collection(vertex_id: &str) -> &str {
    vertex_id
        .split_once('/')
        .map_or(vertex_id, |(collection, _)| collection)
}

/// Storage for edge documents with bidirectional vertex indexing.
///
/// Provides O(1) access to edges by key and O(degree) access to the
/// outgoing/incoming edges of any vertex.
#[derive(Debug, Default)]
pub struct EdgeStore {
    /// All edges indexed by key, in insertion order
    edges: IndexMap<String, EdgeDocument>,
    /// Outgoing edges: from vertex -> keys
    outgoing: HashMap<String, Vec<String>>,
    /// Incoming edges: to vertex -> keys
    incoming: HashMap<String, Vec<String>>,
    next_key: u64,
}

impl EdgeStore {
    /// Creates a new empty edge store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an edge, assigning a key when the document has none.
    ///
    /// Returns the key, or `None` if the key is already taken.
    pub fn insert(&mut self, mut edge: EdgeDocument) -> Option<String> {
        let key = match edge.key() {
            Some(key) => key.to_string(),
            None => self.generate_key(),
        };
        if self.edges.contains_key(&key) {
            return None;
        }
        edge.set_key(key.clone());
        self.index(&key, &edge);
        self.edges.insert(key.clone(), edge);
        Some(key)
    }

    /// Replaces the edge stored under `key`, keeping the key.
    ///
    /// Returns the previous document, or `None` if no edge has that key.
    pub fn replace(&mut self, key: &str, mut edge: EdgeDocument) -> Option<EdgeDocument> {
        let previous = self.edges.get(key)?.clone();
        self.unindex(key, &previous);
        edge.set_key(key.to_string());
        self.index(key, &edge);
        self.edges.insert(key.to_string(), edge);
        Some(previous)
    }

    /// Removes an edge by key, cleaning up both vertex indexes.
    pub fn remove(&mut self, key: &str) -> Option<EdgeDocument> {
        let edge = self.edges.shift_remove(key)?;
        self.unindex(key, &edge);
        Some(edge)
    }

    /// Gets an edge by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EdgeDocument> {
        self.edges.get(key)
    }

    /// Returns the total number of edges in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the store holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over all edges in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeDocument> {
        self.edges.values()
    }

    /// Gets all edges leaving a vertex.
    #[must_use]
    pub fn outgoing(&self, vertex_id: &str) -> Vec<&EdgeDocument> {
        Self::lookup(&self.outgoing, &self.edges, vertex_id)
    }

    /// Gets all edges arriving at a vertex.
    #[must_use]
    pub fn incoming(&self, vertex_id: &str) -> Vec<&EdgeDocument> {
        Self::lookup(&self.incoming, &self.edges, vertex_id)
    }

    /// Returns the vertices adjacent to `vertex_id`, without duplicates.
    #[must_use]
    pub fn neighbors(&self, vertex_id: &str, direction: Direction) -> Vec<String> {
        let mut seen = indexmap::IndexSet::new();
        if matches!(direction, Direction::Outbound | Direction::Any) {
            for edge in self.outgoing(vertex_id) {
                seen.insert(edge.to().to_string());
            }
        }
        if matches!(direction, Direction::Inbound | Direction::Any) {
            for edge in self.incoming(vertex_id) {
                seen.insert(edge.from().to_string());
            }
        }
        seen.into_iter().collect()
    }

    fn lookup<'a>(
        index: &HashMap<String, Vec<String>>,
        edges: &'a IndexMap<String, EdgeDocument>,
        vertex_id: &str,
    ) -> Vec<&'a EdgeDocument> {
        index
            .get(vertex_id)
            .map(|keys| keys.iter().filter_map(|k| edges.get(k)).collect())
            .unwrap_or_default()
    }

    fn generate_key(&mut self) -> String {
        loop {
            self.next_key += 1;
            let key = self.next_key.to_string();
            if !self.edges.contains_key(&key) {
                return key;
            }
        }
    }

    fn index(&mut self, key: &str, edge: &EdgeDocument) {
        self.outgoing
            .entry(edge.from().to_string())
            .or_default()
            .push(key.to_string());
        self.incoming
            .entry(edge.to().to_string())
            .or_default()
            .push(key.to_string());
    }

    fn unindex(&mut self, key: &str, edge: &EdgeDocument) {
        if let Some(keys) = self.outgoing.get_mut(edge.from()) {
            keys.retain(|k| k != key);
        }
        if let Some(keys) = self.incoming.get_mut(edge.to()) {
            keys.retain(|k| k != key);
        }
    }
}
