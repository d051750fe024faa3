//! Generic collection operations.
//!
//! [`Collection`] is the capability set every collection exposes regardless
//! of whether it holds edges. Edge collections compose a [`CollectionHandle`]
//! and add their edge-specific surface on top.

use crate::error::{Error, Result};
use crate::graph::{EdgeDocument, RawEdgeCollection};

/// Document CRUD shared by all collections.
pub trait Collection {
    /// Document type stored in the collection.
    type Document;

    /// Returns the collection name.
    fn name(&self) -> &str;

    /// Fetches a document by key.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentNotFound` if no document has this key.
    fn get(&self, key: &str) -> Result<Self::Document>;

    /// Stores a new document and returns its key.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentExists` if the document's key is taken.
    fn insert(&self, document: Self::Document) -> Result<String>;

    /// Replaces the document stored under `key`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentNotFound` if no document has this key.
    fn replace(&self, key: &str, document: Self::Document) -> Result<Self::Document>;

    /// Removes a document by key, returning it.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentNotFound` if no document has this key.
    fn remove(&self, key: &str) -> Result<Self::Document>;

    /// Returns the number of stored documents.
    fn count(&self) -> usize;

    /// Returns all documents in insertion order.
    fn all(&self) -> Vec<Self::Document>;

    /// Returns true if a document with this key exists.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }
}

/// Generic collection over a raw edge collection handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    raw: RawEdgeCollection,
}

impl CollectionHandle {
    /// Wraps a raw storage handle.
    #[must_use]
    pub fn new(raw: RawEdgeCollection) -> Self {
        Self { raw }
    }

    /// Returns the underlying raw handle.
    #[must_use]
    pub fn raw(&self) -> &RawEdgeCollection {
        &self.raw
    }

    fn not_found(&self, key: &str) -> Error {
        Error::DocumentNotFound {
            collection: self.raw.name().to_string(),
            key: key.to_string(),
        }
    }
}

impl Collection for CollectionHandle {
    type Document = EdgeDocument;

    fn name(&self) -> &str {
        self.raw.name()
    }

    fn get(&self, key: &str) -> Result<EdgeDocument> {
        self.raw
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| self.not_found(key))
    }

    fn insert(&self, document: EdgeDocument) -> Result<String> {
        let requested = document.key().map(str::to_string);
        self.raw
            .write()
            .insert(document)
            .ok_or_else(|| Error::DocumentExists {
                collection: self.raw.name().to_string(),
                key: requested.unwrap_or_default(),
            })
    }

    fn replace(&self, key: &str, document: EdgeDocument) -> Result<EdgeDocument> {
        self.raw
            .write()
            .replace(key, document)
            .ok_or_else(|| self.not_found(key))
    }

    fn remove(&self, key: &str) -> Result<EdgeDocument> {
        self.raw
            .write()
            .remove(key)
            .ok_or_else(|| self.not_found(key))
    }

    fn count(&self) -> usize {
        self.raw.read().len()
    }

    fn all(&self) -> Vec<EdgeDocument> {
        self.raw.read().iter().cloned().collect()
    }
}
