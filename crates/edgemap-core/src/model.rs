//! Edge model descriptors.
//!
//! An edge model is an application type describing a graph edge: its name
//! and the vertex collections it connects. Static types describe themselves
//! through [`EdgeModel`]; the registry works with the runtime
//! [`EdgeModelDescriptor`].

use serde::{Deserialize, Serialize};

/// One or more vertex collection identifiers on one side of an edge.
///
/// Deserializes from either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoints {
    /// A single vertex collection.
    One(String),
    /// Several vertex collections.
    Many(Vec<String>),
}

impl Endpoints {
    /// Creates a single-collection endpoint.
    #[must_use]
    pub fn one(collection: &str) -> Self {
        Self::One(collection.to_string())
    }

    /// Creates a multi-collection endpoint.
    #[must_use]
    pub fn many<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(collections.into_iter().map(Into::into).collect())
    }

    /// Returns the collections as a sequence, wrapping a single endpoint.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(collection) => vec![collection.clone()],
            Self::Many(collections) => collections.clone(),
        }
    }

    /// Returns true if `collection` is one of these endpoints.
    #[must_use]
    pub fn contains(&self, collection: &str) -> bool {
        match self {
            Self::One(c) => c == collection,
            Self::Many(cs) => cs.iter().any(|c| c == collection),
        }
    }
}

impl From<&str> for Endpoints {
    fn from(collection: &str) -> Self {
        Self::one(collection)
    }
}

impl From<Vec<String>> for Endpoints {
    fn from(collections: Vec<String>) -> Self {
        Self::Many(collections)
    }
}

impl<const N: usize> From<[&str; N]> for Endpoints {
    fn from(collections: [&str; N]) -> Self {
        Self::many(collections)
    }
}

/// Runtime description of an edge model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeModelDescriptor {
    name: String,
    from: Endpoints,
    to: Endpoints,
}

impl EdgeModelDescriptor {
    /// Creates a descriptor from a model name and its endpoints.
    #[must_use]
    pub fn new(name: &str, from: impl Into<Endpoints>, to: impl Into<Endpoints>) -> Self {
        Self {
            name: name.to_string(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Builds the descriptor of a static edge model type.
    #[must_use]
    pub fn of<M: EdgeModel>() -> Self {
        Self {
            name: M::NAME.to_string(),
            from: <M as EdgeModel>::from(),
            to: <M as EdgeModel>::to(),
        }
    }

    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source collections as declared.
    #[must_use]
    pub fn from(&self) -> &Endpoints {
        &self.from
    }

    /// Returns the destination collections as declared.
    #[must_use]
    pub fn to(&self) -> &Endpoints {
        &self.to
    }
}

/// Implemented by application types that represent graph edges.
///
/// ```rust,ignore
/// struct Follows;
///
/// impl EdgeModel for Follows {
///     const NAME: &'static str = "Follows";
///     fn from() -> Endpoints { Endpoints::one("users") }
///     fn to() -> Endpoints { Endpoints::many(["users", "teams"]) }
/// }
/// ```
pub trait EdgeModel {
    /// Model name used for convention-based derivation.
    const NAME: &'static str;

    /// Source vertex collections.
    fn from() -> Endpoints;

    /// Destination vertex collections.
    fn to() -> Endpoints;

    /// Returns this model's runtime descriptor.
    #[must_use]
    fn descriptor() -> EdgeModelDescriptor
    where
        Self: Sized,
    {
        EdgeModelDescriptor::of::<Self>()
    }
}
