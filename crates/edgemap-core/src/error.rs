//! Error types for `EdgeMap`.
//!
//! This module provides a unified error type for edge-collection resolution
//! and graph registration. Every failure in this crate happens while the
//! application is wiring its models, so errors are meant to abort startup
//! rather than be logged and ignored.

use thiserror::Error;

/// Result type alias for `EdgeMap` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `EdgeMap` operations.
///
/// Error codes follow the pattern `EDGEMAP-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Edge collection type does not map to a known edge model (EDGEMAP-001).
    #[error("[EDGEMAP-001] Cannot resolve edge model for '{type_name}': {reason}")]
    Resolution {
        /// Name of the edge collection type being defined.
        type_name: String,
        /// Why resolution failed.
        reason: String,
    },

    /// Graph rejected an edge definition (EDGEMAP-002).
    #[error("[EDGEMAP-002] Graph rejected edge definition for '{collection}': {reason}")]
    Registration {
        /// Edge collection name.
        collection: String,
        /// Rejection reason reported by the graph.
        reason: String,
    },

    /// Edge collection type already defined (EDGEMAP-003).
    #[error("[EDGEMAP-003] Edge collection type '{0}' already defined")]
    CollectionExists(String),

    /// Edge collection not found (EDGEMAP-004).
    #[error("[EDGEMAP-004] Edge collection '{0}' not found")]
    CollectionNotFound(String),

    /// A different edge model is already registered under this name (EDGEMAP-005).
    #[error("[EDGEMAP-005] Edge model '{0}' already registered with different endpoints")]
    ModelConflict(String),

    /// Name cannot be used for convention-based derivation (EDGEMAP-006).
    #[error("[EDGEMAP-006] Invalid name: {0}")]
    InvalidName(String),

    /// Edge document endpoint does not belong to the model's collections (EDGEMAP-007).
    #[error("[EDGEMAP-007] Edge endpoint '{vertex}' not allowed in '{collection}', expected one of {allowed:?}")]
    EndpointMismatch {
        /// Edge collection name.
        collection: String,
        /// Offending vertex id.
        vertex: String,
        /// Collections accepted for that endpoint.
        allowed: Vec<String>,
    },

    /// Edge document not found (EDGEMAP-008).
    #[error("[EDGEMAP-008] Document '{key}' not found in '{collection}'")]
    DocumentNotFound {
        /// Edge collection name.
        collection: String,
        /// Document key.
        key: String,
    },

    /// Edge document key already taken (EDGEMAP-009).
    #[error("[EDGEMAP-009] Document '{key}' already exists in '{collection}'")]
    DocumentExists {
        /// Edge collection name.
        collection: String,
        /// Document key.
        key: String,
    },

    /// Configuration error (EDGEMAP-010).
    #[error("[EDGEMAP-010] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "EDGEMAP-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Resolution { .. } => "EDGEMAP-001",
            Self::Registration { .. } => "EDGEMAP-002",
            Self::CollectionExists(_) => "EDGEMAP-003",
            Self::CollectionNotFound(_) => "EDGEMAP-004",
            Self::ModelConflict(_) => "EDGEMAP-005",
            Self::InvalidName(_) => "EDGEMAP-006",
            Self::EndpointMismatch { .. } => "EDGEMAP-007",
            Self::DocumentNotFound { .. } => "EDGEMAP-008",
            Self::DocumentExists { .. } => "EDGEMAP-009",
            Self::Config(_) => "EDGEMAP-010",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// Resolution and registration failures are configuration errors: the
    /// model/graph mapping is inconsistent and the application must not start.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::Resolution { .. } | Self::Registration { .. } | Self::Config(_)
        )
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
