//! `EdgeMap` Configuration Module
//!
//! Provides configuration file support via `edgemap.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (API)
//! 2. Environment variables (`EDGEMAP_*`)
//! 3. Configuration file (`edgemap.toml`)
//! 4. Default values
//!
//! Edge models can be declared in the file and are registered at startup by
//! [`EdgeCollectionRegistry::from_config`](crate::EdgeCollectionRegistry::from_config):
//!
//! ```toml
//! [registration]
//! on_conflict = "skip"
//!
//! [[models]]
//! name = "Follows"
//! from = "users"
//! to = ["users", "teams"]
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::model::EdgeModelDescriptor;
use crate::naming::DEFAULT_COLLECTION_SUFFIX;

/// Graph name used when none is configured.
pub const DEFAULT_GRAPH_NAME: &str = "edgemap";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Naming convention section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Suffix appended to the pluralized model name to form the edge
    /// collection type name.
    pub collection_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            collection_suffix: DEFAULT_COLLECTION_SUFFIX.to_string(),
        }
    }
}

/// Graph section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Graph name.
    pub name: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_GRAPH_NAME.to_string(),
        }
    }
}

/// What to do when the graph already holds a different edge definition for
/// a collection being registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Abort the definition with `Error::Registration`.
    #[default]
    Error,
    /// Log a warning and keep the existing definition.
    Skip,
}

/// Registration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Conflict handling for edge definitions.
    pub on_conflict: ConflictPolicy,
}

/// Logging configuration section.
///
/// The library never installs a subscriber; applications feed
/// [`directive`](Self::directive) to their `EnvFilter` as the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Returns a filter directive scoping the configured level to this crate,
    /// e.g. `edgemap_core=debug`.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.level)
    }
}

/// Main `EdgeMap` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EdgeMapConfig {
    /// Naming convention configuration.
    pub naming: NamingConfig,
    /// Graph configuration.
    pub graph: GraphConfig,
    /// Registration configuration.
    pub registration: RegistrationConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Edge models registered at startup.
    pub models: Vec<EdgeModelDescriptor>,
}

impl EdgeMapConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("edgemap.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file falls back to defaults and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("EDGEMAP_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.naming.collection_suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "naming.collection_suffix".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.graph.name.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "graph.name".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let mut seen = HashSet::new();
        for model in &self.models {
            if model.name().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "models.name".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            if !seen.insert(model.name()) {
                return Err(ConfigError::InvalidValue {
                    key: "models.name".to_string(),
                    message: format!("model '{}' declared twice", model.name()),
                });
            }
            if model.from().to_vec().is_empty() || model.to().to_vec().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("models.{}", model.name()),
                    message: "from and to must name at least one collection".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
