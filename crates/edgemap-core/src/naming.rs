//! Naming conventions linking edge models, edge collection types and
//! storage collection names.
//!
//! ```text
//! model        AmazingEdge
//! type name    AmazingEdgesCollection   (pluralize + suffix)
//! collection   amazing_edges            (strip suffix + snake_case)
//! ```
//!
//! All derivations are total over non-empty names.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default suffix appended to the pluralized model name.
pub const DEFAULT_COLLECTION_SUFFIX: &str = "Collection";

/// String transforms used for convention-based resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_COLLECTION_SUFFIX.to_string(),
        }
    }
}

impl NamingConvention {
    /// Creates a convention with a custom type-name suffix.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidName` if the suffix is empty.
    pub fn with_suffix(suffix: &str) -> Result<Self> {
        if suffix.is_empty() {
            return Err(Error::InvalidName(
                "collection suffix must not be empty".to_string(),
            ));
        }
        Ok(Self {
            suffix: suffix.to_string(),
        })
    }

    /// Returns the type-name suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Derives the edge collection type name for a model name.
    ///
    /// `MyEdge` becomes `MyEdgesCollection`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidName` if `model_name` is empty.
    pub fn collection_type_name(&self, model_name: &str) -> Result<String> {
        if model_name.is_empty() {
            return Err(Error::InvalidName("edge model name is empty".to_string()));
        }
        Ok(format!("{}{}", pluralize(model_name), self.suffix))
    }

    /// Strips the suffix from a type name, returning the (plural) stem.
    ///
    /// Returns `None` when the name does not carry the suffix or nothing is
    /// left once it is removed.
    #[must_use]
    pub fn stem<'a>(&self, type_name: &'a str) -> Option<&'a str> {
        type_name
            .strip_suffix(self.suffix.as_str())
            .filter(|stem| !stem.is_empty())
    }

    /// Derives the storage collection name from a type name.
    ///
    /// `SomeEdgesCollection` becomes `some_edges`. A name without the suffix
    /// is snake-cased as a whole.
    #[must_use]
    pub fn collection_name(&self, type_name: &str) -> String {
        snake_case(self.stem(type_name).unwrap_or(type_name))
    }
}

/// Pluralizes the last word of an identifier using regular English rules.
#[must_use]
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|ending| lower.ends_with(ending))
    {
        return format!("{word}es");
    }

    let mut chars = lower.chars().rev();
    if let (Some('y'), Some(before)) = (chars.next(), chars.next()) {
        if !"aeiou".contains(before) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    format!("{word}s")
}

/// Converts a CamelCase identifier to snake_case.
///
/// Acronyms stay together: `HTTPEdges` becomes `http_edges`.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out
}
