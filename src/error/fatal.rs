//! Programming and configuration errors.
//!
//! These never describe bad input. They surface bugs in constraint or schema
//! authoring and abort the validation run instead of becoming messages.

use std::path::PathBuf;

use crate::message::Locale;
use crate::registry::RegistryError;

/// A fatal error raised while running a validation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No bundle, user or built-in, defines the message key.
    #[error("can't find message resource '{key}' for locale '{locale}'")]
    MissingResource { key: String, locale: Locale },

    /// A schema reference could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Lazy or named schema references nested deeper than allowed.
    #[error("maximum reference depth {max_depth} exceeded at path '{path}'")]
    DepthExceeded { max_depth: usize, path: String },

    /// A constraint implementation failed internally.
    #[error("constraint '{constraint_id}' failed: {reason}")]
    Constraint { constraint_id: String, reason: String },

    /// A message bundle file or directory could not be read.
    #[error("failed to read message bundles from '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates an internal constraint failure.
    pub fn constraint(constraint_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Constraint {
            constraint_id: constraint_id.into(),
            reason: reason.into(),
        }
    }
}
