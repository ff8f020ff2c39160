//! Error types for the store and the resolution pass.
//!
//! Two families are kept apart:
//!
//! - [`StoreError`]: configuration errors raised while loading locale resources.
//!   These are fatal at startup.
//! - [`ResolveError`]: failures of a single resolution pass. They abort the pass
//!   (no partial output) but never the process.
//!
//! Soft misses (a key absent from the store, an unknown `%{placeholder}`, an array
//! index out of range) are not errors and never surface here.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{BindingId, GraphPath, LocaleKey};

/// Errors raised while loading a [`LocaleStore`](crate::core::LocaleStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// `load` was called without any search directories.
    #[error("no locale resource search paths were supplied")]
    NoSearchPaths,

    /// A search directory does not exist or is not a directory.
    #[error("locale resource directory '{}' does not exist or is not a directory", .0.display())]
    MissingDirectory(PathBuf),

    /// A resource file could not be read.
    #[error("failed to read locale resource '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A resource file is not valid YAML, or its shape is not `locale -> mapping`.
    #[error("failed to parse locale resource '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A leaf value has a shape the store cannot hold (mixed or empty array).
    #[error("unsupported value at '{key}' in '{}': {message}", path.display())]
    Type {
        path: PathBuf,
        key: String,
        message: String,
    },

    /// A resource file pattern is not a valid glob.
    #[error("invalid resource file pattern \"{pattern}\": {message}")]
    Pattern { pattern: String, message: String },
}

/// Errors that abort a resolution pass.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A pending value was read without going through a resolution pass.
    #[error("value '{id}' is not yet resolved; it must pass through a resolution pass first")]
    Unbound { id: String },

    /// A store value could not be interpreted as the kind the caller asked for.
    #[error("unknown localization type for '{key}': expected {expected}, found {found}")]
    UnknownLocalizationType {
        key: LocaleKey,
        expected: &'static str,
        found: &'static str,
    },

    /// A bound field id is missing from every property-name frame of the pass.
    /// The model's `property_names` table is out of sync with its fields.
    #[error("no property name is registered for binding {id} (while resolving {type_name})")]
    UnboundProperty { id: BindingId, type_name: String },

    /// A bound field was resolved outside any model scope.
    #[error("binding {id} was resolved outside of a model scope")]
    NoModelScope { id: BindingId },

    /// No model of the expected type is registered at or above a graph path.
    #[error("no {type_name} instance is registered at or above path '{path}'")]
    ModelNotFound { type_name: String, path: GraphPath },

    /// An explicit date pattern contains an invalid specifier.
    #[error("invalid date pattern \"{pattern}\"")]
    InvalidDatePattern { pattern: String },

    /// The resolved model could not be encoded or decoded.
    #[error("failed to encode or decode resolved model: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ResolveError {
    /// Whether this error means the model's metadata disagrees with its fields,
    /// as opposed to a plain runtime failure.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ResolveError::UnboundProperty { .. }
                | ResolveError::NoModelScope { .. }
                | ResolveError::ModelNotFound { .. }
                | ResolveError::UnknownLocalizationType { .. }
        )
    }
}
