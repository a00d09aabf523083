//! Domain error types for tfcompat.
//!
//! These errors describe failures of the two core operations: rewriting
//! source files and resolving legacy names against an API surface.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while patching source files.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while resolving names on an API surface.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("'{namespace}' has no attribute '{name}'")]
    MissingAttribute { namespace: String, name: String },

    #[error("'{path}' is not a module")]
    NotAModule { path: String },
}

impl ResolveError {
    pub fn missing(namespace: &str, name: &str) -> Self {
        Self::MissingAttribute {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}

/// Errors raised while loading an API surface manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}
