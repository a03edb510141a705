//! Error types shared across the tokenweave crates.

use thiserror::Error;

/// Failures while looking up variables or tokens by path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Ambiguous reference '{path}': matches variables in collections {}", .collections.join(", "))]
    AmbiguousPath {
        path: String,
        collections: Vec<String>,
    },
}

/// Failures while building a token tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Cannot insert token at '{path}': {reason}")]
    PathConflict { path: String, reason: String },

    #[error("Cannot insert token with an empty path")]
    EmptyPath,
}

/// Failures while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
