//! Error types for conversion.

use thiserror::Error;
use tokenweave_core::ResolveError;

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Hard failures while converting a document.
///
/// Unresolved or circular references are not errors; they render as
/// sentinel comments in the output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A reference matched tokens in more than one collection.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
