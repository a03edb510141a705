//! Top-level error type.

use thiserror::Error;
use tokenweave_core::SettingsError;
use tokenweave_dtcg::SerializeError;
use tokenweave_export::ExportError;

/// Result type alias for the facade.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The host snapshot could not be read.
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// Unknown output format name.
    #[error("Unknown output format '{0}'")]
    UnknownFormat(String),
}

/// Failures while loading a host snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Variable '{variable}' belongs to unknown collection '{collection}'")]
    UnknownCollection { variable: String, collection: String },
}
