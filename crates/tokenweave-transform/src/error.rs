//! Errors for unit and color-format names.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("unknown color format '{0}'")]
    UnknownColorFormat(String),
}
