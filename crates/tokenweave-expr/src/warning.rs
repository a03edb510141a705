//! Soft failures reported by expression evaluation.

use thiserror::Error;

/// A problem found while evaluating an expression.
///
/// Warnings never abort a conversion; callers fall back to the direct value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprWarning {
    #[error("Variable '{0}' not found")]
    MissingVariable(String),

    #[error("Variable '{name}' is not numeric (found {found})")]
    NonNumeric { name: String, found: String },

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Division by zero")]
    DivisionByZero,
}

impl ExprWarning {
    pub fn is_syntax(&self) -> bool {
        matches!(self, ExprWarning::Syntax(_))
    }
}
