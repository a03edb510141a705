//! Arithmetic expressions for calc directives.
//!
//! The language covers `+ - * /`, parentheses, unary minus, numeric
//! literals and `round`, `floor`, `ceil`, `min`, `max`, `abs`. References
//! are extracted and replaced with identifiers before parsing, so the
//! grammar is independent of how a caller spells them.

pub mod ast;
pub mod eval;
pub mod grammar;
pub mod lexer;
pub mod references;
pub mod warning;

pub use ast::{BinaryOp, Expr, Function};
pub use eval::{evaluate, infer_unit, ContextValue, EvalContext, EvalResult};
pub use grammar::parse;
pub use references::{
    extract_references, rewrite_references, substitute, Reference, ReferenceSyntax, Substituted,
};
pub use warning::ExprWarning;
