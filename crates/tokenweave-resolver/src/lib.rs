//! Resolution for the tokenweave exporter.
//!
//! - [`resolve_alias`] follows alias chains over host variables with a
//!   depth bound and a visited set
//! - [`evaluate_variable`] evaluates calc directives with fallback
//! - [`DocumentResolver`] follows `$ref`s and remBase paths in a built document
//! - [`StyleResolver`] maps paint, text, effect and grid styles to tokens

pub mod alias;
pub mod context;
pub mod document;
pub mod expression;
pub mod graph;
pub mod styles;

pub use alias::{resolve_alias, ResolveIssue, Resolved, CIRCULAR_REFERENCE, UNRESOLVED_ALIAS};
pub use context::{ResolutionContext, DEFAULT_MAX_DEPTH};
pub use document::{DocumentResolver, ResolvedToken};
pub use expression::{evaluate_variable, Evaluation, NumericValue};
pub use graph::VariableGraph;
pub use styles::{font_weight, has_placeholder, placeholder, render_placeholders, Bindings, StyleResolver};
