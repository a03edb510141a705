//! Alias chain resolution over host variables.

use std::collections::HashSet;

use thiserror::Error;
use tokenweave_core::{Variable, VariableValue};

use crate::context::ResolutionContext;
use crate::graph::VariableGraph;

/// Sentinel rendered for an alias whose target does not exist.
pub const UNRESOLVED_ALIAS: &str = "/* unresolved alias */";
/// Sentinel rendered for a chain that loops or runs too deep.
pub const CIRCULAR_REFERENCE: &str = "/* circular reference */";

/// Why an alias chain did not reach a value. Rendered in place, never thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveIssue {
    #[error("/* unresolved alias */")]
    UnresolvedAlias,

    #[error("/* circular reference */")]
    CircularReference,
}

impl ResolveIssue {
    pub fn sentinel(&self) -> &'static str {
        match self {
            ResolveIssue::UnresolvedAlias => UNRESOLVED_ALIAS,
            ResolveIssue::CircularReference => CIRCULAR_REFERENCE,
        }
    }
}

/// The end of an alias chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// The variable holding the direct value.
    pub variable: &'a Variable,
    /// The mode the value was read from.
    pub mode_id: String,
    pub value: &'a VariableValue,
    /// Number of alias hops taken.
    pub hops: usize,
}

/// Follow `variable`'s value for `mode_id` through aliases to a direct value.
///
/// Revisiting a variable or exceeding `ctx.max_depth` hops yields
/// [`ResolveIssue::CircularReference`]; a missing target or a missing mode
/// value yields [`ResolveIssue::UnresolvedAlias`].
pub fn resolve_alias<'a>(
    graph: &VariableGraph<'a>,
    variable: &'a Variable,
    mode_id: &str,
    ctx: &ResolutionContext,
) -> Result<Resolved<'a>, ResolveIssue> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = variable;
    let mut mode = mode_id.to_string();

    for hops in 0..=ctx.max_depth {
        if !visited.insert(current.id.as_str()) {
            return Err(ResolveIssue::CircularReference);
        }
        let value = current
            .value_for_mode(&mode)
            .ok_or(ResolveIssue::UnresolvedAlias)?;

        let VariableValue::Alias(alias) = value else {
            return Ok(Resolved {
                variable: current,
                mode_id: mode,
                value,
                hops,
            });
        };
        let target = graph
            .variable(&alias.id)
            .ok_or(ResolveIssue::UnresolvedAlias)?;
        mode = graph
            .map_mode(graph.collection_of(current), &mode, target)
            .ok_or(ResolveIssue::UnresolvedAlias)?;
        current = target;
    }

    Err(ResolveIssue::CircularReference)
}
