//! Calc directive evaluation over host variables.
//!
//! A numeric variable whose description carries `calc: <expr>` takes the
//! value of that expression. References in the expression are resolved to
//! numbers (following aliases, evaluating their own expressions) before the
//! evaluator runs. Any warning means the variable keeps its direct value.

use tokenweave_core::{
    parse_description, ResolveError, TokenConfig, Unit, Variable, VariableCollection,
    VariableValue,
};
use tokenweave_expr::{
    evaluate, extract_references, ContextValue, EvalContext, EvalResult, ExprWarning,
    ReferenceSyntax,
};

use crate::alias::{resolve_alias, ResolveIssue};
use crate::context::ResolutionContext;
use crate::graph::VariableGraph;

/// A resolved number and the unit it should be written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericValue {
    pub value: f64,
    pub unit: Unit,
}

/// Outcome of evaluating a variable's expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The expression produced a value.
    Value(NumericValue),
    /// The expression failed; the caller keeps the direct value.
    Fallback { warnings: Vec<ExprWarning> },
}

enum Lookup {
    Issue(ResolveIssue),
    NonNumeric(&'static str),
}

struct Evaluator<'g, 'a> {
    graph: &'g VariableGraph<'a>,
    ctx: &'g ResolutionContext,
    stack: Vec<&'a str>,
}

/// Evaluate the expression in `config` for `variable` under `mode_id`.
///
/// Returns `None` when there is no expression or the variable is not numeric.
/// Ambiguous references are the only hard error.
pub fn evaluate_variable<'a>(
    graph: &VariableGraph<'a>,
    variable: &'a Variable,
    mode_id: &str,
    config: &TokenConfig,
    ctx: &ResolutionContext,
) -> Result<Option<Evaluation>, ResolveError> {
    let Some(expression) = config.expression.as_deref() else {
        return Ok(None);
    };
    if !variable.resolved_type.is_numeric() {
        return Ok(None);
    }

    let mut evaluator = Evaluator {
        graph,
        ctx,
        stack: vec![variable.id.as_str()],
    };
    let result = evaluator.eval(expression, graph.collection_of(variable), mode_id)?;

    Ok(Some(match result.value {
        Some(value) if result.warnings.is_empty() => Evaluation::Value(NumericValue {
            value,
            unit: effective_unit(result.unit, config.unit),
        }),
        _ => Evaluation::Fallback {
            warnings: result.warnings,
        },
    }))
}

/// The inferred unit wins unless it is the `px` default.
fn effective_unit(inferred: Unit, configured: Unit) -> Unit {
    if inferred == Unit::Px {
        configured
    } else {
        inferred
    }
}

impl<'g, 'a> Evaluator<'g, 'a> {
    fn eval(
        &mut self,
        expression: &str,
        from: Option<&'a VariableCollection>,
        mode_id: &str,
    ) -> Result<EvalResult, ResolveError> {
        let mut context = EvalContext::new();
        let mut non_numeric = Vec::new();

        for reference in extract_references(expression) {
            if context.contains_key(&reference.key) {
                continue;
            }
            let target = match reference.syntax {
                ReferenceSyntax::Path => self.graph.find_by_path(&reference.key)?,
                ReferenceSyntax::CssVar => self.graph.find_by_css_name(&reference.key)?,
            };
            // Unknown references are reported by the evaluator
            let Some(target) = target else { continue };
            let Some(target_mode) = self.graph.map_mode(from, mode_id, target) else {
                continue;
            };
            match self.number(target, &target_mode)? {
                Ok(n) => {
                    context.insert(reference.key, ContextValue::new(n.value, n.unit));
                }
                Err(Lookup::NonNumeric(found)) => non_numeric.push(ExprWarning::NonNumeric {
                    name: reference.key,
                    found: found.to_string(),
                }),
                Err(Lookup::Issue(_)) => {}
            }
        }

        let mut result = evaluate(expression, &context);
        if !non_numeric.is_empty() {
            result.warnings.retain(|w| {
                !matches!(w, ExprWarning::MissingVariable(key)
                    if non_numeric.iter().any(|n| matches!(n, ExprWarning::NonNumeric { name, .. } if name == key)))
            });
            non_numeric.append(&mut result.warnings);
            result.warnings = non_numeric;
            result.value = None;
        }
        Ok(result)
    }

    /// The number a referenced variable stands for.
    fn number(
        &mut self,
        variable: &'a Variable,
        mode_id: &str,
    ) -> Result<Result<NumericValue, Lookup>, ResolveError> {
        if !variable.resolved_type.is_numeric() {
            return Ok(Err(Lookup::NonNumeric(variable.resolved_type.as_str())));
        }
        if self.stack.len() > self.ctx.max_depth || self.stack.contains(&variable.id.as_str()) {
            return Ok(Err(Lookup::Issue(ResolveIssue::CircularReference)));
        }

        let directives = parse_description(&variable.description).directives;
        let unit = directives.unit.unwrap_or(self.ctx.defaults.unit);

        self.stack.push(variable.id.as_str());
        let evaluated = match directives.expression.as_deref() {
            Some(expression) => {
                let result = self.eval(expression, self.graph.collection_of(variable), mode_id);
                match result {
                    Ok(EvalResult { value: Some(value), unit: inferred, warnings }) if warnings.is_empty() => {
                        Some(NumericValue {
                            value,
                            unit: effective_unit(inferred, unit),
                        })
                    }
                    Ok(_) => None,
                    Err(e) => {
                        self.stack.pop();
                        return Err(e);
                    }
                }
            }
            None => None,
        };
        self.stack.pop();

        if let Some(n) = evaluated {
            return Ok(Ok(n));
        }
        Ok(self.direct_number(variable, mode_id, unit))
    }

    fn direct_number(&self, variable: &'a Variable, mode_id: &str, unit: Unit) -> Result<NumericValue, Lookup> {
        let resolved = resolve_alias(self.graph, variable, mode_id, self.ctx).map_err(Lookup::Issue)?;
        match resolved.value {
            VariableValue::Float(value) => Ok(NumericValue { value: *value, unit }),
            _ => Err(Lookup::NonNumeric(resolved.variable.resolved_type.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::*;
    use tokenweave_core::{ResolvedType, VariableCollection};

    fn with_description(mut variable: Variable, description: &str) -> Variable {
        variable.description = description.to_string();
        variable
    }

    fn collections() -> Vec<VariableCollection> {
        vec![
            collection("c1", "Spacing", &[("m1", "Default")]),
            collection("c2", "Typography", &[("m2", "Default")]),
        ]
    }

    fn config_for(variable: &Variable) -> TokenConfig {
        TokenConfig::default().merge(&parse_description(&variable.description).directives)
    }

    fn run(variables: &[Variable], collections: &[VariableCollection], index: usize) -> Result<Option<Evaluation>, ResolveError> {
        let graph = VariableGraph::new(variables, collections);
        let variable = &variables[index];
        evaluate_variable(&graph, variable, "m1", &config_for(variable), &ResolutionContext::default())
    }

    #[test]
    fn test_expression_value() {
        let collections = collections();
        let variables = vec![
            number("v1", "spacing/base", "c1", "m1", 8.0),
            with_description(number("v2", "spacing/lg", "c1", "m1", 0.0), "calc: 'Spacing/base' * 2"),
        ];
        assert_eq!(
            run(&variables, &collections, 1).unwrap(),
            Some(Evaluation::Value(NumericValue { value: 16.0, unit: Unit::Px }))
        );
    }

    #[test]
    fn test_unit_from_referenced_variable() {
        let collections = collections();
        let variables = vec![
            with_description(number("v1", "spacing/base", "c1", "m1", 16.0), "unit: rem"),
            with_description(number("v2", "spacing/lg", "c1", "m1", 0.0), "calc: var(--spacing-base) * 1.5"),
        ];
        assert_eq!(
            run(&variables, &collections, 1).unwrap(),
            Some(Evaluation::Value(NumericValue { value: 24.0, unit: Unit::Rem }))
        );
    }

    #[test]
    fn test_nested_expressions() {
        let collections = collections();
        let variables = vec![
            number("v1", "spacing/base", "c1", "m1", 4.0),
            with_description(number("v2", "spacing/md", "c1", "m1", 0.0), "calc: 'spacing/base' * 2"),
            with_description(number("v3", "spacing/lg", "c1", "m1", 0.0), "calc: 'spacing/md' + 1"),
        ];
        assert_eq!(
            run(&variables, &collections, 2).unwrap(),
            Some(Evaluation::Value(NumericValue { value: 9.0, unit: Unit::Px }))
        );
    }

    #[test]
    fn test_non_numeric_reference_falls_back() {
        let collections = collections();
        let variables = vec![
            variable("v1", "font/family", "c1", ResolvedType::String, &[("m1", VariableValue::String("Inter".into()))]),
            with_description(number("v2", "spacing/lg", "c1", "m1", 12.0), "calc: 'font/family' * 2"),
        ];
        let Some(Evaluation::Fallback { warnings }) = run(&variables, &collections, 1).unwrap() else {
            panic!("expected fallback");
        };
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().contains("is not numeric"));
    }

    #[test]
    fn test_missing_reference_falls_back() {
        let collections = collections();
        let variables = vec![with_description(number("v1", "spacing/lg", "c1", "m1", 12.0), "calc: 'nope' * 2")];
        assert_eq!(
            run(&variables, &collections, 0).unwrap(),
            Some(Evaluation::Fallback {
                warnings: vec![ExprWarning::MissingVariable("nope".to_string())]
            })
        );
    }

    #[test]
    fn test_self_reference_falls_back() {
        let collections = collections();
        let variables = vec![with_description(number("v1", "spacing/lg", "c1", "m1", 12.0), "calc: 'spacing/lg' * 2")];
        assert!(matches!(run(&variables, &collections, 0).unwrap(), Some(Evaluation::Fallback { .. })));
    }

    #[test]
    fn test_ambiguous_reference_is_error() {
        let collections = collections();
        let variables = vec![
            number("v1", "base", "c1", "m1", 8.0),
            number("v2", "base", "c2", "m2", 16.0),
            with_description(number("v3", "spacing/lg", "c1", "m1", 0.0), "calc: 'base' * 2"),
        ];
        assert!(matches!(run(&variables, &collections, 2), Err(ResolveError::AmbiguousPath { .. })));
    }

    #[test]
    fn test_no_expression() {
        let collections = collections();
        let variables = vec![number("v1", "spacing/base", "c1", "m1", 8.0)];
        assert_eq!(run(&variables, &collections, 0).unwrap(), None);
    }
}
