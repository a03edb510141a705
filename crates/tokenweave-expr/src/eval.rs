//! Expression evaluation.

use std::collections::HashMap;

use indexmap::IndexMap;
use tokenweave_transform::Unit;

use crate::ast::{BinaryOp, Expr, Function};
use crate::grammar::parse;
use crate::references::substitute;
use crate::warning::ExprWarning;

/// The value a reference stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextValue {
    pub value: f64,
    pub unit: Unit,
}

impl ContextValue {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }
}

/// Reference key (quoted path or `--name`) to value.
pub type EvalContext = IndexMap<String, ContextValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    /// `None` when the expression could not be evaluated.
    pub value: Option<f64>,
    pub unit: Unit,
    pub warnings: Vec<ExprWarning>,
}

impl EvalResult {
    fn failed(unit: Unit, warnings: Vec<ExprWarning>) -> Self {
        Self {
            value: None,
            unit,
            warnings,
        }
    }

    /// A value with nothing to report.
    pub fn is_clean(&self) -> bool {
        self.value.is_some() && self.warnings.is_empty()
    }
}

/// First referenced unit that is not `px`, else `px`.
pub fn infer_unit<I: IntoIterator<Item = Unit>>(units: I) -> Unit {
    units
        .into_iter()
        .find(|unit| *unit != Unit::Px)
        .unwrap_or(Unit::Px)
}

/// Evaluate `expression` against `context`.
///
/// Every missing reference is reported before giving up. Division by zero
/// yields an infinite value plus a warning.
pub fn evaluate(expression: &str, context: &EvalContext) -> EvalResult {
    let substituted = substitute(expression);
    let unit = infer_unit(
        substituted
            .bindings
            .iter()
            .filter_map(|(_, key)| context.get(key))
            .map(|v| v.unit),
    );

    let ast = match parse(&substituted.expression) {
        Ok(ast) => ast,
        Err(message) => return EvalResult::failed(unit, vec![ExprWarning::Syntax(message)]),
    };

    let mut bindings = HashMap::new();
    let mut warnings = Vec::new();
    for (ident, key) in &substituted.bindings {
        match context.get(key) {
            Some(v) => {
                bindings.insert(ident.as_str(), v.value);
            }
            None => warnings.push(ExprWarning::MissingVariable(key.clone())),
        }
    }
    for ident in ast.identifiers() {
        if !substituted.bindings.iter().any(|(bound, _)| bound.as_str() == ident) {
            warnings.push(ExprWarning::MissingVariable(ident.to_string()));
        }
    }
    if !warnings.is_empty() {
        return EvalResult::failed(unit, warnings);
    }

    let mut evaluator = Evaluator {
        bindings: &bindings,
        warnings: Vec::new(),
    };
    let value = evaluator.eval(&ast);
    EvalResult {
        value: Some(value),
        unit,
        warnings: evaluator.warnings,
    }
}

struct Evaluator<'a> {
    bindings: &'a HashMap<&'a str, f64>,
    warnings: Vec<ExprWarning>,
}

impl Evaluator<'_> {
    fn eval(&mut self, expr: &Expr) -> f64 {
        match expr {
            Expr::Number(n) => *n,
            Expr::Ident(name) => self.bindings.get(name.as_str()).copied().unwrap_or(0.0),
            Expr::Neg(inner) => -self.eval(inner),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs);
                let rhs = self.eval(rhs);
                match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                    BinaryOp::Div => {
                        if rhs == 0.0 && !self.warnings.contains(&ExprWarning::DivisionByZero) {
                            self.warnings.push(ExprWarning::DivisionByZero);
                        }
                        lhs / rhs
                    }
                }
            }
            Expr::Call { function, args } => {
                let args: Vec<f64> = args.iter().map(|a| self.eval(a)).collect();
                let first = args.first().copied().unwrap_or(0.0);
                match function {
                    // Half-up, so round(-2.5) is -2
                    Function::Round => (first + 0.5).floor(),
                    Function::Floor => first.floor(),
                    Function::Ceil => first.ceil(),
                    Function::Abs => first.abs(),
                    Function::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
                    Function::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn context(entries: &[(&str, f64, Unit)]) -> EvalContext {
        entries
            .iter()
            .map(|(k, v, u)| (k.to_string(), ContextValue::new(*v, *u)))
            .collect()
    }

    #[test]
    fn test_precedence_with_references() {
        let ctx = context(&[("a", 2.0, Unit::Px), ("b", 3.0, Unit::Px)]);
        let result = evaluate("'a' + 'b' * 4", &ctx);
        assert_eq!(result.value, Some(14.0));
        assert_eq!(result.unit, Unit::Px);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_css_var_references() {
        let ctx = context(&[("--spacing-base", 8.0, Unit::Px)]);
        let result = evaluate("var(--spacing-base) * 2", &ctx);
        assert_eq!(result.value, Some(16.0));
    }

    #[test]
    fn test_unit_inference() {
        let ctx = context(&[("a", 8.0, Unit::Px), ("b", 1.5, Unit::Rem), ("c", 2.0, Unit::Em)]);
        assert_eq!(evaluate("'a' + 'b' + 'c'", &ctx).unit, Unit::Rem);
        assert_eq!(evaluate("'a' * 2", &ctx).unit, Unit::Px);
        assert_eq!(evaluate("4 * 2", &ctx).unit, Unit::Px);
    }

    #[test]
    fn test_all_missing_references_reported() {
        let ctx = context(&[("a", 1.0, Unit::Px)]);
        let result = evaluate("'x' + 'a' + 'y'", &ctx);
        assert_eq!(result.value, None);
        assert_eq!(
            result.warnings,
            vec![
                ExprWarning::MissingVariable("x".to_string()),
                ExprWarning::MissingVariable("y".to_string()),
            ]
        );
        assert_eq!(result.warnings[0].to_string(), "Variable 'x' not found");
    }

    #[test]
    fn test_division_by_zero() {
        let ctx = context(&[("a", 4.0, Unit::Px)]);
        let result = evaluate("'a' / 0", &ctx);
        assert_eq!(result.value, Some(f64::INFINITY));
        assert_eq!(result.warnings, vec![ExprWarning::DivisionByZero]);
        assert!(!result.is_clean());

        let result = evaluate("-'a' / (1 - 1)", &ctx);
        assert_eq!(result.value, Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_syntax_error() {
        let result = evaluate("'a' * * 2", &EvalContext::new());
        assert_eq!(result.value, None);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].to_string().to_lowercase().contains("syntax"));
    }

    #[test]
    fn test_bare_identifier_is_missing() {
        let result = evaluate("gap * 2", &EvalContext::new());
        assert_eq!(result.warnings, vec![ExprWarning::MissingVariable("gap".to_string())]);
    }

    #[test]
    fn test_unbound_placeholder_name_is_missing() {
        let ctx = context(&[("a", 4.0, Unit::Px)]);
        let result = evaluate("'a' + __ref7 * 2", &ctx);
        assert_eq!(result.value, None);
        assert_eq!(result.warnings, vec![ExprWarning::MissingVariable("__ref7".to_string())]);
    }

    #[test]
    fn test_functions() {
        let ctx = context(&[("a", 10.0, Unit::Px)]);
        assert_eq!(evaluate("round('a' / 4)", &ctx).value, Some(3.0));
        assert_eq!(evaluate("round(-2.5)", &ctx).value, Some(-2.0));
        assert_eq!(evaluate("floor(2.7) + ceil(2.1)", &ctx).value, Some(5.0));
        assert_eq!(evaluate("min('a', 3, 7)", &ctx).value, Some(3.0));
        assert_eq!(evaluate("max('a', 3, 7)", &ctx).value, Some(10.0));
        assert_eq!(evaluate("abs(-'a')", &ctx).value, Some(10.0));
    }

    proptest! {
        #[test]
        fn test_arithmetic_precedence(a in -100i32..100, b in -100i32..100, c in 1i32..100) {
            let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
            let ctx = context(&[("a", a, Unit::Px), ("b", b, Unit::Px), ("c", c, Unit::Px)]);

            prop_assert_eq!(evaluate("'a' + 'b' * 'c'", &ctx).value, Some(a + b * c));
            prop_assert_eq!(evaluate("'a' - 'b' / 'c'", &ctx).value, Some(a - b / c));
            prop_assert_eq!(evaluate("('a' - 'b') * 'c'", &ctx).value, Some((a - b) * c));
        }
    }
}
