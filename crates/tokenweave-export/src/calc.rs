//! Calc expression passthrough.
//!
//! Instead of the evaluated number, CSS and SCSS can re-emit a token's
//! expression with its references rewritten to the target's own variable:
//! `'Spacing/base' * 2` becomes `calc(var(--spacing-base) * 2)` in CSS and
//! `$spacing-base * 2` in SCSS.

use tokenweave_expr::{rewrite_references, Reference};
use tokenweave_transform::{format_number, Unit};

/// Root font size used to turn a pixel expression into `rem`.
#[derive(Debug, Clone, PartialEq)]
pub enum RemDivisor {
    Value(f64),
    /// Output name of the variable holding the base.
    Variable(String),
}

/// The expression as a CSS value, wrapped in `calc()` when it needs one.
///
/// `name_of` maps each reference to the output name of its target; `None`
/// from it aborts the rewrite.
pub fn format_for_css<F>(
    expression: &str,
    unit: Unit,
    rem_base: &RemDivisor,
    precision: u8,
    name_of: F,
) -> Option<String>
where
    F: FnMut(&Reference) -> Option<String>,
{
    let css_var = |name: &str| format!("var(--{})", name);
    let body = rewrite(expression, name_of, css_var)?;
    let body = with_unit(body, unit, rem_base, precision, css_var);
    Some(if needs_calc(&body) {
        format!("calc({})", body)
    } else {
        body
    })
}

/// The expression as a Sass value. Sass evaluates arithmetic itself, so
/// the result is never wrapped in `calc()`.
pub fn format_for_scss<F>(
    expression: &str,
    unit: Unit,
    rem_base: &RemDivisor,
    precision: u8,
    name_of: F,
) -> Option<String>
where
    F: FnMut(&Reference) -> Option<String>,
{
    let scss_var = |name: &str| format!("${}", name);
    let body = rewrite(expression, name_of, scss_var)?;
    Some(with_unit(body, unit, rem_base, precision, scss_var))
}

fn rewrite<F, V>(expression: &str, mut name_of: F, variable: V) -> Option<String>
where
    F: FnMut(&Reference) -> Option<String>,
    V: Fn(&str) -> String,
{
    let mut complete = true;
    let rewritten = rewrite_references(expression.trim(), |reference| match name_of(reference) {
        Some(name) => variable(&name),
        None => {
            complete = false;
            String::new()
        }
    });
    complete.then_some(rewritten)
}

fn with_unit<V>(body: String, unit: Unit, rem_base: &RemDivisor, precision: u8, variable: V) -> String
where
    V: Fn(&str) -> String,
{
    match unit {
        Unit::None | Unit::Px => body,
        Unit::Rem => {
            let divisor = match rem_base {
                RemDivisor::Value(v) => format_number(*v, precision),
                RemDivisor::Variable(name) => variable(name),
            };
            format!("{} / {} * 1rem", body, divisor)
        }
        // Percentages are stored as fractions
        Unit::Percent => format!("{} * 100%", body),
        other => format!("{} * 1{}", body, other.suffix()),
    }
}

/// Whether `value` holds an operator or a variable reference.
fn needs_calc(value: &str) -> bool {
    if value.contains("var(") {
        return true;
    }
    let mut prev: Option<char> = None;
    for c in value.chars() {
        match c {
            '+' | '*' | '/' => return true,
            '-' if prev.is_some_and(|p| p.is_ascii_alphanumeric() || p == ')' || p == '%' || p == '.') => {
                return true
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    false
}
