//! Reference extraction and substitution.
//!
//! Expressions name other variables either as a quoted path
//! (`'Spacing/base'`) or as a CSS custom property (`var(--spacing-base)`).
//! Both are swapped for `__refN` identifiers before parsing so the grammar
//! never sees them.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{map, recognize},
    sequence::{delimited, pair},
    IResult,
};

use crate::lexer::ws;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSyntax {
    /// `'path'` or `"path"`
    Path,
    /// `var(--name)`
    CssVar,
}

/// A reference found in an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub syntax: ReferenceSyntax,
    /// Context key: the path without quotes, or `--name`.
    pub key: String,
    /// Byte span in the source expression.
    pub start: usize,
    pub end: usize,
}

fn single_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_while1(|c: char| c != '\''), char('\''))(input)
}

fn double_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while1(|c: char| c != '"'), char('"'))(input)
}

fn css_var(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("var("),
        ws(recognize(pair(
            tag("--"),
            take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_'),
        ))),
        char(')'),
    )(input)
}

fn reference(input: &str) -> IResult<&str, (ReferenceSyntax, &str)> {
    alt((
        map(alt((single_quoted, double_quoted)), |path| {
            (ReferenceSyntax::Path, str::trim(path))
        }),
        map(css_var, |name| (ReferenceSyntax::CssVar, name)),
    ))(input)
}

/// All references in `expression`, in source order.
pub fn extract_references(expression: &str) -> Vec<Reference> {
    let mut refs = Vec::new();
    let mut offset = 0;

    while offset < expression.len() {
        let rest = &expression[offset..];
        match reference(rest) {
            Ok((remaining, (syntax, key))) => {
                let end = expression.len() - remaining.len();
                refs.push(Reference {
                    syntax,
                    key: key.to_string(),
                    start: offset,
                    end,
                });
                offset = end;
            }
            Err(_) => offset += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    refs
}

/// Replace every reference with the text `replace` returns for it.
pub fn rewrite_references<F>(expression: &str, mut replace: F) -> String
where
    F: FnMut(&Reference) -> String,
{
    let mut out = String::with_capacity(expression.len());
    let mut cursor = 0;
    for reference in extract_references(expression) {
        out.push_str(&expression[cursor..reference.start]);
        out.push_str(&replace(&reference));
        cursor = reference.end;
    }
    out.push_str(&expression[cursor..]);
    out
}

/// An expression with references swapped for identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub expression: String,
    /// `(identifier, context key)` pairs in order of first appearance.
    pub bindings: Vec<(String, String)>,
}

/// Swap references for `__refN` identifiers. Repeated keys share one.
pub fn substitute(expression: &str) -> Substituted {
    let mut bindings: Vec<(String, String)> = Vec::new();
    let expression = rewrite_references(expression, |reference| {
        if let Some((ident, _)) = bindings.iter().find(|(_, key)| *key == reference.key) {
            return ident.clone();
        }
        let ident = format!("__ref{}", bindings.len());
        bindings.push((ident.clone(), reference.key.clone()));
        ident
    });
    Substituted {
        expression,
        bindings,
    }
}
