//! Style value resolvers.
//!
//! Each host style becomes one token. Paint styles map to a color or a
//! background value; text, effect and grid styles map to composite values
//! keyed by CSS property. A property bound to a variable is written as a
//! `{Collection.path}` placeholder that converters later turn into their
//! own reference syntax.

mod effect;
mod grid;
mod paint;
mod text;

use tokenweave_core::styles::BoundVariables;
use tokenweave_core::{TokenPath, VariableAlias};
use tokenweave_transform::format_number;

use crate::graph::VariableGraph;

/// Access to per-field variable bindings of a style record.
pub trait Bindings {
    fn binding(&self, field: &str) -> Option<&VariableAlias>;
}

impl Bindings for BoundVariables {
    fn binding(&self, field: &str) -> Option<&VariableAlias> {
        self.get(field)
    }
}

/// The placeholder text for a reference.
pub fn placeholder(path: &TokenPath) -> String {
    format!("{{{}}}", path)
}

/// Replace every `{Collection.path}` placeholder in `text`.
///
/// Braced text that is not a dotted path is kept as is.
pub fn render_placeholders<F>(text: &str, mut render: F) -> String
where
    F: FnMut(&TokenPath) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        out.push_str(&rest[..open]);
        let inner = &rest[open + 1..close];
        match TokenPath::parse_dotted(inner).filter(|_| !inner.contains(char::is_whitespace)) {
            Some(path) => out.push_str(&render(&path)),
            None => out.push_str(&rest[open..=close]),
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Whether `text` contains at least one placeholder.
pub fn has_placeholder(text: &str) -> bool {
    let mut found = false;
    render_placeholders(text, |_| {
        found = true;
        String::new()
    });
    found
}

/// Turns host style records into tokens.
#[derive(Debug)]
pub struct StyleResolver<'g, 'a> {
    graph: &'g VariableGraph<'a>,
    precision: u8,
}

impl<'g, 'a> StyleResolver<'g, 'a> {
    pub fn new(graph: &'g VariableGraph<'a>, precision: u8) -> Self {
        Self { graph, precision }
    }

    /// Placeholder for the variable bound to `field`, if it exists.
    fn bound<B: Bindings + ?Sized>(&self, bindings: &B, field: &str) -> Option<String> {
        let alias = bindings.binding(field)?;
        let variable = self.graph.variable(&alias.id);
        let path = variable.and_then(|v| self.graph.reference_path(v));
        if path.is_none() {
            log::debug!("style binding '{}' points at unknown variable {}", field, alias.id);
        }
        path.map(|p| placeholder(&p))
    }

    /// Bound placeholder for `field`, else `literal`.
    fn bound_or<B: Bindings + ?Sized>(&self, bindings: &B, field: &str, literal: String) -> String {
        self.bound(bindings, field).unwrap_or(literal)
    }

    fn number(&self, value: f64) -> String {
        format_number(value, self.precision)
    }

    fn px(&self, value: f64) -> String {
        let n = self.number(value);
        if n == "0" {
            n
        } else {
            format!("{}px", n)
        }
    }
}

/// CSS weight for a font style name such as `Semi Bold Italic`.
pub fn font_weight(style: &str) -> u16 {
    let key: String = style
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    let key = key.replace("italic", "").replace("oblique", "");
    match key.as_str() {
        "thin" | "hairline" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" => 800,
        "black" | "heavy" => 900,
        _ => 400,
    }
}
