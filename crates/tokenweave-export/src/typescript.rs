//! TypeScript name union.

use tokenweave_core::{natural_cmp, ConversionSettings, Document, StyleCategory, StyleOutputMode};

use crate::comments::CommentStyle;
use crate::context::ConvertContext;
use crate::error::Result;
use crate::values::{StyleValue, Syntax, ValueWriter};
use crate::walk::{collection_entries, style_entries};
use crate::Converter;

/// Output when there are no names; an empty union is not valid TypeScript.
pub const NO_VARIABLES: &str = "// No variables found in this file";

const CSSTYPE_AUGMENTATION: &str =
    "declare module 'csstype' { interface Properties { [key: CSSVariableName]: string | number; } }";

/// Emits a `CSSVariableName` string-literal union of every custom property
/// the CSS converter would declare, and registers it with `csstype`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptConverter;

impl Converter for TypeScriptConverter {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "d.ts"
    }

    fn convert(&self, document: &Document, settings: &ConversionSettings) -> Result<String> {
        to_typescript(document, settings)
    }
}

pub fn to_typescript(document: &Document, settings: &ConversionSettings) -> Result<String> {
    let names = variable_names(document, settings)?;
    if names.is_empty() {
        return Ok(NO_VARIABLES.to_string());
    }

    let mut lines = CommentStyle::Line.banner(settings.header_banner.as_deref());
    lines.push("export type CSSVariableName =".to_string());
    let last = names.len() - 1;
    for (i, name) in names.iter().enumerate() {
        let end = if i == last { ";" } else { "" };
        lines.push(format!("  | \"--{}\"{}", name, end));
    }
    lines.push(String::new());
    lines.push(CSSTYPE_AUGMENTATION.to_string());
    Ok(lines.join("\n") + "\n")
}

/// Custom property names (without `--`), sorted and deduplicated.
pub fn variable_names(document: &Document, settings: &ConversionSettings) -> Result<Vec<String>> {
    let ctx = ConvertContext::new(document, settings);
    let mut names: Vec<String> = Vec::new();

    for collection in ctx.collections() {
        let mode = ctx.flat_mode(collection);
        let modes: Vec<&str> = if settings.use_modes_as_selectors {
            collection.modes.iter().map(String::as_str).collect()
        } else {
            vec![mode]
        };
        for entry in collection_entries(&ctx, collection) {
            // Emitted if any rendered mode holds a value
            if modes.iter().any(|m| entry.token.value.for_mode(m).is_some()) {
                names.push(entry.name);
            }
        }
    }

    if settings.style_output_mode == StyleOutputMode::Variables {
        let writer = ValueWriter::new(&ctx, Syntax::Css);
        for category in StyleCategory::ALL {
            for entry in style_entries(&ctx, category) {
                match writer.style_value(entry.token)? {
                    Some(StyleValue::Single(_)) => names.push(entry.name),
                    Some(StyleValue::Properties(properties)) => {
                        names.extend(properties.into_iter().map(|(p, _)| format!("{}-{}", entry.name, p)))
                    }
                    None => {}
                }
            }
        }
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    names.dedup();
    Ok(names)
}
