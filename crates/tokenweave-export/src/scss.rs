//! Sass variables and mixins.

use tokenweave_core::{ConversionSettings, Document, StyleCategory, StyleOutputMode, TokenType};

use crate::comments::CommentStyle;
use crate::context::ConvertContext;
use crate::css::join_sections;
use crate::error::Result;
use crate::values::{StyleValue, Syntax, ValueWriter};
use crate::walk::{collection_entries, style_entries, style_heading};
use crate::Converter;

/// Output when nothing is left to declare.
pub const NO_VARIABLES: &str = "// No variables found in this file";

const COMMENTS: CommentStyle = CommentStyle::Line;

/// Emits `$name: value;` declarations. Multi-mode collections use their
/// default mode; styles become variables or `@mixin`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScssConverter;

impl Converter for ScssConverter {
    fn name(&self) -> &'static str {
        "scss"
    }

    fn file_extension(&self) -> &'static str {
        "scss"
    }

    fn convert(&self, document: &Document, settings: &ConversionSettings) -> Result<String> {
        to_scss(document, settings)
    }
}

pub fn to_scss(document: &Document, settings: &ConversionSettings) -> Result<String> {
    let ctx = ConvertContext::new(document, settings);
    let writer = ValueWriter::new(&ctx, Syntax::Scss);
    let mut sections: Vec<Vec<String>> = Vec::new();

    for collection in ctx.collections() {
        let mode = ctx.flat_mode(collection);
        let mut section = Vec::new();
        if settings.include_collection_comments {
            section.push(COMMENTS.comment(&collection.name));
        }
        if settings.include_mode_comments && collection.is_multi_mode() {
            section.push(COMMENTS.comment(&format!("Mode: {}", mode)));
        }
        let header = section.len();
        for entry in collection_entries(&ctx, collection) {
            if let Some(value) = writer.token_value(&entry, mode)? {
                section.push(format!("${}: {};", entry.name, value));
            }
        }
        log::debug!("scss: {} declarations for '{}'", section.len() - header, collection.name);
        if section.len() > header {
            sections.push(section);
        }
    }

    for category in StyleCategory::ALL {
        let entries = style_entries(&ctx, category);
        if entries.is_empty() {
            continue;
        }
        let mut section = Vec::new();
        if settings.include_collection_comments {
            section.push(COMMENTS.comment(style_heading(category)));
        }
        let header = section.len();
        for entry in &entries {
            let Some(value) = writer.style_value(entry.token)? else {
                continue;
            };
            match settings.style_output_mode {
                StyleOutputMode::Variables => match value {
                    StyleValue::Single(value) => section.push(format!("${}: {};", entry.name, value)),
                    StyleValue::Properties(properties) => {
                        for (property, value) in properties {
                            section.push(format!("${}-{}: {};", entry.name, property, value));
                        }
                    }
                },
                StyleOutputMode::Classes => {
                    let properties = match value {
                        StyleValue::Single(value) if entry.token.token_type == TokenType::Color => {
                            vec![("background-color".to_string(), value)]
                        }
                        StyleValue::Single(value) => vec![("background".to_string(), value)],
                        StyleValue::Properties(properties) => properties,
                    };
                    if section.len() > header {
                        section.push(String::new());
                    }
                    section.push(format!("@mixin {} {{", entry.name));
                    for (property, value) in properties {
                        section.push(format!("  {}: {};", property, value));
                    }
                    section.push("}".to_string());
                }
            }
        }
        if section.len() > header {
            sections.push(section);
        }
    }

    if sections.is_empty() {
        return Ok(NO_VARIABLES.to_string());
    }
    let mut lines = COMMENTS.banner(settings.header_banner.as_deref());
    lines.extend(join_sections(sections));
    Ok(lines.join("\n") + "\n")
}
