//! CSS custom properties.

use tokenweave_core::{slugify, ConversionSettings, Document, StyleCategory, StyleOutputMode, TokenType};

use crate::comments::CommentStyle;
use crate::context::ConvertContext;
use crate::error::Result;
use crate::values::{StyleValue, Syntax, ValueWriter};
use crate::walk::{collection_entries, style_entries, style_heading};
use crate::Converter;

/// Output when nothing is left to declare.
pub const NO_VARIABLES: &str = "/* No variables found in this file */";

const COMMENTS: CommentStyle = CommentStyle::Block;

/// Emits a `:root` block of custom properties, optional per-mode selector
/// blocks and optional style classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssConverter;

impl Converter for CssConverter {
    fn name(&self) -> &'static str {
        "css"
    }

    fn file_extension(&self) -> &'static str {
        "css"
    }

    fn convert(&self, document: &Document, settings: &ConversionSettings) -> Result<String> {
        to_css(document, settings)
    }
}

/// Lines of one commented group of declarations.
type Section = Vec<String>;

pub fn to_css(document: &Document, settings: &ConversionSettings) -> Result<String> {
    let ctx = ConvertContext::new(document, settings);
    let writer = ValueWriter::new(&ctx, Syntax::Css);
    let collections = ctx.collections();

    let mut root: Vec<Section> = Vec::new();
    for collection in &collections {
        let mode = ctx.flat_mode(collection);
        let mut section = Vec::new();
        if settings.include_collection_comments {
            section.push(format!("  {}", COMMENTS.comment(&collection.name)));
        }
        if settings.include_mode_comments && collection.is_multi_mode() {
            section.push(format!("  {}", COMMENTS.comment(&format!("Mode: {}", mode))));
        }
        let header = section.len();
        for entry in collection_entries(&ctx, collection) {
            if let Some(value) = writer.token_value(&entry, mode)? {
                section.push(declaration(&entry.name, &value));
            }
        }
        log::debug!("css: {} declarations for '{}'", section.len() - header, collection.name);
        if section.len() > header {
            root.push(section);
        }
    }

    let mut classes: Vec<Section> = Vec::new();
    for category in StyleCategory::ALL {
        let entries = style_entries(&ctx, category);
        if entries.is_empty() {
            continue;
        }
        match settings.style_output_mode {
            StyleOutputMode::Variables => {
                let mut section = Vec::new();
                if settings.include_collection_comments {
                    section.push(format!("  {}", COMMENTS.comment(style_heading(category))));
                }
                let header = section.len();
                for entry in &entries {
                    match writer.style_value(entry.token)? {
                        Some(StyleValue::Single(value)) => section.push(declaration(&entry.name, &value)),
                        Some(StyleValue::Properties(properties)) => {
                            for (property, value) in properties {
                                section.push(declaration(&format!("{}-{}", entry.name, property), &value));
                            }
                        }
                        None => {}
                    }
                }
                if section.len() > header {
                    root.push(section);
                }
            }
            StyleOutputMode::Classes => {
                let mut section = Vec::new();
                if settings.include_collection_comments {
                    section.push(COMMENTS.comment(style_heading(category)));
                }
                let header = section.len();
                for entry in &entries {
                    let properties = match writer.style_value(entry.token)? {
                        Some(StyleValue::Single(value)) if entry.token.token_type == TokenType::Color => {
                            vec![("background-color".to_string(), value)]
                        }
                        Some(StyleValue::Single(value)) => vec![("background".to_string(), value)],
                        Some(StyleValue::Properties(properties)) => properties,
                        None => continue,
                    };
                    if section.len() > header {
                        section.push(String::new());
                    }
                    section.push(format!(".{} {{", entry.name));
                    for (property, value) in properties {
                        section.push(format!("  {}: {};", property, value));
                    }
                    section.push("}".to_string());
                }
                if section.len() > header {
                    classes.push(section);
                }
            }
        }
    }

    let selector = settings.root_selector();
    let mut blocks: Vec<Section> = Vec::new();
    if !root.is_empty() {
        blocks.push(block(selector, root));
    }
    if settings.use_modes_as_selectors {
        blocks.extend(mode_blocks(&ctx, &writer, selector)?);
    }
    blocks.extend(classes);

    if blocks.is_empty() {
        return Ok(NO_VARIABLES.to_string());
    }
    let mut lines = COMMENTS.banner(settings.header_banner.as_deref());
    lines.extend(join_sections(blocks));
    Ok(lines.join("\n") + "\n")
}

/// One selector block per non-default mode of the multi-mode collections.
fn mode_blocks<'d>(
    ctx: &ConvertContext<'d>,
    writer: &ValueWriter<'_, 'd>,
    selector: &str,
) -> Result<Vec<Section>> {
    let multi_mode: Vec<_> = ctx.collections().into_iter().filter(|c| c.is_multi_mode()).collect();

    let mut modes: Vec<&str> = Vec::new();
    for collection in &multi_mode {
        let flat = ctx.flat_mode(collection);
        for mode in &collection.modes {
            if mode != flat && !modes.contains(&mode.as_str()) {
                modes.push(mode.as_str());
            }
        }
    }

    let mut blocks = Vec::new();
    for mode in modes {
        let mut sections: Vec<Section> = Vec::new();
        for collection in &multi_mode {
            if ctx.flat_mode(collection) == mode || !collection.modes.iter().any(|m| m == mode) {
                continue;
            }
            let mut section = Vec::new();
            if ctx.settings.include_collection_comments {
                section.push(format!("  {}", COMMENTS.comment(&collection.name)));
            }
            let header = section.len();
            for entry in collection_entries(ctx, collection) {
                if let Some(value) = writer.token_value(&entry, mode)? {
                    section.push(declaration(&entry.name, &value));
                }
            }
            if section.len() > header {
                sections.push(section);
            }
        }
        if sections.is_empty() {
            continue;
        }
        let slug = slugify(mode);
        let mut lines = vec![COMMENTS.comment(&format!("Mode: {}", mode))];
        lines.extend(block(
            &format!("{}[data-theme=\"{}\"], .theme-{}", selector, slug, slug),
            sections,
        ));
        blocks.push(lines);
    }
    Ok(blocks)
}

fn declaration(name: &str, value: &str) -> String {
    format!("  --{}: {};", name, value)
}

fn block(selector: &str, sections: Vec<Section>) -> Section {
    let mut lines = vec![format!("{} {{", selector)];
    lines.extend(join_sections(sections));
    lines.push("}".to_string());
    lines
}

/// Concatenate sections with a blank line between them.
pub(crate) fn join_sections(sections: Vec<Section>) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(section);
    }
    lines
}
