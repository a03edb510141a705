//! Flattening token trees into sorted output entries.

use tokenweave_core::{natural_cmp, CollectionTokens, StyleCategory, Token, TokenPath};

use crate::context::ConvertContext;

/// One token with its output name.
#[derive(Debug, Clone)]
pub struct Entry<'d> {
    pub path: TokenPath,
    /// Formatted name without `--` or `$`.
    pub name: String,
    pub token: &'d Token,
}

/// Tokens of `collection`, sorted naturally by output name.
pub fn collection_entries<'d>(
    ctx: &ConvertContext<'d>,
    collection: &'d CollectionTokens,
) -> Vec<Entry<'d>> {
    let mut entries: Vec<Entry<'d>> = collection
        .tokens
        .tokens()
        .into_iter()
        .map(|(segments, token)| {
            let path = TokenPath::new(collection.name.clone(), segments);
            Entry {
                name: ctx.variable_name(&path),
                path,
                token,
            }
        })
        .collect();
    sort(&mut entries);
    entries
}

/// Style tokens of `category`, sorted naturally by output name. Empty unless
/// the settings include that category.
pub fn style_entries<'d>(ctx: &ConvertContext<'d>, category: StyleCategory) -> Vec<Entry<'d>> {
    let Some(styles) = ctx.document.styles.as_ref() else {
        return Vec::new();
    };
    if !ctx.settings.includes_style(category) {
        return Vec::new();
    }
    let mut entries: Vec<Entry<'d>> = styles
        .get(category)
        .tokens()
        .into_iter()
        .map(|(segments, token)| Entry {
            name: ctx.style_name(&segments),
            path: TokenPath::new(category.as_str(), segments),
            token,
        })
        .collect();
    sort(&mut entries);
    entries
}

fn sort(entries: &mut [Entry<'_>]) {
    entries.sort_by(|a, b| natural_cmp(&a.name, &b.name));
}

/// Heading used in comments for a style category.
pub fn style_heading(category: StyleCategory) -> &'static str {
    match category {
        StyleCategory::Paint => "Paint Styles",
        StyleCategory::Text => "Text Styles",
        StyleCategory::Effect => "Effect Styles",
        StyleCategory::Grid => "Grid Styles",
    }
}
