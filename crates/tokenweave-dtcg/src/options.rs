//! Serializer options.

use tokenweave_core::{ConversionSettings, StyleCategory, TokenConfig};
use tokenweave_resolver::DEFAULT_MAX_DEPTH;

/// What to serialize and how to resolve it.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializeOptions {
    /// Collection ids or names to keep; empty keeps all.
    pub selected_collections: Vec<String>,
    pub include_styles: bool,
    pub style_types: Vec<StyleCategory>,
    /// Formatting defaults used while evaluating calc directives.
    pub defaults: TokenConfig,
    pub max_depth: usize,
    /// Fixed timestamp for the metadata; the current time when `None`.
    pub generated_at: Option<String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            selected_collections: Vec::new(),
            include_styles: false,
            style_types: StyleCategory::ALL.to_vec(),
            defaults: TokenConfig::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            generated_at: None,
        }
    }
}

impl SerializeOptions {
    pub fn from_settings(settings: &ConversionSettings) -> Self {
        Self {
            selected_collections: settings.selected_collections.clone(),
            include_styles: settings.include_styles,
            style_types: settings.style_types.clone(),
            defaults: TokenConfig::from_settings(settings),
            ..Default::default()
        }
    }

    pub fn with_generated_at(mut self, timestamp: impl Into<String>) -> Self {
        self.generated_at = Some(timestamp.into());
        self
    }

    pub fn includes_collection(&self, id: &str, name: &str) -> bool {
        self.selected_collections.is_empty()
            || self
                .selected_collections
                .iter()
                .any(|selected| selected == id || selected == name)
    }

    pub fn includes_style(&self, category: StyleCategory) -> bool {
        self.include_styles && self.style_types.contains(&category)
    }
}
