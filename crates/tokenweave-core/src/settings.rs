//! Conversion settings.
//!
//! Settings arrive as camelCase JSON from the plugin UI or a settings file.
//! Every field has a default so partial documents load cleanly.

use serde::{Deserialize, Serialize};
use tokenweave_transform::{ColorFormat, Unit};

use crate::errors::SettingsError;
use crate::styles::StyleCategory;

/// One rename rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFormatRule {
    /// Glob over the slash-delimited variable name.
    pub pattern: String,
    /// Template using `$N`, `${N}` and `${N:modifier}` captures.
    pub replacement: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn enabled() -> bool {
    true
}

impl NameFormatRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// How styles are emitted by CSS and SCSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleOutputMode {
    #[default]
    Variables,
    Classes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionSettings {
    pub prefix: String,
    pub name_format_rules: Vec<NameFormatRule>,
    pub color_format: ColorFormat,
    pub default_unit: Unit,
    pub rem_base: f64,
    pub precision: u8,
    pub selector: String,
    pub use_modes_as_selectors: bool,
    pub include_collection_comments: bool,
    pub include_mode_comments: bool,
    pub export_as_calc_expressions: bool,
    pub include_styles: bool,
    pub style_output_mode: StyleOutputMode,
    pub style_types: Vec<StyleCategory>,
    /// Collection ids or names; empty means all.
    pub selected_collections: Vec<String>,
    pub header_banner: Option<String>,
    /// Prefix each variable name with its collection name.
    pub include_collection_name: bool,
    /// Strip descriptions and empty extensions from JSON output.
    pub optimize_json: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            name_format_rules: Vec::new(),
            color_format: ColorFormat::Hex,
            default_unit: Unit::Px,
            rem_base: tokenweave_transform::DEFAULT_REM_BASE,
            precision: tokenweave_transform::DEFAULT_PRECISION,
            selector: ":root".to_string(),
            use_modes_as_selectors: false,
            include_collection_comments: true,
            include_mode_comments: false,
            export_as_calc_expressions: false,
            include_styles: false,
            style_output_mode: StyleOutputMode::Variables,
            style_types: StyleCategory::ALL.to_vec(),
            selected_collections: Vec::new(),
            header_banner: None,
            include_collection_name: false,
            optimize_json: false,
        }
    }
}

impl ConversionSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a collection passes the allow-list.
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

    /// The selector for the base block, never empty.
    pub fn root_selector(&self) -> &str {
        let selector = self.selector.trim();
        if selector.is_empty() {
            ":root"
        } else {
            selector
        }
    }
}
