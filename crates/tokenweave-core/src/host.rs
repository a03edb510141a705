//! Shapes supplied by the host variable provider.
//!
//! These mirror what the design tool hands over: variables, their
//! collections, and the four style lists. The core never talks to the host
//! directly; everything arrives through [`VariableSource`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::styles::{EffectStyle, GridStyle, PaintStyle, TextStyle};

/// Primitive type of a variable as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
}

impl ResolvedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedType::Color => "COLOR",
            ResolvedType::Float => "FLOAT",
            ResolvedType::String => "STRING",
            ResolvedType::Boolean => "BOOLEAN",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ResolvedType::Float)
    }
}

/// Host color with unit-interval channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl HostColor {
    pub fn to_hex(&self) -> String {
        tokenweave_transform::rgba_to_hex(self.r, self.g, self.b, self.a)
    }
}

/// Tag carried by alias values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasTag {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// A pointer from one variable value to another variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub tag: AliasTag,
    pub id: String,
}

impl VariableAlias {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            tag: AliasTag::VariableAlias,
            id: id.into(),
        }
    }
}

/// A single per-mode value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Color(HostColor),
    Boolean(bool),
    Float(f64),
    String(String),
}

impl VariableValue {
    pub fn alias(id: impl Into<String>) -> Self {
        VariableValue::Alias(VariableAlias::new(id))
    }

    pub fn as_alias(&self) -> Option<&str> {
        match self {
            VariableValue::Alias(alias) => Some(&alias.id),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            VariableValue::Float(n) => Some(*n),
            _ => None,
        }
    }
}

/// A design variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    /// Slash-delimited name, e.g. `color/brand/primary`.
    pub name: String,
    pub resolved_type: ResolvedType,
    pub values_by_mode: IndexMap<String, VariableValue>,
    pub variable_collection_id: String,
    #[serde(default)]
    pub description: String,
}

impl Variable {
    pub fn value_for_mode(&self, mode_id: &str) -> Option<&VariableValue> {
        self.values_by_mode.get(mode_id)
    }

    /// Name split on `/`, empty segments dropped.
    pub fn segments(&self) -> Vec<String> {
        split_name(&self.name)
    }
}

/// Split a slash-delimited host name into trimmed, non-empty segments.
pub fn split_name(name: &str) -> Vec<String> {
    name.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// A mode of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

/// A collection of variables sharing a set of modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
    pub default_mode_id: String,
}

impl VariableCollection {
    pub fn mode_name(&self, mode_id: &str) -> Option<&str> {
        self.modes
            .iter()
            .find(|m| m.mode_id == mode_id)
            .map(|m| m.name.as_str())
    }

    pub fn mode_by_name(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }

    pub fn has_mode(&self, mode_id: &str) -> bool {
        self.modes.iter().any(|m| m.mode_id == mode_id)
    }

    /// The default mode, falling back to the first declared mode.
    pub fn default_mode(&self) -> Option<&Mode> {
        self.modes
            .iter()
            .find(|m| m.mode_id == self.default_mode_id)
            .or_else(|| self.modes.first())
    }
}

/// The host-side provider of variables and styles.
///
/// Implementations only hand out data; the core never mutates it.
pub trait VariableSource {
    fn collections(&self) -> &[VariableCollection];

    fn variables(&self) -> &[Variable];

    fn paint_styles(&self) -> &[PaintStyle] {
        &[]
    }

    fn text_styles(&self) -> &[TextStyle] {
        &[]
    }

    fn effect_styles(&self) -> &[EffectStyle] {
        &[]
    }

    fn grid_styles(&self) -> &[GridStyle] {
        &[]
    }

    /// Name of the source file, used in document metadata.
    fn file_name(&self) -> &str {
        "Untitled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_deserialization() {
        let values: Vec<VariableValue> = serde_json::from_str(
            r#"[
                {"type": "VARIABLE_ALIAS", "id": "VariableID:1"},
                {"r": 1, "g": 0, "b": 0},
                true,
                8,
                "Inter"
            ]"#,
        )
        .unwrap();

        assert_eq!(values[0].as_alias(), Some("VariableID:1"));
        assert!(matches!(values[1], VariableValue::Color(c) if c.a == 1.0));
        assert_eq!(values[2], VariableValue::Boolean(true));
        assert_eq!(values[3].as_number(), Some(8.0));
        assert_eq!(values[4], VariableValue::String("Inter".to_string()));
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("color / brand//primary"), vec!["color", "brand", "primary"]);
    }

    #[test]
    fn test_default_mode_fallback() {
        let collection = VariableCollection {
            id: "c".into(),
            name: "Theme".into(),
            modes: vec![Mode { mode_id: "1".into(), name: "Light".into() }],
            default_mode_id: "missing".into(),
        };
        assert_eq!(collection.default_mode().unwrap().name, "Light");
    }
}
