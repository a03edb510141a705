//! Host style records: paint, text, effect and layout-grid styles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::host::{HostColor, VariableAlias};

/// Per-property variable bindings, keyed by host field name.
pub type BoundVariables = IndexMap<String, VariableAlias>;

/// The four style categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    Paint,
    Text,
    Effect,
    Grid,
}

impl StyleCategory {
    pub const ALL: [StyleCategory; 4] = [
        StyleCategory::Paint,
        StyleCategory::Text,
        StyleCategory::Effect,
        StyleCategory::Grid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleCategory::Paint => "paint",
            StyleCategory::Text => "text",
            StyleCategory::Effect => "effect",
            StyleCategory::Grid => "grid",
        }
    }
}

fn visible() -> bool {
    true
}

fn full_opacity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStop {
    pub position: f64,
    pub color: HostColor,
    #[serde(default)]
    pub bound_variables: BoundVariables,
}

/// One fill layer of a paint style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    #[serde(rename_all = "camelCase")]
    Solid {
        color: HostColor,
        #[serde(default = "full_opacity")]
        opacity: f64,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
    #[serde(rename_all = "camelCase")]
    GradientLinear {
        gradient_stops: Vec<ColorStop>,
        /// Direction in CSS degrees.
        #[serde(default = "default_angle")]
        angle: f64,
        #[serde(default = "full_opacity")]
        opacity: f64,
        #[serde(default = "visible")]
        visible: bool,
    },
    #[serde(rename_all = "camelCase")]
    GradientRadial {
        gradient_stops: Vec<ColorStop>,
        #[serde(default = "full_opacity")]
        opacity: f64,
        #[serde(default = "visible")]
        visible: bool,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default = "visible")]
        visible: bool,
    },
}

fn default_angle() -> f64 {
    180.0
}

impl Paint {
    pub fn is_visible(&self) -> bool {
        match self {
            Paint::Solid { visible, .. }
            | Paint::GradientLinear { visible, .. }
            | Paint::GradientRadial { visible, .. }
            | Paint::Image { visible } => *visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub paints: Vec<Paint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    Auto,
    Pixels { value: f64 },
    Percent { value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacing {
    Pixels { value: f64 },
    Percent { value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub font_name: FontName,
    pub font_size: f64,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    #[serde(default)]
    pub text_case: TextCase,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default)]
    pub bound_variables: BoundVariables,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    #[serde(rename_all = "camelCase")]
    DropShadow {
        color: HostColor,
        offset: Offset,
        radius: f64,
        #[serde(default)]
        spread: f64,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
    #[serde(rename_all = "camelCase")]
    InnerShadow {
        color: HostColor,
        offset: Offset,
        radius: f64,
        #[serde(default)]
        spread: f64,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
    #[serde(rename_all = "camelCase")]
    LayerBlur {
        radius: f64,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
    #[serde(rename_all = "camelCase")]
    BackgroundBlur {
        radius: f64,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridAlignment {
    Min,
    Max,
    Center,
    #[default]
    Stretch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutGrid {
    #[serde(rename_all = "camelCase")]
    Columns {
        count: u32,
        #[serde(default)]
        gutter_size: f64,
        #[serde(default)]
        offset: f64,
        #[serde(default)]
        section_size: Option<f64>,
        #[serde(default)]
        alignment: GridAlignment,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
    #[serde(rename_all = "camelCase")]
    Rows {
        count: u32,
        #[serde(default)]
        gutter_size: f64,
        #[serde(default)]
        offset: f64,
        #[serde(default)]
        section_size: Option<f64>,
        #[serde(default)]
        alignment: GridAlignment,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
    #[serde(rename_all = "camelCase")]
    Grid {
        section_size: f64,
        #[serde(default = "visible")]
        visible: bool,
        #[serde(default)]
        bound_variables: BoundVariables,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub layout_grids: Vec<LayoutGrid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_deserialization() {
        let paints: Vec<Paint> = serde_json::from_str(
            r#"[
                {"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1}},
                {"type": "GRADIENT_LINEAR", "angle": 90, "gradientStops": [
                    {"position": 0, "color": {"r": 1, "g": 1, "b": 1, "a": 1}}
                ]},
                {"type": "IMAGE", "visible": false}
            ]"#,
        )
        .unwrap();

        assert!(matches!(paints[0], Paint::Solid { opacity, .. } if opacity == 1.0));
        assert!(matches!(&paints[1], Paint::GradientLinear { angle, .. } if *angle == 90.0));
        assert!(!paints[2].is_visible());
    }

    #[test]
    fn test_text_style_deserialization() {
        let style: TextStyle = serde_json::from_str(
            r#"{
                "id": "S:1", "name": "Heading/H1",
                "fontName": {"family": "Inter", "style": "Bold"},
                "fontSize": 32,
                "lineHeight": {"unit": "AUTO"},
                "letterSpacing": {"unit": "PERCENT", "value": -2},
                "textCase": "UPPER"
            }"#,
        )
        .unwrap();

        assert_eq!(style.line_height, LineHeight::Auto);
        assert_eq!(style.letter_spacing, LetterSpacing::Percent { value: -2.0 });
        assert_eq!(style.text_case, TextCase::Upper);
        assert!(style.bound_variables.is_empty());
    }
}
