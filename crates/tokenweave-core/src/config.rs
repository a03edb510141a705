//! Per-token formatting directives.
//!
//! Designers steer output from a variable's description field:
//!
//! ```text
//! Base spacing step.
//! unit: rem
//! remBase: typography/rem-base
//! calc: 'Spacing/base' * 2
//! ```
//!
//! Recognised lines become [`TokenDirectives`]; everything else stays the
//! human description. Directives are overlaid on the settings defaults with
//! [`TokenConfig::merge`], which always yields a fresh config.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokenweave_transform::{ColorFormat, Unit};

use crate::settings::ConversionSettings;

/// Root font size: a literal or a variable path resolved at conversion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemBase {
    Value(f64),
    Variable(String),
}

impl Default for RemBase {
    fn default() -> Self {
        RemBase::Value(tokenweave_transform::DEFAULT_REM_BASE)
    }
}

impl fmt::Display for RemBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemBase::Value(v) => write!(f, "{}", v),
            RemBase::Variable(path) => write!(f, "{}", path),
        }
    }
}

impl RemBase {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_matches(|c| c == '\'' || c == '"');
        if raw.is_empty() {
            return None;
        }
        match raw.trim_end_matches("px").parse::<f64>() {
            Ok(v) if v > 0.0 => Some(RemBase::Value(v)),
            Ok(_) => None,
            Err(_) => Some(RemBase::Variable(raw.to_string())),
        }
    }
}

/// Directives parsed from a description. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDirectives {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rem_base: Option<RemBase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_format: Option<ColorFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
}

impl TokenDirectives {
    pub fn is_empty(&self) -> bool {
        self.unit.is_none()
            && self.rem_base.is_none()
            && self.color_format.is_none()
            && self.expression.is_none()
            && self.precision.is_none()
    }
}

/// A description split into directives and the remaining prose.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDescription {
    pub directives: TokenDirectives,
    pub text: Option<String>,
}

/// Split a description into directives and prose.
pub fn parse_description(description: &str) -> ParsedDescription {
    let mut directives = TokenDirectives::default();
    let mut prose = Vec::new();

    for line in description.lines() {
        if !apply_directive(&mut directives, line) {
            prose.push(line);
        }
    }

    let text = prose.join("\n").trim().to_string();
    ParsedDescription {
        directives,
        text: (!text.is_empty()).then_some(text),
    }
}

/// Returns `false` when `line` is not a recognised directive.
fn apply_directive(directives: &mut TokenDirectives, line: &str) -> bool {
    let Some((key, value)) = line.split_once(':') else {
        return false;
    };
    let value = value.trim();
    match key.trim().to_ascii_lowercase().as_str() {
        "unit" => match value.parse::<Unit>() {
            Ok(unit) => directives.unit = Some(unit),
            Err(_) => return false,
        },
        "rembase" | "rem-base" => match RemBase::parse(value) {
            Some(base) => directives.rem_base = Some(base),
            None => return false,
        },
        "colorformat" | "color-format" | "color" => match value.parse::<ColorFormat>() {
            Ok(format) => directives.color_format = Some(format),
            Err(_) => return false,
        },
        "calc" | "expression" => {
            if value.is_empty() {
                return false;
            }
            directives.expression = Some(value.to_string());
        }
        "precision" => match value.parse::<u8>() {
            Ok(p) => directives.precision = Some(p.min(10)),
            Err(_) => return false,
        },
        _ => return false,
    }
    true
}

/// Fully resolved formatting for one token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenConfig {
    pub unit: Unit,
    pub rem_base: RemBase,
    pub color_format: ColorFormat,
    pub expression: Option<String>,
    pub precision: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Px,
            rem_base: RemBase::default(),
            color_format: ColorFormat::Hex,
            expression: None,
            precision: tokenweave_transform::DEFAULT_PRECISION,
        }
    }
}

impl TokenConfig {
    /// Defaults taken from conversion settings.
    pub fn from_settings(settings: &ConversionSettings) -> Self {
        Self {
            unit: settings.default_unit,
            rem_base: RemBase::Value(settings.rem_base),
            color_format: settings.color_format,
            expression: None,
            precision: settings.precision,
        }
    }

    /// Overlay `directives`, returning a new config.
    pub fn merge(&self, directives: &TokenDirectives) -> TokenConfig {
        TokenConfig {
            unit: directives.unit.unwrap_or(self.unit),
            rem_base: directives
                .rem_base
                .clone()
                .unwrap_or_else(|| self.rem_base.clone()),
            color_format: directives.color_format.unwrap_or(self.color_format),
            expression: directives
                .expression
                .clone()
                .or_else(|| self.expression.clone()),
            precision: directives.precision.unwrap_or(self.precision),
        }
    }

    /// Same config with a different unit.
    pub fn with_unit(&self, unit: Unit) -> TokenConfig {
        TokenConfig {
            unit,
            ..self.clone()
        }
    }
}
