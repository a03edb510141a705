//! Rendering token values as CSS or Sass text.

use indexmap::IndexMap;
use tokenweave_core::{ModeValue, RemBase, Token, TokenConfig, TokenPath, TokenType, Value};
use tokenweave_expr::{extract_references, Reference, ReferenceSyntax};
use tokenweave_resolver::{has_placeholder, render_placeholders};
use tokenweave_transform::{format_number, format_with_unit, hex_to_format, Unit, DEFAULT_REM_BASE};

use crate::calc::{format_for_css, format_for_scss, RemDivisor};
use crate::context::ConvertContext;
use crate::error::{ExportError, Result};
use crate::walk::Entry;

/// Target reference syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `var(--name)`
    Css,
    /// `$name`
    Scss,
}

impl Syntax {
    pub fn variable(&self, name: &str) -> String {
        match self {
            Syntax::Css => format!("var(--{})", name),
            Syntax::Scss => format!("${}", name),
        }
    }
}

/// A style token ready for output.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Paint styles: a color or a background.
    Single(String),
    /// Composite styles, one CSS property per pair.
    Properties(Vec<(String, String)>),
}

pub struct ValueWriter<'c, 'd> {
    ctx: &'c ConvertContext<'d>,
    syntax: Syntax,
}

impl<'c, 'd> ValueWriter<'c, 'd> {
    pub fn new(ctx: &'c ConvertContext<'d>, syntax: Syntax) -> Self {
        Self { ctx, syntax }
    }

    /// The value of a variable token under `mode`.
    ///
    /// `None` when the token holds nothing for that mode; such tokens get no
    /// output line.
    pub fn token_value(&self, entry: &Entry<'_>, mode: &str) -> Result<Option<String>> {
        let config = self.ctx.config(entry.token);

        if self.ctx.settings.export_as_calc_expressions && entry.token.token_type == TokenType::Number {
            if let Some(expression) = config.expression.as_deref() {
                match self.calc(expression, &config, mode)? {
                    Some(calc) => return Ok(Some(calc)),
                    None => log::debug!(
                        "expression for '{}' has references outside the output, writing its value",
                        entry.path
                    ),
                }
            }
        }

        let Some(value) = entry.token.value.for_mode(mode) else {
            return Ok(None);
        };
        let rendered = match value {
            ModeValue::Literal(value) => self.literal(entry.token.token_type, &value, &config, mode)?,
            ModeValue::Reference(path) => match self.syntax {
                Syntax::Css if self.in_output(&path) => self.syntax.variable(&self.ctx.variable_name(&path)),
                _ => self.inline(&path, mode)?,
            },
        };
        Ok(Some(rendered))
    }

    /// The value of a style token. `None` for empty composites.
    pub fn style_value(&self, token: &Token) -> Result<Option<StyleValue>> {
        let Some(ModeValue::Literal(value)) = token.value.for_mode("") else {
            return Ok(None);
        };
        let config = self.ctx.config(token);
        match value {
            Value::Composite(properties) => {
                let properties = self.composite(&properties)?;
                Ok((!properties.is_empty()).then_some(StyleValue::Properties(properties)))
            }
            other => Ok(Some(StyleValue::Single(self.literal(
                token.token_type,
                &other,
                &config,
                "",
            )?))),
        }
    }

    fn composite(&self, properties: &IndexMap<String, String>) -> Result<Vec<(String, String)>> {
        properties
            .iter()
            .map(|(property, text)| Ok((property.clone(), self.placeholders(text)?)))
            .collect()
    }

    fn literal(&self, token_type: TokenType, value: &Value, config: &TokenConfig, mode: &str) -> Result<String> {
        Ok(match value {
            Value::Color(color) if has_placeholder(color) => self.placeholders(color)?,
            Value::Color(color) => hex_to_format(color, config.color_format),
            Value::Number(n) if token_type == TokenType::Number => self.number(*n, config, mode)?,
            Value::Number(n) => format_number(*n, config.precision),
            Value::String(s) => self.placeholders(s)?,
            Value::Boolean(b) => b.to_string(),
            Value::Composite(properties) => self
                .composite(properties)?
                .into_iter()
                .map(|(property, value)| format!("{}: {}", property, value))
                .collect::<Vec<_>>()
                .join("; "),
        })
    }

    fn number(&self, n: f64, config: &TokenConfig, mode: &str) -> Result<String> {
        let (value, rem_base) = match config.unit {
            Unit::Percent => (n * 100.0, DEFAULT_REM_BASE),
            Unit::Rem => (n, self.ctx.resolver().rem_base(&config.rem_base, mode)?),
            _ => (n, DEFAULT_REM_BASE),
        };
        Ok(format_with_unit(value, config.unit, rem_base, config.precision))
    }

    /// Follow a reference through the document and render the literal it
    /// ends at, or a sentinel.
    fn inline(&self, path: &TokenPath, mode: &str) -> Result<String> {
        match self.ctx.resolver().resolve(path, mode) {
            Ok(resolved) => {
                let config = self.ctx.config(resolved.token);
                self.literal(resolved.token.token_type, &resolved.value, &config, mode)
            }
            Err(issue) => Ok(issue.sentinel().to_string()),
        }
    }

    fn in_output(&self, path: &TokenPath) -> bool {
        self.ctx.includes(&path.collection) && self.ctx.document.token(path).is_some()
    }

    /// Replace `{Collection.path}` placeholders with variables, or inline
    /// values when the target is not part of the output.
    fn placeholders(&self, text: &str) -> Result<String> {
        if !has_placeholder(text) {
            return Ok(text.to_string());
        }
        let mut failure: Option<ExportError> = None;
        let rendered = render_placeholders(text, |path| {
            let result = if self.in_output(path) {
                Ok(self.syntax.variable(&self.ctx.variable_name(path)))
            } else {
                self.inline(path, "")
            };
            result.unwrap_or_else(|e| {
                failure.get_or_insert(e);
                String::new()
            })
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(rendered),
        }
    }

    /// The expression with references rewritten, or `None` when a
    /// reference points outside the output.
    fn calc(&self, expression: &str, config: &TokenConfig, mode: &str) -> Result<Option<String>> {
        let mut names: Vec<(String, Option<String>)> = Vec::new();
        for reference in extract_references(expression) {
            let name = match reference.syntax {
                ReferenceSyntax::CssVar => Some(reference.key.trim_start_matches("--").to_string()),
                ReferenceSyntax::Path => self.output_name(&reference.key)?,
            };
            names.push((reference.key, name));
        }

        let divisor = match &config.rem_base {
            RemBase::Variable(path) => match self.output_name(path)? {
                Some(name) => RemDivisor::Variable(name),
                None => RemDivisor::Value(self.ctx.resolver().rem_base(&config.rem_base, mode)?),
            },
            RemBase::Value(v) => RemDivisor::Value(*v),
        };

        let name_of = |reference: &Reference| {
            names
                .iter()
                .find(|(key, _)| *key == reference.key)
                .and_then(|(_, name)| name.clone())
        };
        Ok(match self.syntax {
            Syntax::Css => format_for_css(expression, config.unit, &divisor, config.precision, name_of),
            Syntax::Scss => format_for_scss(expression, config.unit, &divisor, config.precision, name_of),
        })
    }

    /// Output name of the token a loose path refers to, if it is emitted.
    fn output_name(&self, path: &str) -> Result<Option<String>> {
        Ok(self
            .ctx
            .resolver()
            .find(path)?
            .filter(|target| self.in_output(target))
            .map(|target| self.ctx.variable_name(&target)))
    }
}
