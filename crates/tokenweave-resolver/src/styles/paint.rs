use tokenweave_core::styles::ColorStop;
use tokenweave_core::{HostColor, Paint, PaintStyle, Token, TokenType, TokenValue, Value};

use super::StyleResolver;

impl StyleResolver<'_, '_> {
    /// A paint style as a color (single solid fill) or a background value.
    ///
    /// Hidden and image paints are ignored; `None` when nothing is left.
    pub fn paint(&self, style: &PaintStyle) -> Option<Token> {
        let paints: Vec<&Paint> = style
            .paints
            .iter()
            .filter(|p| p.is_visible() && !matches!(p, Paint::Image { .. }))
            .collect();

        let token = match paints.as_slice() {
            [] => return None,
            [Paint::Solid {
                color,
                opacity,
                bound_variables,
                ..
            }] => Token::new(
                TokenType::Color,
                TokenValue::Single(Value::Color(self.bound_or(
                    bound_variables,
                    "color",
                    with_opacity(color, *opacity).to_hex(),
                ))),
            ),
            layers => {
                // Host order is bottom-up, CSS backgrounds list the top layer first
                let layers: Vec<String> = layers.iter().rev().map(|p| self.layer(p)).collect();
                Token::new(TokenType::String, TokenValue::Single(Value::String(layers.join(", "))))
            }
        };

        Some(with_description(token, &style.description))
    }

    fn layer(&self, paint: &Paint) -> String {
        match paint {
            Paint::Solid {
                color,
                opacity,
                bound_variables,
                ..
            } => {
                let color = self.bound_or(bound_variables, "color", with_opacity(color, *opacity).to_hex());
                format!("linear-gradient({}, {})", color, color)
            }
            Paint::GradientLinear {
                gradient_stops,
                angle,
                opacity,
                ..
            } => format!(
                "linear-gradient({}deg, {})",
                self.number(*angle),
                self.stops(gradient_stops, *opacity)
            ),
            Paint::GradientRadial {
                gradient_stops,
                opacity,
                ..
            } => format!("radial-gradient(circle, {})", self.stops(gradient_stops, *opacity)),
            Paint::Image { .. } => String::new(),
        }
    }

    fn stops(&self, stops: &[ColorStop], opacity: f64) -> String {
        stops
            .iter()
            .map(|stop| {
                let color = self.bound_or(
                    &stop.bound_variables,
                    "color",
                    with_opacity(&stop.color, opacity).to_hex(),
                );
                format!("{} {}%", color, self.number(stop.position * 100.0))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn with_opacity(color: &HostColor, opacity: f64) -> HostColor {
    HostColor {
        a: color.a * opacity,
        ..*color
    }
}

pub(super) fn with_description(mut token: Token, description: &str) -> Token {
    let description = description.trim();
    if !description.is_empty() {
        token.description = Some(description.to_string());
    }
    token
}
