use indexmap::IndexMap;
use tokenweave_core::{Effect, EffectStyle, Token, TokenType, TokenValue, Value};

use super::paint::with_description;
use super::StyleResolver;

impl StyleResolver<'_, '_> {
    /// An effect style as `box-shadow`, `filter` and `backdrop-filter` values.
    pub fn effect(&self, style: &EffectStyle) -> Option<Token> {
        let mut shadows = Vec::new();
        let mut props = IndexMap::new();

        for effect in &style.effects {
            match effect {
                Effect::DropShadow {
                    color,
                    offset,
                    radius,
                    spread,
                    visible: true,
                    bound_variables,
                }
                | Effect::InnerShadow {
                    color,
                    offset,
                    radius,
                    spread,
                    visible: true,
                    bound_variables,
                } => {
                    let inset = if matches!(effect, Effect::InnerShadow { .. }) {
                        "inset "
                    } else {
                        ""
                    };
                    shadows.push(format!(
                        "{}{} {} {} {} {}",
                        inset,
                        self.bound_or(bound_variables, "offsetX", self.px(offset.x)),
                        self.bound_or(bound_variables, "offsetY", self.px(offset.y)),
                        self.bound_or(bound_variables, "radius", self.px(*radius)),
                        self.bound_or(bound_variables, "spread", self.px(*spread)),
                        self.bound_or(bound_variables, "color", color.to_hex()),
                    ));
                }
                Effect::LayerBlur {
                    radius,
                    visible: true,
                    bound_variables,
                } => {
                    let radius = self.bound_or(bound_variables, "radius", self.px(*radius));
                    props.insert("filter".to_string(), format!("blur({})", radius));
                }
                Effect::BackgroundBlur {
                    radius,
                    visible: true,
                    bound_variables,
                } => {
                    let radius = self.bound_or(bound_variables, "radius", self.px(*radius));
                    props.insert("backdrop-filter".to_string(), format!("blur({})", radius));
                }
                _ => {}
            }
        }

        if !shadows.is_empty() {
            props.insert("box-shadow".to_string(), shadows.join(", "));
            props.sort_by(|a, _, b, _| (a != "box-shadow").cmp(&(b != "box-shadow")));
        }
        if props.is_empty() {
            return None;
        }

        Some(with_description(
            Token::new(TokenType::Shadow, TokenValue::Single(Value::Composite(props))),
            &style.description,
        ))
    }
}
