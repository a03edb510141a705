use indexmap::IndexMap;
use tokenweave_core::{
    LetterSpacing, LineHeight, TextCase, TextDecoration, TextStyle, Token, TokenType, TokenValue,
    Value,
};

use super::paint::with_description;
use super::{font_weight, StyleResolver};

impl StyleResolver<'_, '_> {
    /// A text style as a typography token keyed by CSS property.
    pub fn text(&self, style: &TextStyle) -> Token {
        let bindings = &style.bound_variables;
        let mut props = IndexMap::new();

        props.insert(
            "font-family".to_string(),
            self.bound_or(bindings, "fontFamily", font_family(&style.font_name.family)),
        );
        props.insert(
            "font-weight".to_string(),
            self.bound_or(bindings, "fontWeight", font_weight(&style.font_name.style).to_string()),
        );
        if style.font_name.style.to_lowercase().contains("italic") {
            props.insert("font-style".to_string(), "italic".to_string());
        }
        props.insert(
            "font-size".to_string(),
            self.bound_or(bindings, "fontSize", self.px(style.font_size)),
        );

        let line_height = match style.line_height {
            LineHeight::Auto => "normal".to_string(),
            LineHeight::Pixels { value } => self.px(value),
            LineHeight::Percent { value } => self.number(value / 100.0),
        };
        props.insert(
            "line-height".to_string(),
            self.bound_or(bindings, "lineHeight", line_height),
        );

        let letter_spacing = match style.letter_spacing {
            LetterSpacing::Pixels { value } => self.px(value),
            LetterSpacing::Percent { value } if value == 0.0 => "0".to_string(),
            LetterSpacing::Percent { value } => format!("{}em", self.number(value / 100.0)),
        };
        props.insert(
            "letter-spacing".to_string(),
            self.bound_or(bindings, "letterSpacing", letter_spacing),
        );

        match style.text_case {
            TextCase::Original => {}
            TextCase::Upper => {
                props.insert("text-transform".to_string(), "uppercase".to_string());
            }
            TextCase::Lower => {
                props.insert("text-transform".to_string(), "lowercase".to_string());
            }
            TextCase::Title => {
                props.insert("text-transform".to_string(), "capitalize".to_string());
            }
            TextCase::SmallCaps => {
                props.insert("font-variant".to_string(), "small-caps".to_string());
            }
            TextCase::SmallCapsForced => {
                props.insert("font-variant".to_string(), "all-small-caps".to_string());
            }
        }
        match style.text_decoration {
            TextDecoration::None => {}
            TextDecoration::Underline => {
                props.insert("text-decoration".to_string(), "underline".to_string());
            }
            TextDecoration::Strikethrough => {
                props.insert("text-decoration".to_string(), "line-through".to_string());
            }
        }

        with_description(
            Token::new(TokenType::Typography, TokenValue::Single(Value::Composite(props))),
            &style.description,
        )
    }
}

/// Quote families containing anything but letters, digits and hyphens.
fn font_family(family: &str) -> String {
    if family.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        family.to_string()
    } else {
        format!("\"{}\"", family.replace('"', ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VariableGraph;
    use crate::styles::test_support::host;

    fn composite(token: &Token) -> &IndexMap<String, String> {
        match &token.value {
            TokenValue::Single(Value::Composite(props)) => props,
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn test_text_style() {
        let (variables, collections) = host();
        let graph = VariableGraph::new(&variables, &collections);
        let resolver = StyleResolver::new(&graph, 4);
        let style: TextStyle = serde_json::from_str(
            r#"{
                "id": "S:1", "name": "Heading/H1",
                "fontName": {"family": "Open Sans", "style": "Bold Italic"},
                "fontSize": 32,
                "lineHeight": {"unit": "PERCENT", "value": 120},
                "letterSpacing": {"unit": "PERCENT", "value": -2},
                "textCase": "UPPER",
                "textDecoration": "UNDERLINE"
            }"#,
        )
        .unwrap();

        let token = resolver.text(&style);
        assert_eq!(token.token_type, TokenType::Typography);
        let props = composite(&token);
        assert_eq!(props["font-family"], "\"Open Sans\"");
        assert_eq!(props["font-weight"], "700");
        assert_eq!(props["font-style"], "italic");
        assert_eq!(props["font-size"], "32px");
        assert_eq!(props["line-height"], "1.2");
        assert_eq!(props["letter-spacing"], "-0.02em");
        assert_eq!(props["text-transform"], "uppercase");
        assert_eq!(props["text-decoration"], "underline");
    }

    #[test]
    fn test_bound_font_size() {
        let (variables, collections) = host();
        let graph = VariableGraph::new(&variables, &collections);
        let resolver = StyleResolver::new(&graph, 4);
        let style: TextStyle = serde_json::from_str(
            r#"{
                "id": "S:2", "name": "Body",
                "fontName": {"family": "Inter", "style": "Regular"},
                "fontSize": 16,
                "lineHeight": {"unit": "AUTO"},
                "letterSpacing": {"unit": "PIXELS", "value": 0},
                "boundVariables": {"fontSize": {"type": "VARIABLE_ALIAS", "id": "v-size"}}
            }"#,
        )
        .unwrap();

        let token = resolver.text(&style);
        let props = composite(&token);
        assert_eq!(props["font-family"], "Inter");
        assert_eq!(props["font-size"], "{Tokens.font.size.body}");
        assert_eq!(props["line-height"], "normal");
        assert_eq!(props["letter-spacing"], "0");
        assert!(!props.contains_key("text-transform"));
    }
}
