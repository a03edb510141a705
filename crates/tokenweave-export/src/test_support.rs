use indexmap::IndexMap;
use tokenweave_core::{
    CollectionTokens, Document, ModeValue, RemBase, StyleGroups, Token, TokenDirectives,
    TokenExtensions, TokenGroup, TokenPath, TokenType, TokenValue, Unit, Value,
};

pub fn color(hex: &str) -> Token {
    Token::new(TokenType::Color, TokenValue::Single(Value::Color(hex.to_string())))
}

pub fn number(n: f64) -> Token {
    Token::new(TokenType::Number, TokenValue::Single(Value::Number(n)))
}

pub fn reference(token_type: TokenType, collection: &str, segments: &[&str]) -> Token {
    Token::new(
        token_type,
        TokenValue::Reference(TokenPath::new(collection, segments.iter().copied())),
    )
}

pub fn with_directives(mut token: Token, directives: TokenDirectives) -> Token {
    token.extensions = Some(TokenExtensions {
        directives,
        source_type: None,
    });
    token
}

fn collection(id: &str, name: &str, modes: &[&str], tokens: TokenGroup) -> CollectionTokens {
    CollectionTokens {
        id: id.to_string(),
        name: name.to_string(),
        modes: modes.iter().map(|m| m.to_string()).collect(),
        default_mode: modes[0].to_string(),
        tokens,
    }
}

/// Colors, Spacing, a two-mode Theme and Typography, plus one paint and
/// one text style.
pub fn document() -> Document {
    let mut colors = TokenGroup::new();
    colors.insert(&["color", "primary"], color("#ff0000")).unwrap();
    colors
        .insert(&["color", "accent"], reference(TokenType::Color, "Colors", &["color", "primary"]))
        .unwrap();

    let mut spacing = TokenGroup::new();
    spacing.insert(&["spacing", "sm"], number(8.0)).unwrap();
    let lg = with_directives(
        number(16.0),
        TokenDirectives {
            unit: Some(Unit::Rem),
            rem_base: Some(RemBase::Variable("typography/rem-base".into())),
            expression: Some("'Spacing/sm' * 2".into()),
            ..Default::default()
        },
    );
    spacing.insert(&["spacing", "lg"], lg).unwrap();

    let mut bg = IndexMap::new();
    bg.insert("Light".to_string(), ModeValue::Literal(Value::Color("#ffffff".into())));
    bg.insert(
        "Dark".to_string(),
        ModeValue::Reference(TokenPath::new("Colors", ["color", "primary"])),
    );
    let mut light_only = IndexMap::new();
    light_only.insert("Light".to_string(), ModeValue::Literal(Value::Number(0.5)));
    let mut theme = TokenGroup::new();
    theme
        .insert(&["surface", "bg"], Token::new(TokenType::Color, TokenValue::PerMode(bg)))
        .unwrap();
    theme
        .insert(
            &["surface", "opacity"],
            with_directives(
                Token::new(TokenType::Number, TokenValue::PerMode(light_only)),
                TokenDirectives {
                    unit: Some(Unit::Percent),
                    ..Default::default()
                },
            ),
        )
        .unwrap();

    let mut typography = TokenGroup::new();
    typography
        .insert(
            &["typography", "rem-base"],
            with_directives(
                number(16.0),
                TokenDirectives {
                    unit: Some(Unit::None),
                    ..Default::default()
                },
            ),
        )
        .unwrap();

    let mut styles = StyleGroups::default();
    styles
        .paint
        .insert(&["Brand", "Primary"], color("{Colors.color.primary}"))
        .unwrap();
    let mut heading = IndexMap::new();
    heading.insert("font-family".to_string(), "Inter".to_string());
    heading.insert("font-size".to_string(), "32px".to_string());
    styles
        .text
        .insert(
            &["Heading", "H1"],
            Token::new(TokenType::Typography, TokenValue::Single(Value::Composite(heading))),
        )
        .unwrap();

    let mut doc = Document::default();
    doc.collections.insert("Colors".into(), collection("c1", "Colors", &["Default"], colors));
    doc.collections.insert("Spacing".into(), collection("c2", "Spacing", &["Default"], spacing));
    doc.collections.insert("Theme".into(), collection("c3", "Theme", &["Light", "Dark"], theme));
    doc.collections
        .insert("Typography".into(), collection("c4", "Typography", &["Default"], typography));
    doc.styles = Some(styles);
    doc.metadata.file_name = "Tokens".into();
    doc.metadata.generated_at = "2024-01-01T00:00:00Z".into();
    doc
}
