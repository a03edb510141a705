//! Host variables and styles to a token [`Document`].

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use thiserror::Error;
use tokenweave_core::{
    natural_cmp, parse_description, split_name, CollectionTokens, Document, EffectStyle,
    GridStyle, Metadata, ModeValue, PaintStyle, ResolveError, StyleCategory, StyleGroups,
    TextStyle, Token, TokenConfig, TokenExtensions, TokenGroup, TokenType, TokenValue, Unit,
    Value, Variable, VariableCollection, VariableSource, VariableValue,
};
use tokenweave_resolver::{
    evaluate_variable, resolve_alias, Evaluation, ResolutionContext, ResolveIssue, StyleResolver,
    VariableGraph,
};

use crate::options::SerializeOptions;

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// The four style lists handed over by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleSources<'a> {
    pub paint: &'a [PaintStyle],
    pub text: &'a [TextStyle],
    pub effect: &'a [EffectStyle],
    pub grid: &'a [GridStyle],
}

impl<'a> StyleSources<'a> {
    pub fn from_source<S: VariableSource + ?Sized>(source: &'a S) -> Self {
        Self {
            paint: source.paint_styles(),
            text: source.text_styles(),
            effect: source.effect_styles(),
            grid: source.grid_styles(),
        }
    }
}

/// Build the document for everything `source` provides.
pub fn serialize_source<S: VariableSource + ?Sized>(
    source: &S,
    options: &SerializeOptions,
) -> Result<Document, SerializeError> {
    serialize(
        source.variables(),
        source.collections(),
        source.file_name(),
        options,
        Some(StyleSources::from_source(source)),
    )
}

/// Build the token document.
///
/// Soft problems (unresolved or circular aliases, expression fallbacks,
/// conflicting paths) are logged and recorded in [`Document::diagnostics`].
/// Only an ambiguous expression reference fails the call.
pub fn serialize(
    variables: &[Variable],
    collections: &[VariableCollection],
    file_name: &str,
    options: &SerializeOptions,
    styles: Option<StyleSources<'_>>,
) -> Result<Document, SerializeError> {
    let graph = VariableGraph::new(variables, collections);
    let ctx = ResolutionContext::new(options.defaults.clone()).with_max_depth(options.max_depth);
    let mut serializer = Serializer {
        graph: &graph,
        ctx: &ctx,
        diagnostics: Vec::new(),
    };

    let mut selected: Vec<&VariableCollection> = collections
        .iter()
        .filter(|c| options.includes_collection(&c.id, &c.name))
        .collect();
    selected.sort_by(|a, b| natural_cmp(&a.name, &b.name));

    let mut document = Document {
        metadata: Metadata {
            file_name: file_name.to_string(),
            generated_at: options
                .generated_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        },
        ..Default::default()
    };

    for collection in selected {
        if document.collections.contains_key(&collection.name) {
            serializer.diagnostic(format!(
                "Skipping collection '{}' ({}): another collection has the same name",
                collection.name, collection.id
            ));
            continue;
        }
        let tokens = serializer.collection(collection, variables)?;
        document.collections.insert(collection.name.clone(), tokens);
    }

    if let Some(styles) = styles {
        let groups = serializer.styles(styles, options);
        if !groups.is_empty() {
            document.styles = Some(groups);
        }
    }

    document.diagnostics = serializer.diagnostics;
    Ok(document)
}

struct Serializer<'g, 'a> {
    graph: &'g VariableGraph<'a>,
    ctx: &'g ResolutionContext,
    diagnostics: Vec<String>,
}

/// A variable's value for one mode plus the unit an expression settled on.
struct ModeOutcome {
    value: ModeValue,
    unit: Option<Unit>,
}

impl<'g, 'a> Serializer<'g, 'a> {
    fn diagnostic(&mut self, message: String) {
        log::warn!("{}", message);
        self.diagnostics.push(message);
    }

    fn collection(
        &mut self,
        collection: &'a VariableCollection,
        variables: &'a [Variable],
    ) -> Result<CollectionTokens, SerializeError> {
        let mut members: Vec<&'a Variable> = variables
            .iter()
            .filter(|v| v.variable_collection_id == collection.id)
            .collect();
        members.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        log::debug!("serializing collection '{}' ({} variables)", collection.name, members.len());

        let default_mode = collection.default_mode();
        let mut tokens = TokenGroup::new();
        for variable in members {
            let Some(token) = self.token(collection, variable)? else {
                continue;
            };
            let segments = split_name(&variable.name);
            if let Err(e) = tokens.insert(&segments, token) {
                self.diagnostic(format!("Skipping variable '{}': {}", variable.name, e));
            }
        }

        Ok(CollectionTokens {
            id: collection.id.clone(),
            name: collection.name.clone(),
            modes: collection.modes.iter().map(|m| m.name.clone()).collect(),
            default_mode: default_mode.map(|m| m.name.clone()).unwrap_or_default(),
            tokens,
        })
    }

    fn token(
        &mut self,
        collection: &'a VariableCollection,
        variable: &'a Variable,
    ) -> Result<Option<Token>, SerializeError> {
        let parsed = parse_description(&variable.description);
        let config = self.ctx.defaults.merge(&parsed.directives);
        let mut evaluated_unit = None;

        let value = if collection.modes.len() > 1 {
            let mut per_mode = IndexMap::new();
            for mode in &collection.modes {
                if let Some(outcome) = self.mode_value(variable, &mode.mode_id, &config)? {
                    evaluated_unit = evaluated_unit.or(outcome.unit);
                    per_mode.insert(mode.name.clone(), outcome.value);
                }
            }
            if per_mode.is_empty() {
                log::debug!("variable '{}' has no values", variable.name);
                return Ok(None);
            }
            TokenValue::PerMode(per_mode)
        } else {
            let Some(mode) = collection.default_mode() else {
                return Ok(None);
            };
            let Some(outcome) = self.mode_value(variable, &mode.mode_id, &config)? else {
                log::debug!("variable '{}' has no value for mode '{}'", variable.name, mode.name);
                return Ok(None);
            };
            evaluated_unit = outcome.unit;
            match outcome.value {
                ModeValue::Literal(value) => TokenValue::Single(value),
                ModeValue::Reference(path) => TokenValue::Reference(path),
            }
        };

        let mut directives = parsed.directives;
        if let Some(unit) = evaluated_unit.filter(|u| *u != config.unit) {
            directives.unit = Some(unit);
        }
        let extensions = (!directives.is_empty()).then(|| TokenExtensions {
            directives,
            source_type: Some(variable.resolved_type.as_str().to_string()),
        });

        Ok(Some(Token {
            token_type: TokenType::from_resolved(variable.resolved_type),
            value,
            description: parsed.text,
            extensions,
        }))
    }

    /// The value for one mode; `None` when the variable has no value there.
    fn mode_value(
        &mut self,
        variable: &'a Variable,
        mode_id: &str,
        config: &TokenConfig,
    ) -> Result<Option<ModeOutcome>, SerializeError> {
        let Some(value) = variable.value_for_mode(mode_id) else {
            return Ok(None);
        };

        match evaluate_variable(self.graph, variable, mode_id, config, self.ctx)? {
            Some(Evaluation::Value(n)) => {
                return Ok(Some(ModeOutcome {
                    value: ModeValue::Literal(Value::Number(n.value)),
                    unit: Some(n.unit),
                }))
            }
            Some(Evaluation::Fallback { warnings }) => {
                for warning in warnings {
                    self.diagnostic(format!(
                        "Expression for '{}' fell back to its value: {}",
                        variable.name, warning
                    ));
                }
            }
            None => {}
        }

        let value = match value {
            VariableValue::Alias(alias) => self.alias_value(variable, mode_id, &alias.id),
            VariableValue::Color(color) => ModeValue::Literal(Value::Color(color.to_hex())),
            VariableValue::Float(n) => ModeValue::Literal(Value::Number(*n)),
            VariableValue::Boolean(b) => ModeValue::Literal(Value::Boolean(*b)),
            VariableValue::String(s) => ModeValue::Literal(Value::String(s.clone())),
        };
        Ok(Some(ModeOutcome { value, unit: None }))
    }

    /// A `$ref` to the alias target, or a sentinel when it cannot resolve.
    fn alias_value(&mut self, variable: &'a Variable, mode_id: &str, target_id: &str) -> ModeValue {
        let path = self
            .graph
            .variable(target_id)
            .and_then(|target| self.graph.reference_path(target));
        let issue = match path {
            None => ResolveIssue::UnresolvedAlias,
            Some(path) => match resolve_alias(self.graph, variable, mode_id, self.ctx) {
                Err(ResolveIssue::CircularReference) => ResolveIssue::CircularReference,
                _ => return ModeValue::Reference(path),
            },
        };

        let reason = match issue {
            ResolveIssue::UnresolvedAlias => format!("target '{}' not found", target_id),
            ResolveIssue::CircularReference => "circular reference".to_string(),
        };
        self.diagnostic(format!("Alias in '{}' could not be resolved: {}", variable.name, reason));
        ModeValue::Literal(Value::String(issue.sentinel().to_string()))
    }

    fn styles(&mut self, styles: StyleSources<'_>, options: &SerializeOptions) -> StyleGroups {
        let resolver = StyleResolver::new(self.graph, self.ctx.defaults.precision);
        let mut groups = StyleGroups::default();

        for category in StyleCategory::ALL {
            if !options.includes_style(category) {
                continue;
            }
            let mut entries: Vec<(&str, Option<Token>)> = match category {
                StyleCategory::Paint => styles
                    .paint
                    .iter()
                    .map(|s| (s.name.as_str(), resolver.paint(s)))
                    .collect(),
                StyleCategory::Text => styles
                    .text
                    .iter()
                    .map(|s| (s.name.as_str(), Some(resolver.text(s))))
                    .collect(),
                StyleCategory::Effect => styles
                    .effect
                    .iter()
                    .map(|s| (s.name.as_str(), resolver.effect(s)))
                    .collect(),
                StyleCategory::Grid => styles
                    .grid
                    .iter()
                    .map(|s| (s.name.as_str(), resolver.grid(s)))
                    .collect(),
            };
            entries.sort_by(|a, b| natural_cmp(a.0, b.0));
            log::debug!("serializing {} {} styles", entries.len(), category.as_str());

            let group = groups.get_mut(category);
            for (name, token) in entries {
                let Some(token) = token else {
                    log::debug!("style '{}' has nothing to emit", name);
                    continue;
                };
                if let Err(e) = group.insert(&split_name(name), token) {
                    self.diagnostic(format!("Skipping {} style '{}': {}", category.as_str(), name, e));
                }
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokenweave_core::{HostColor, Mode, ResolvedType, TokenPath};

    fn collection(id: &str, name: &str, modes: &[(&str, &str)]) -> VariableCollection {
        VariableCollection {
            id: id.to_string(),
            name: name.to_string(),
            modes: modes
                .iter()
                .map(|(id, name)| Mode {
                    mode_id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            default_mode_id: modes[0].0.to_string(),
        }
    }

    fn variable(
        id: &str,
        name: &str,
        collection: &str,
        resolved_type: ResolvedType,
        values: &[(&str, VariableValue)],
    ) -> Variable {
        Variable {
            id: id.to_string(),
            name: name.to_string(),
            resolved_type,
            values_by_mode: values
                .iter()
                .map(|(mode, value)| (mode.to_string(), value.clone()))
                .collect(),
            variable_collection_id: collection.to_string(),
            description: String::new(),
        }
    }

    fn red() -> VariableValue {
        VariableValue::Color(HostColor {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        })
    }

    fn options() -> SerializeOptions {
        SerializeOptions::default().with_generated_at("2024-01-01T00:00:00Z")
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_single_mode_collection() {
        let collections = vec![collection("c1", "Colors", &[("m1", "Default")])];
        let variables = vec![
            variable("v1", "brand/primary", "c1", ResolvedType::Color, &[("m1", red())]),
            variable("v2", "spacing/sm", "c1", ResolvedType::Float, &[("m1", VariableValue::Float(8.0))]),
        ];

        let doc = serialize(&variables, &collections, "Tokens.fig", &options(), None).unwrap();
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            json["collections"]["Colors"]["brand"]["primary"],
            json!({ "$type": "color", "$value": "#ff0000" })
        );
        assert_eq!(json["collections"]["Colors"]["spacing"]["sm"]["$value"], json!(8));
        assert_eq!(json["$metadata"]["fileName"], json!("Tokens.fig"));
        assert_eq!(json["$metadata"]["generatedAt"], json!("2024-01-01T00:00:00Z"));
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn test_multi_mode_values_and_cross_collection_ref() {
        let collections = vec![
            collection("c1", "Primitives", &[("p", "Default")]),
            collection("c2", "Theme", &[("light", "Light"), ("dark", "Dark")]),
        ];
        let variables = vec![
            variable("v1", "red/500", "c1", ResolvedType::Color, &[("p", red())]),
            variable(
                "v2",
                "surface/accent",
                "c2",
                ResolvedType::Color,
                &[
                    ("light", VariableValue::alias("v1")),
                    ("dark", VariableValue::String("#000000".into())),
                ],
            ),
            variable(
                "v3",
                "surface/only-light",
                "c2",
                ResolvedType::Float,
                &[("light", VariableValue::Float(1.0))],
            ),
        ];

        let doc = serialize(&variables, &collections, "f", &options(), None).unwrap();
        let theme = doc.collection("Theme").unwrap();
        assert_eq!(theme.modes, vec!["Light", "Dark"]);
        assert_eq!(theme.default_mode, "Light");

        let accent = theme.tokens.get(&["surface", "accent"]).unwrap();
        assert_eq!(
            accent.value.for_mode("Light"),
            Some(ModeValue::Reference(TokenPath::new("Primitives", ["red", "500"])))
        );

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json["collections"]["Theme"]["surface"]["accent"]["$value"]["Light"],
            json!({ "$ref": "Primitives.red.500" })
        );
        assert_eq!(
            json["collections"]["Theme"]["surface"]["only-light"]["$value"],
            json!({ "Light": 1 })
        );
    }

    #[test]
    fn test_alias_sentinels() {
        init_logger();
        let collections = vec![collection("c1", "Colors", &[("m1", "Default")])];
        let variables = vec![
            variable("v1", "ghost", "c1", ResolvedType::Color, &[("m1", VariableValue::alias("missing"))]),
            variable("v2", "loop/a", "c1", ResolvedType::Color, &[("m1", VariableValue::alias("v3"))]),
            variable("v3", "loop/b", "c1", ResolvedType::Color, &[("m1", VariableValue::alias("v2"))]),
        ];

        let doc = serialize(&variables, &collections, "f", &options(), None).unwrap();
        let tokens = &doc.collection("Colors").unwrap().tokens;

        assert_eq!(
            tokens.get(&["ghost"]).unwrap().value,
            TokenValue::Single(Value::String("/* unresolved alias */".into()))
        );
        assert_eq!(
            tokens.get(&["loop", "a"]).unwrap().value,
            TokenValue::Single(Value::String("/* circular reference */".into()))
        );
        assert_eq!(doc.diagnostics.len(), 3);
    }

    #[test]
    fn test_description_directives_and_calc() {
        let collections = vec![collection("c1", "Spacing", &[("m1", "Default")])];
        let mut doubled = variable("v2", "spacing/lg", "c1", ResolvedType::Float, &[("m1", VariableValue::Float(1.0))]);
        doubled.description = "Large step.\ncalc: 'Spacing/base' * 2\nunit: rem".to_string();
        let variables = vec![
            variable("v1", "spacing/base", "c1", ResolvedType::Float, &[("m1", VariableValue::Float(8.0))]),
            doubled,
        ];

        let doc = serialize(&variables, &collections, "f", &options(), None).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        let lg = &json["collections"]["Spacing"]["spacing"]["lg"];

        assert_eq!(lg["$value"], json!(16));
        assert_eq!(lg["$description"], json!("Large step."));
        assert_eq!(
            lg["$extensions"]["tokenweave"],
            json!({ "unit": "rem", "expression": "'Spacing/base' * 2", "sourceType": "FLOAT" })
        );
    }

    #[test]
    fn test_failed_calc_falls_back_to_direct_value() {
        init_logger();
        let collections = vec![collection("c1", "Spacing", &[("m1", "Default")])];
        let mut broken = variable("v1", "gap", "c1", ResolvedType::Float, &[("m1", VariableValue::Float(4.0))]);
        broken.description = "calc: 'nowhere' * 2".to_string();

        let doc = serialize(&[broken], &collections, "f", &options(), None).unwrap();
        let gap = doc.collection("Spacing").unwrap().tokens.get(&["gap"]).unwrap();

        assert_eq!(gap.value, TokenValue::Single(Value::Number(4.0)));
        assert!(doc
            .diagnostics
            .iter()
            .any(|d| d.contains("Variable 'nowhere' not found")));
    }

    #[test]
    fn test_ambiguous_expression_reference_is_an_error() {
        let collections = vec![
            collection("c1", "A", &[("m1", "Default")]),
            collection("c2", "B", &[("m2", "Default")]),
        ];
        let mut user = variable("v3", "user", "c1", ResolvedType::Float, &[("m1", VariableValue::Float(1.0))]);
        user.description = "calc: 'base' * 2".to_string();
        let variables = vec![
            variable("v1", "base", "c1", ResolvedType::Float, &[("m1", VariableValue::Float(1.0))]),
            variable("v2", "base", "c2", ResolvedType::Float, &[("m2", VariableValue::Float(2.0))]),
            user,
        ];

        let err = serialize(&variables, &collections, "f", &options(), None).unwrap_err();
        assert!(matches!(
            err,
            SerializeError::Resolve(ResolveError::AmbiguousPath { .. })
        ));
    }

    #[test]
    fn test_filter_sort_and_conflicts() {
        init_logger();
        let collections = vec![
            collection("c2", "Spacing", &[("m2", "Default")]),
            collection("c1", "Colors", &[("m1", "Default")]),
            collection("c3", "Hidden", &[("m3", "Default")]),
        ];
        let variables = vec![
            variable("v1", "size/10", "c2", ResolvedType::Float, &[("m2", VariableValue::Float(10.0))]),
            variable("v2", "size/2", "c2", ResolvedType::Float, &[("m2", VariableValue::Float(2.0))]),
            variable("v3", "size/2/half", "c2", ResolvedType::Float, &[("m2", VariableValue::Float(1.0))]),
            variable("v4", "x", "c1", ResolvedType::Float, &[("m1", VariableValue::Float(1.0))]),
            variable("v5", "y", "c3", ResolvedType::Float, &[("m3", VariableValue::Float(1.0))]),
        ];
        let options = SerializeOptions {
            selected_collections: vec!["Colors".into(), "c2".into()],
            ..options()
        };

        let doc = serialize(&variables, &collections, "f", &options, None).unwrap();
        let names: Vec<&str> = doc.collections.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Colors", "Spacing"]);

        let sizes: Vec<String> = doc
            .collection("Spacing")
            .unwrap()
            .tokens
            .tokens()
            .into_iter()
            .map(|(path, _)| path.join("/"))
            .collect();
        assert_eq!(sizes, vec!["size/2", "size/10"]);
        assert_eq!(doc.diagnostics.len(), 1);
        assert!(doc.diagnostics[0].contains("size/2/half"));
    }

    #[test]
    fn test_json_keeps_document_order() {
        let collections = vec![
            collection("c2", "Spacing", &[("m2", "Default")]),
            collection("c1", "Colors", &[("m1", "Default")]),
        ];
        let variables = vec![
            variable("v1", "size/10", "c2", ResolvedType::Float, &[("m2", VariableValue::Float(10.0))]),
            variable("v2", "size/2", "c2", ResolvedType::Float, &[("m2", VariableValue::Float(2.0))]),
            variable("v3", "brand", "c1", ResolvedType::Color, &[("m1", red())]),
        ];

        let doc = serialize(&variables, &collections, "f", &options(), None).unwrap();
        let text = crate::json::to_json_string(&doc, false).unwrap();

        assert!(text.starts_with("{\n  \"$schema\": "));
        let position = |needle: &str| text.find(needle).unwrap();
        assert!(position("\"collections\"") < position("\"$metadata\""));
        assert!(position("\"Colors\"") < position("\"Spacing\""));
        assert!(position("\"2\": {") < position("\"10\": {"));
        assert!(position("\"$type\"") < position("\"$value\""));
    }

    #[test]
    fn test_duplicate_collection_name_is_skipped_before_serializing() {
        init_logger();
        let collections = vec![
            collection("c1", "Colors", &[("m1", "Default")]),
            collection("c2", "Colors", &[("m2", "Default")]),
        ];
        let variables = vec![
            variable("v1", "brand", "c1", ResolvedType::Color, &[("m1", red())]),
            variable("v2", "ghost", "c2", ResolvedType::Color, &[("m2", VariableValue::alias("missing"))]),
        ];

        let doc = serialize(&variables, &collections, "f", &options(), None).unwrap();
        let colors = doc.collection("Colors").unwrap();
        assert_eq!(colors.id, "c1");
        assert!(colors.tokens.get(&["brand"]).is_some());
        assert_eq!(doc.diagnostics.len(), 1);
        assert!(doc.diagnostics[0].contains("same name"));
    }

    #[test]
    fn test_missing_default_mode_value_skips_token() {
        let collections = vec![collection("c1", "Spacing", &[("m1", "Default")])];
        let variables = vec![variable("v1", "gap", "c1", ResolvedType::Float, &[("other", VariableValue::Float(1.0))])];

        let doc = serialize(&variables, &collections, "f", &options(), None).unwrap();
        assert_eq!(doc.token_count(), 0);
    }

    #[test]
    fn test_styles_are_grouped_by_category() {
        let style = PaintStyle {
            id: "S:1".into(),
            name: "Brand/Primary".into(),
            description: String::new(),
            paints: vec![tokenweave_core::Paint::Solid {
                color: HostColor { r: 0.0, g: 0.0, b: 1.0, a: 1.0 },
                opacity: 1.0,
                visible: true,
                bound_variables: Default::default(),
            }],
        };
        let styles = StyleSources {
            paint: std::slice::from_ref(&style),
            ..Default::default()
        };
        let with_styles = SerializeOptions {
            include_styles: true,
            ..options()
        };

        let doc = serialize(&[], &[], "f", &with_styles, Some(styles)).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json["$styles"]["paint"]["Brand"]["Primary"],
            json!({ "$type": "color", "$value": "#0000ff" })
        );

        let without = serialize(&[], &[], "f", &options(), Some(styles)).unwrap();
        assert!(without.styles.is_none());
    }
}
