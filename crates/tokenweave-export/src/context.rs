//! Per-conversion state shared by every converter.

use tokenweave_core::{
    CollectionTokens, ConversionSettings, Document, Token, TokenConfig, TokenPath,
};
use tokenweave_naming::NameFormatter;
use tokenweave_resolver::{DocumentResolver, ResolutionContext};

/// Document, settings and the lookups derived from them.
///
/// Built fresh for every `convert` call.
pub struct ConvertContext<'d> {
    pub document: &'d Document,
    pub settings: &'d ConversionSettings,
    resolver: DocumentResolver<'d>,
    formatter: NameFormatter,
    defaults: TokenConfig,
}

impl<'d> ConvertContext<'d> {
    pub fn new(document: &'d Document, settings: &'d ConversionSettings) -> Self {
        let ctx = ResolutionContext::from_settings(settings);
        Self {
            document,
            settings,
            resolver: DocumentResolver::new(document, &ctx),
            formatter: NameFormatter::new(&settings.name_format_rules, &settings.prefix),
            defaults: ctx.defaults,
        }
    }

    pub fn resolver(&self) -> &DocumentResolver<'d> {
        &self.resolver
    }

    /// Collections that pass the settings filter, in document order.
    pub fn collections(&self) -> Vec<&'d CollectionTokens> {
        self.document
            .collections
            .values()
            .filter(|c| self.settings.includes_collection(&c.id, &c.name))
            .collect()
    }

    /// Whether tokens of `collection` appear in this output.
    pub fn includes(&self, collection: &str) -> bool {
        self.document
            .collection(collection)
            .is_some_and(|c| self.settings.includes_collection(&c.id, &c.name))
    }

    /// Output name (without `--` or `$`) for a variable token.
    pub fn variable_name(&self, path: &TokenPath) -> String {
        let mut raw = path.segments.join("/");
        if self.settings.include_collection_name {
            raw = format!("{}/{}", path.collection, raw);
        }
        self.formatter.format(&raw)
    }

    /// Output name for a style token.
    pub fn style_name(&self, segments: &[String]) -> String {
        self.formatter.format(&segments.join("/"))
    }

    /// Settings defaults overlaid with the token's directives.
    pub fn config(&self, token: &Token) -> TokenConfig {
        self.defaults.merge(&token.directives())
    }

    /// The mode used when one flat value per token is needed.
    pub fn flat_mode<'c>(&self, collection: &'c CollectionTokens) -> &'c str {
        if collection.modes.iter().any(|m| *m == collection.default_mode) {
            return &collection.default_mode;
        }
        collection
            .modes
            .first()
            .map(String::as_str)
            .unwrap_or(&collection.default_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenweave_core::{NameFormatRule, TokenGroup};

    fn document() -> Document {
        let mut doc = Document::default();
        for (id, name) in [("c1", "Colors"), ("c2", "Spacing")] {
            doc.collections.insert(
                name.to_string(),
                CollectionTokens {
                    id: id.to_string(),
                    name: name.to_string(),
                    modes: vec!["Light".into(), "Dark".into()],
                    default_mode: "Dark".into(),
                    tokens: TokenGroup::new(),
                },
            );
        }
        doc
    }

    #[test]
    fn test_collection_filter() {
        let doc = document();
        let settings = ConversionSettings {
            selected_collections: vec!["c2".into()],
            ..Default::default()
        };
        let ctx = ConvertContext::new(&doc, &settings);

        let names: Vec<&str> = ctx.collections().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Spacing"]);
        assert!(ctx.includes("Spacing"));
        assert!(!ctx.includes("Colors"));
        assert!(!ctx.includes("Missing"));
    }

    #[test]
    fn test_variable_names() {
        let doc = document();
        let path = TokenPath::new("Colors", ["brand", "primaryDark"]);

        let plain = ConversionSettings::default();
        assert_eq!(ConvertContext::new(&doc, &plain).variable_name(&path), "brand-primary-dark");

        let qualified = ConversionSettings {
            prefix: "ds".into(),
            include_collection_name: true,
            ..Default::default()
        };
        assert_eq!(
            ConvertContext::new(&doc, &qualified).variable_name(&path),
            "ds-colors-brand-primary-dark"
        );

        let ruled = ConversionSettings {
            name_format_rules: vec![NameFormatRule::new("brand/*", "b-${1:snake}")],
            ..Default::default()
        };
        assert_eq!(ConvertContext::new(&doc, &ruled).variable_name(&path), "b-primarydark");
    }

    #[test]
    fn test_flat_mode_prefers_default() {
        let doc = document();
        let settings = ConversionSettings::default();
        let ctx = ConvertContext::new(&doc, &settings);
        let colors = doc.collection("Colors").unwrap();
        assert_eq!(ctx.flat_mode(colors), "Dark");

        let mut odd = colors.clone();
        odd.default_mode = "Gone".into();
        assert_eq!(ctx.flat_mode(&odd), "Light");
    }
}
