//! Reference resolution over a token document.
//!
//! Converters resolve `$ref` values here at conversion time; the document
//! itself never has references inlined.

use std::collections::HashSet;

use tokenweave_core::{
    Document, ModeValue, PathIndex, RemBase, ResolveError, Token, TokenPath, Value,
};
use tokenweave_transform::DEFAULT_REM_BASE;

use crate::alias::ResolveIssue;
use crate::context::ResolutionContext;

/// The literal a reference chain ends at.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken<'d> {
    pub path: TokenPath,
    pub token: &'d Token,
    pub value: Value,
}

/// Path and reference lookups over one document.
#[derive(Debug)]
pub struct DocumentResolver<'d> {
    document: &'d Document,
    index: PathIndex<TokenPath>,
    max_depth: usize,
}

impl<'d> DocumentResolver<'d> {
    pub fn new(document: &'d Document, ctx: &ResolutionContext) -> Self {
        let mut index = PathIndex::new();
        for (name, collection) in &document.collections {
            for (segments, _) in collection.tokens.tokens() {
                let joined = segments.join("/");
                index.insert(name, &joined, TokenPath::new(name.clone(), segments));
            }
        }
        Self {
            document,
            index,
            max_depth: ctx.max_depth,
        }
    }

    pub fn document(&self) -> &'d Document {
        self.document
    }

    /// Find a token by dotted path (`Collection.a.b`) or slash path.
    pub fn find(&self, path: &str) -> Result<Option<TokenPath>, ResolveError> {
        if let Some(dotted) = TokenPath::parse_dotted(path) {
            if self.document.token(&dotted).is_some() {
                return Ok(Some(dotted));
            }
        }
        Ok(self.index.find(path)?.cloned())
    }

    /// `mode` if the collection has it, else the collection's default mode.
    pub fn mode_in(&self, collection: &str, mode: &str) -> Option<&'d str> {
        let collection = self.document.collection(collection)?;
        collection
            .modes
            .iter()
            .find(|m| *m == mode)
            .map(String::as_str)
            .or(Some(collection.default_mode.as_str()))
    }

    /// Follow references from `path` to a literal, reading `mode`.
    pub fn resolve(&self, path: &TokenPath, mode: &str) -> Result<ResolvedToken<'d>, ResolveIssue> {
        let mut visited: HashSet<TokenPath> = HashSet::new();
        let mut current = path.clone();
        let mut mode = mode.to_string();

        for _ in 0..=self.max_depth {
            if !visited.insert(current.clone()) {
                return Err(ResolveIssue::CircularReference);
            }
            let token = self
                .document
                .token(&current)
                .ok_or(ResolveIssue::UnresolvedAlias)?;
            let collection_mode = self
                .mode_in(&current.collection, &mode)
                .ok_or(ResolveIssue::UnresolvedAlias)?;

            match token
                .value
                .for_mode(collection_mode)
                .ok_or(ResolveIssue::UnresolvedAlias)?
            {
                ModeValue::Literal(value) => {
                    return Ok(ResolvedToken {
                        path: current,
                        token,
                        value,
                    })
                }
                ModeValue::Reference(next) => {
                    mode = collection_mode.to_string();
                    current = next;
                }
            }
        }

        Err(ResolveIssue::CircularReference)
    }

    /// The root font size in pixels for `rem_base`.
    ///
    /// Variable paths that do not resolve to a positive number fall back to
    /// the default with a warning. Ambiguous paths are an error.
    pub fn rem_base(&self, rem_base: &RemBase, mode: &str) -> Result<f64, ResolveError> {
        let path = match rem_base {
            RemBase::Value(v) if *v > 0.0 => return Ok(*v),
            RemBase::Value(_) => return Ok(DEFAULT_REM_BASE),
            RemBase::Variable(path) => path,
        };
        let Some(target) = self.find(path)? else {
            log::warn!("remBase variable '{}' not found, using {}", path, DEFAULT_REM_BASE);
            return Ok(DEFAULT_REM_BASE);
        };
        match self.resolve(&target, mode) {
            Ok(ResolvedToken {
                value: Value::Number(n),
                ..
            }) if n > 0.0 => Ok(n),
            _ => {
                log::warn!("remBase variable '{}' is not a positive number, using {}", path, DEFAULT_REM_BASE);
                Ok(DEFAULT_REM_BASE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tokenweave_core::{CollectionTokens, TokenGroup, TokenType, TokenValue};

    fn number(n: f64) -> Token {
        Token::new(TokenType::Number, TokenValue::Single(Value::Number(n)))
    }

    fn reference(collection: &str, segments: &[&str]) -> Token {
        Token::new(
            TokenType::Number,
            TokenValue::Reference(TokenPath::new(collection, segments.iter().copied())),
        )
    }

    fn collection(name: &str, modes: &[&str], tokens: TokenGroup) -> CollectionTokens {
        CollectionTokens {
            id: name.to_lowercase(),
            name: name.to_string(),
            modes: modes.iter().map(|m| m.to_string()).collect(),
            default_mode: modes[0].to_string(),
            tokens,
        }
    }

    fn document() -> Document {
        let mut spacing = TokenGroup::new();
        spacing.insert(&["spacing", "base"], number(8.0)).unwrap();
        spacing.insert(&["spacing", "alias"], reference("Spacing", &["spacing", "base"])).unwrap();
        spacing.insert(&["loop", "a"], reference("Spacing", &["loop", "b"])).unwrap();
        spacing.insert(&["loop", "b"], reference("Spacing", &["loop", "a"])).unwrap();

        let mut typography = TokenGroup::new();
        typography.insert(&["typography", "rem-base"], number(10.0)).unwrap();

        let mut per_mode = IndexMap::new();
        per_mode.insert("Light".to_string(), ModeValue::Literal(Value::Number(1.0)));
        per_mode.insert(
            "Dark".to_string(),
            ModeValue::Reference(TokenPath::new("Spacing", ["spacing", "base"])),
        );
        let mut theme = TokenGroup::new();
        theme
            .insert(&["gap"], Token::new(TokenType::Number, TokenValue::PerMode(per_mode)))
            .unwrap();

        let mut doc = Document::default();
        doc.collections.insert("Spacing".into(), collection("Spacing", &["Default"], spacing));
        doc.collections.insert("Typography".into(), collection("Typography", &["Default"], typography));
        doc.collections.insert("Theme".into(), collection("Theme", &["Light", "Dark"], theme));
        doc
    }

    #[test]
    fn test_resolve_reference_chain() {
        let doc = document();
        let resolver = DocumentResolver::new(&doc, &ResolutionContext::default());
        let resolved = resolver
            .resolve(&TokenPath::new("Spacing", ["spacing", "alias"]), "Default")
            .unwrap();
        assert_eq!(resolved.value, Value::Number(8.0));
        assert_eq!(resolved.path.to_string(), "Spacing.spacing.base");
    }

    #[test]
    fn test_cross_collection_mode() {
        let doc = document();
        let resolver = DocumentResolver::new(&doc, &ResolutionContext::default());
        let gap = TokenPath::new("Theme", ["gap"]);
        assert_eq!(resolver.resolve(&gap, "Dark").unwrap().value, Value::Number(8.0));
        assert_eq!(resolver.resolve(&gap, "Light").unwrap().value, Value::Number(1.0));
    }

    #[test]
    fn test_cycle_and_missing() {
        let doc = document();
        let resolver = DocumentResolver::new(&doc, &ResolutionContext::default());
        assert_eq!(
            resolver.resolve(&TokenPath::new("Spacing", ["loop", "a"]), "Default").unwrap_err(),
            ResolveIssue::CircularReference
        );
        assert_eq!(
            resolver.resolve(&TokenPath::new("Spacing", ["nope"]), "Default").unwrap_err(),
            ResolveIssue::UnresolvedAlias
        );
    }

    #[test]
    fn test_find() {
        let doc = document();
        let resolver = DocumentResolver::new(&doc, &ResolutionContext::default());
        let expected = TokenPath::new("Typography", ["typography", "rem-base"]);
        assert_eq!(resolver.find("typography/rem-base").unwrap(), Some(expected.clone()));
        assert_eq!(resolver.find("Typography.typography.rem-base").unwrap(), Some(expected));
        assert_eq!(resolver.find("missing").unwrap(), None);
    }

    #[test]
    fn test_rem_base() {
        let doc = document();
        let resolver = DocumentResolver::new(&doc, &ResolutionContext::default());
        assert_eq!(resolver.rem_base(&RemBase::Value(18.0), "Default").unwrap(), 18.0);
        assert_eq!(
            resolver.rem_base(&RemBase::Variable("typography/rem-base".into()), "Default").unwrap(),
            10.0
        );
        assert_eq!(resolver.rem_base(&RemBase::Variable("missing".into()), "Default").unwrap(), 16.0);
    }
}
