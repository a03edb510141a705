//! The intermediate token document.
//!
//! A [`Document`] maps collection names to nested [`TokenGroup`]s. It is
//! format-agnostic: aliases stay as [`TokenPath`] references and colors stay
//! in hex, so every converter derives its own rendering from the same tree.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::TokenDirectives;
use crate::errors::TreeError;
use crate::host::ResolvedType;
use crate::styles::StyleCategory;

/// Schema URL written at the top of JSON documents.
pub const DTCG_SCHEMA: &str = "https://design-tokens.github.io/community-group/format/";

/// A dotted reference: collection name followed by token path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenPath {
    pub collection: String,
    pub segments: SmallVec<[String; 4]>,
}

impl TokenPath {
    pub fn new<I, S>(collection: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collection: collection.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `Collection.segment.segment`.
    pub fn parse_dotted(s: &str) -> Option<Self> {
        let mut parts = s.split('.');
        let collection = parts.next().filter(|c| !c.is_empty())?;
        let segments: SmallVec<[String; 4]> = parts.map(String::from).collect();
        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self {
            collection: collection.to_string(),
            segments,
        })
    }

    /// The slash-joined token name without the collection.
    pub fn name(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.collection, self.segments.join("."))
    }
}

/// Token type tag (`$type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Color,
    Number,
    String,
    Boolean,
    Typography,
    Shadow,
    Grid,
}

impl TokenType {
    pub fn from_resolved(resolved: ResolvedType) -> Self {
        match resolved {
            ResolvedType::Color => TokenType::Color,
            ResolvedType::Float => TokenType::Number,
            ResolvedType::String => TokenType::String,
            ResolvedType::Boolean => TokenType::Boolean,
        }
    }
}

/// A concrete typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Canonical hex.
    Color(String),
    Number(f64),
    String(String),
    Boolean(bool),
    /// CSS property → CSS text, for composite style tokens.
    Composite(IndexMap<String, String>),
}

/// What a single mode holds: a literal or a reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeValue {
    Literal(Value),
    Reference(TokenPath),
}

/// A token's `$value`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Single(Value),
    PerMode(IndexMap<String, ModeValue>),
    Reference(TokenPath),
}

impl TokenValue {
    /// The value for `mode`.
    ///
    /// Single values and references answer for every mode; a per-mode map
    /// answers only for the modes it holds.
    pub fn for_mode(&self, mode: &str) -> Option<ModeValue> {
        match self {
            TokenValue::Single(v) => Some(ModeValue::Literal(v.clone())),
            TokenValue::Reference(path) => Some(ModeValue::Reference(path.clone())),
            TokenValue::PerMode(map) => map.get(mode).cloned(),
        }
    }

    pub fn is_per_mode(&self) -> bool {
        matches!(self, TokenValue::PerMode(_))
    }
}

/// Tool-specific metadata carried in `$extensions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExtensions {
    #[serde(flatten)]
    pub directives: TokenDirectives,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

impl TokenExtensions {
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.source_type.is_none()
    }
}

/// Key under which extensions are namespaced in JSON.
pub const EXTENSIONS_NAMESPACE: &str = "tokenweave";

/// A leaf of the token tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: TokenValue,
    pub description: Option<String>,
    pub extensions: Option<TokenExtensions>,
}

impl Token {
    pub fn new(token_type: TokenType, value: TokenValue) -> Self {
        Self {
            token_type,
            value,
            description: None,
            extensions: None,
        }
    }

    /// Directives recorded on this token, if any.
    pub fn directives(&self) -> TokenDirectives {
        self.extensions
            .as_ref()
            .map(|e| e.directives.clone())
            .unwrap_or_default()
    }
}

/// A node of the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Group(TokenGroup),
    Token(Token),
}

/// A path-keyed tree of tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenGroup {
    children: IndexMap<String, TokenNode>,
}

impl TokenGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.children.iter()
    }

    /// Insert `token` at `path`, creating intermediate groups.
    ///
    /// Fails without modifying the tree if a segment would have to be both a
    /// token and a group, or if the leaf is already taken.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], token: Token) -> Result<(), TreeError> {
        let Some((leaf, parents)) = path.split_last() else {
            return Err(TreeError::EmptyPath);
        };
        let joined = || {
            path.iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join("/")
        };

        // Validate before creating anything
        let mut cursor = Some(&*self);
        for segment in parents {
            cursor = match cursor.and_then(|g| g.children.get(segment.as_ref())) {
                Some(TokenNode::Group(group)) => Some(group),
                Some(TokenNode::Token(_)) => {
                    return Err(TreeError::PathConflict {
                        path: joined(),
                        reason: format!("'{}' is already a token", segment.as_ref()),
                    })
                }
                None => None,
            };
        }
        if let Some(existing) = cursor.and_then(|g| g.children.get(leaf.as_ref())) {
            let reason = match existing {
                TokenNode::Group(_) => "a group already exists at this path",
                TokenNode::Token(_) => "a token already exists at this path",
            };
            return Err(TreeError::PathConflict {
                path: joined(),
                reason: reason.to_string(),
            });
        }

        let mut group = self;
        for segment in parents {
            let node = group
                .children
                .entry(segment.as_ref().to_string())
                .or_insert_with(|| TokenNode::Group(TokenGroup::new()));
            group = match node {
                TokenNode::Group(g) => g,
                TokenNode::Token(_) => {
                    return Err(TreeError::PathConflict {
                        path: joined(),
                        reason: format!("'{}' is already a token", segment.as_ref()),
                    })
                }
            };
        }
        group
            .children
            .insert(leaf.as_ref().to_string(), TokenNode::Token(token));
        Ok(())
    }

    /// Look up a token by path.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Token> {
        let (leaf, parents) = path.split_last()?;
        let mut group = self;
        for segment in parents {
            match group.children.get(segment.as_ref())? {
                TokenNode::Group(g) => group = g,
                TokenNode::Token(_) => return None,
            }
        }
        match group.children.get(leaf.as_ref())? {
            TokenNode::Token(t) => Some(t),
            TokenNode::Group(_) => None,
        }
    }

    /// Every token with its path, depth-first in insertion order.
    pub fn tokens(&self) -> Vec<(Vec<String>, &Token)> {
        let mut out = Vec::new();
        self.collect_tokens(&mut Vec::new(), &mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a Token)>) {
        for (key, node) in &self.children {
            prefix.push(key.clone());
            match node {
                TokenNode::Token(token) => out.push((prefix.clone(), token)),
                TokenNode::Group(group) => group.collect_tokens(prefix, out),
            }
            prefix.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                TokenNode::Token(_) => 1,
                TokenNode::Group(g) => g.len(),
            })
            .sum()
    }
}

/// Tokens of one collection plus its mode layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionTokens {
    pub id: String,
    pub name: String,
    /// Mode names in host order.
    pub modes: Vec<String>,
    pub default_mode: String,
    pub tokens: TokenGroup,
}

impl CollectionTokens {
    pub fn is_multi_mode(&self) -> bool {
        self.modes.len() > 1
    }
}

/// Style tokens grouped by category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleGroups {
    pub paint: TokenGroup,
    pub text: TokenGroup,
    pub effect: TokenGroup,
    pub grid: TokenGroup,
}

impl StyleGroups {
    pub fn get(&self, category: StyleCategory) -> &TokenGroup {
        match category {
            StyleCategory::Paint => &self.paint,
            StyleCategory::Text => &self.text,
            StyleCategory::Effect => &self.effect,
            StyleCategory::Grid => &self.grid,
        }
    }

    pub fn get_mut(&mut self, category: StyleCategory) -> &mut TokenGroup {
        match category {
            StyleCategory::Paint => &mut self.paint,
            StyleCategory::Text => &mut self.text,
            StyleCategory::Effect => &mut self.effect,
            StyleCategory::Grid => &mut self.grid,
        }
    }

    pub fn is_empty(&self) -> bool {
        StyleCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    pub file_name: String,
    /// RFC 3339 timestamp.
    pub generated_at: String,
}

/// The intermediate document shared by all converters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub collections: IndexMap<String, CollectionTokens>,
    pub styles: Option<StyleGroups>,
    pub metadata: Metadata,
    /// Soft warnings gathered while building the document. Not serialized.
    pub diagnostics: Vec<String>,
}

impl Document {
    pub fn collection(&self, name: &str) -> Option<&CollectionTokens> {
        self.collections.get(name)
    }

    /// Follow a reference to its token.
    pub fn token(&self, path: &TokenPath) -> Option<&Token> {
        self.collections
            .get(&path.collection)?
            .tokens
            .get(path.segments.as_slice())
    }

    pub fn token_count(&self) -> usize {
        self.collections.values().map(|c| c.tokens.len()).sum()
    }
}

// ----------------------------------------------------------------------------
// JSON shape
// ----------------------------------------------------------------------------

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15).then_some(n as i64)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Color(hex) => serializer.serialize_str(hex),
            Value::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Composite(map) => map.serialize(serializer),
        }
    }
}

struct RefJson<'a>(&'a TokenPath);

impl Serialize for RefJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$ref", &self.0.to_string())?;
        map.end()
    }
}

impl Serialize for ModeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ModeValue::Literal(v) => v.serialize(serializer),
            ModeValue::Reference(path) => RefJson(path).serialize(serializer),
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenValue::Single(v) => v.serialize(serializer),
            TokenValue::Reference(path) => RefJson(path).serialize(serializer),
            TokenValue::PerMode(modes) => modes.serialize(serializer),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("$type", &self.token_type)?;
        map.serialize_entry("$value", &self.value)?;
        if let Some(description) = &self.description {
            map.serialize_entry("$description", description)?;
        }
        if let Some(extensions) = &self.extensions {
            let mut namespaced = IndexMap::new();
            namespaced.insert(EXTENSIONS_NAMESPACE, extensions);
            map.serialize_entry("$extensions", &namespaced)?;
        }
        map.end()
    }
}

impl Serialize for TokenNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenNode::Group(g) => g.serialize(serializer),
            TokenNode::Token(t) => t.serialize(serializer),
        }
    }
}

impl Serialize for TokenGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.children.serialize(serializer)
    }
}

impl Serialize for StyleGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for category in StyleCategory::ALL {
            let group = self.get(category);
            if !group.is_empty() {
                map.serialize_entry(category.as_str(), group)?;
            }
        }
        map.end()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionMetaJson<'a> {
    modes: &'a [String],
    default_mode: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataJson<'a> {
    file_name: &'a str,
    generated_at: &'a str,
    collections: IndexMap<&'a str, CollectionMetaJson<'a>>,
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("$schema", DTCG_SCHEMA)?;

        let collections: IndexMap<&str, &TokenGroup> = self
            .collections
            .iter()
            .map(|(name, c)| (name.as_str(), &c.tokens))
            .collect();
        map.serialize_entry("collections", &collections)?;

        if let Some(styles) = self.styles.as_ref().filter(|s| !s.is_empty()) {
            map.serialize_entry("$styles", styles)?;
        }

        let metadata = MetadataJson {
            file_name: &self.metadata.file_name,
            generated_at: &self.metadata.generated_at,
            collections: self
                .collections
                .iter()
                .map(|(name, c)| {
                    (
                        name.as_str(),
                        CollectionMetaJson {
                            modes: &c.modes,
                            default_mode: &c.default_mode,
                        },
                    )
                })
                .collect(),
        };
        map.serialize_entry("$metadata", &metadata)?;
        map.end()
    }
}
