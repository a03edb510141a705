//! Core types for the tokenweave exporter.
//!
//! This crate provides the foundation every other stage builds on:
//! - Host boundary types ([`Variable`], [`VariableCollection`], styles) and the
//!   [`VariableSource`] trait
//! - The intermediate token [`Document`]
//! - Per-token directives and [`ConversionSettings`]
//! - Path lookup ([`PathIndex`]), natural ordering and error types

pub mod config;
pub mod document;
pub mod errors;
pub mod host;
pub mod index;
pub mod settings;
pub mod styles;
pub mod text;

pub use config::{parse_description, ParsedDescription, RemBase, TokenConfig, TokenDirectives};
pub use document::{
    CollectionTokens, Document, Metadata, ModeValue, StyleGroups, Token, TokenExtensions,
    TokenGroup, TokenNode, TokenPath, TokenType, TokenValue, Value, DTCG_SCHEMA,
    EXTENSIONS_NAMESPACE,
};
pub use errors::{ResolveError, SettingsError, TreeError};
pub use host::{
    split_name, HostColor, Mode, ResolvedType, Variable, VariableAlias, VariableCollection,
    VariableSource, VariableValue,
};
pub use index::PathIndex;
pub use settings::{ConversionSettings, NameFormatRule, StyleOutputMode};
pub use styles::{
    ColorStop, Effect, EffectStyle, FontName, GridAlignment, GridStyle, LayoutGrid, LetterSpacing,
    LineHeight, Offset, Paint, PaintStyle, StyleCategory, TextCase, TextDecoration, TextStyle,
};
pub use text::{natural_cmp, slugify};

pub use tokenweave_transform::{ColorFormat, Unit};
