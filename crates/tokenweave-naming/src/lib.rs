//! Variable naming for the tokenweave exporter.
//!
//! - [`compile`] turns a glob over slash-delimited names into a [`GlobMatcher`]
//! - [`render`] fills a replacement template from captures
//! - [`NameFormatter`] applies an ordered rule list plus prefix

pub mod formatter;
pub mod glob;
pub mod template;

pub use formatter::{
    default_name_format_rules, default_transform, format_name, NameFormatter, PREFIX_PLACEHOLDER,
};
pub use glob::{compile, GlobError, GlobMatcher};
pub use template::{render, Modifier};
