//! Format converters for tokenweave documents.
//!
//! Every converter walks the same [`Document`] and agrees on naming, mode
//! selection, collection filtering and style inclusion:
//!
//! - [`CssConverter`]: custom properties in a `:root` block, optional
//!   per-mode selector blocks and style classes
//! - [`ScssConverter`]: `$variables` and `@mixin`s
//! - [`TypeScriptConverter`]: a union of custom property names
//! - [`JsonConverter`]: the document itself
//!
//! # Example
//!
//! ```ignore
//! let css = CssConverter.convert(&document, &settings)?;
//! ```

pub mod calc;
pub mod comments;
pub mod context;
pub mod css;
pub mod error;
pub mod json;
pub mod scss;
pub mod typescript;
pub mod values;
pub mod walk;

#[cfg(test)]
mod test_support;

pub use calc::{format_for_css, format_for_scss, RemDivisor};
pub use context::ConvertContext;
pub use css::{to_css, CssConverter};
pub use error::{ExportError, Result};
pub use json::{to_json, JsonConverter};
pub use scss::{to_scss, ScssConverter};
pub use typescript::{to_typescript, variable_names, TypeScriptConverter};

use tokenweave_core::{ConversionSettings, Document};

/// Common trait for format converters.
pub trait Converter {
    /// Format name.
    fn name(&self) -> &'static str;

    /// Extension for files holding this format.
    fn file_extension(&self) -> &'static str;

    /// Render the document.
    fn convert(&self, document: &Document, settings: &ConversionSettings) -> Result<String>;
}
