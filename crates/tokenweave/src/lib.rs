//! Design-token export pipeline.
//!
//! Host variables, collections and styles go in through a
//! [`VariableSource`]; CSS, SCSS, TypeScript or DTCG JSON comes out.
//!
//! # Example
//!
//! ```ignore
//! use tokenweave::{export, ConversionSettings, OutputFormat, Snapshot};
//!
//! let snapshot = Snapshot::from_json_str(json)?;
//! let css = export(&snapshot, &ConversionSettings::default(), OutputFormat::Css)?;
//! ```

pub mod error;
pub mod snapshot;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result, SnapshotError};
pub use snapshot::Snapshot;

pub use tokenweave_core::{
    ConversionSettings, Document, NameFormatRule, StyleCategory, StyleOutputMode, VariableSource,
};
pub use tokenweave_dtcg::{serialize_source, SerializeOptions};
pub use tokenweave_export::{
    Converter, CssConverter, JsonConverter, ScssConverter, TypeScriptConverter,
};
pub use tokenweave_naming::{default_name_format_rules, NameFormatter};
pub use tokenweave_transform::{ColorFormat, Unit};

/// Target formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Css,
    Scss,
    #[serde(rename = "typescript")]
    TypeScript,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Css,
        OutputFormat::Scss,
        OutputFormat::TypeScript,
        OutputFormat::Json,
    ];

    pub fn converter(&self) -> &'static dyn Converter {
        match self {
            OutputFormat::Css => &CssConverter,
            OutputFormat::Scss => &ScssConverter,
            OutputFormat::TypeScript => &TypeScriptConverter,
            OutputFormat::Json => &JsonConverter,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        self.converter().file_extension()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.converter().name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(OutputFormat::Css),
            "scss" => Ok(OutputFormat::Scss),
            "typescript" | "ts" => Ok(OutputFormat::TypeScript),
            "json" | "dtcg" => Ok(OutputFormat::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Serialize a source into the intermediate document.
///
/// Every collection is kept so references into collections left out of the
/// output can still be inlined; converters apply `selected_collections`.
pub fn build_document<S: VariableSource + ?Sized>(
    source: &S,
    settings: &ConversionSettings,
) -> Result<Document> {
    let options = SerializeOptions {
        selected_collections: Vec::new(),
        ..SerializeOptions::from_settings(settings)
    };
    let document = serialize_source(source, &options)?;
    log::debug!(
        "serialized {} tokens from '{}' with {} diagnostics",
        document.token_count(),
        source.file_name(),
        document.diagnostics.len()
    );
    Ok(document)
}

/// Serialize and convert in one step.
pub fn export<S: VariableSource + ?Sized>(
    source: &S,
    settings: &ConversionSettings,
    format: OutputFormat,
) -> Result<String> {
    let document = build_document(source, settings)?;
    Ok(format.converter().convert(&document, settings)?)
}

/// Every format from a single serialization, in [`OutputFormat::ALL`] order.
pub fn export_all<S: VariableSource + ?Sized>(
    source: &S,
    settings: &ConversionSettings,
) -> Result<Vec<(OutputFormat, String)>> {
    let document = build_document(source, settings)?;
    OutputFormat::ALL
        .iter()
        .map(|format| {
            let output = format.converter().convert(&document, settings)?;
            Ok((*format, output))
        })
        .collect()
}
