//! DTCG JSON output.

use tokenweave_core::{ConversionSettings, Document};

use crate::error::Result;
use crate::Converter;

/// Writes the document itself, pretty-printed, limited to the selected
/// collections and optionally stripped of descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl Converter for JsonConverter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn convert(&self, document: &Document, settings: &ConversionSettings) -> Result<String> {
        to_json(document, settings)
    }
}

pub fn to_json(document: &Document, settings: &ConversionSettings) -> Result<String> {
    let filtered;
    let document = if settings.selected_collections.is_empty() {
        document
    } else {
        let mut copy = document.clone();
        copy.collections
            .retain(|_, c| settings.includes_collection(&c.id, &c.name));
        filtered = copy;
        &filtered
    };
    Ok(tokenweave_dtcg::to_json_string(document, settings.optimize_json)?)
}
