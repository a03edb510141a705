//! JSON dumps of host data.
//!
//! A [`Snapshot`] holds everything the design tool hands over for one file:
//! collections, variables and the four style lists. It is the
//! [`VariableSource`] used outside the host, by tests, benchmarks and
//! offline exports.

use serde::{Deserialize, Serialize};
use tokenweave_core::{
    EffectStyle, GridStyle, PaintStyle, TextStyle, Variable, VariableCollection, VariableSource,
};

use crate::error::SnapshotError;

fn untitled() -> String {
    "Untitled".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "untitled")]
    pub file_name: String,
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub paint_styles: Vec<PaintStyle>,
    #[serde(default)]
    pub text_styles: Vec<TextStyle>,
    #[serde(default)]
    pub effect_styles: Vec<EffectStyle>,
    #[serde(default)]
    pub grid_styles: Vec<GridStyle>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            file_name: untitled(),
            collections: Vec::new(),
            variables: Vec::new(),
            paint_styles: Vec::new(),
            text_styles: Vec::new(),
            effect_styles: Vec::new(),
            grid_styles: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Parse and check a snapshot.
    ///
    /// Every variable must name a collection present in the snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        for variable in &self.variables {
            if !self.collections.iter().any(|c| c.id == variable.variable_collection_id) {
                return Err(SnapshotError::UnknownCollection {
                    variable: variable.name.clone(),
                    collection: variable.variable_collection_id.clone(),
                });
            }
        }
        Ok(())
    }
}

impl VariableSource for Snapshot {
    fn collections(&self) -> &[VariableCollection] {
        &self.collections
    }

    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn paint_styles(&self) -> &[PaintStyle] {
        &self.paint_styles
    }

    fn text_styles(&self) -> &[TextStyle] {
        &self.text_styles
    }

    fn effect_styles(&self) -> &[EffectStyle] {
        &self.effect_styles
    }

    fn grid_styles(&self) -> &[GridStyle] {
        &self.grid_styles
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }
}
