//! DTCG serialization.
//!
//! [`serialize`] turns host variables, collections and styles into the
//! format-agnostic [`Document`](tokenweave_core::Document) every converter
//! reads; [`to_json_string`] writes it out in the design-tokens JSON shape.

pub mod json;
pub mod options;
pub mod serialize;

pub use json::{optimize, to_json_string, to_json_value};
pub use options::SerializeOptions;
pub use serialize::{serialize, serialize_source, SerializeError, StyleSources};
