//! JSON output for a [`Document`].

use serde_json::Value as Json;
use tokenweave_core::Document;

/// The document as a JSON tree, optionally reduced with [`optimize`].
pub fn to_json_value(document: &Document, optimized: bool) -> serde_json::Result<Json> {
    let mut json = serde_json::to_value(document)?;
    if optimized {
        optimize(&mut json);
    }
    Ok(json)
}

/// Pretty-printed JSON with two-space indentation.
pub fn to_json_string(document: &Document, optimized: bool) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_json_value(document, optimized)?)
}

/// Strip `$description` keys and empty `$extensions` objects in place.
///
/// `$type` and `$value` are never touched.
pub fn optimize(json: &mut Json) {
    let Json::Object(map) = json else {
        return;
    };
    map.remove("$description");
    if map.get("$extensions").is_some_and(is_empty_extensions) {
        map.remove("$extensions");
    }
    for (key, child) in map.iter_mut() {
        if key != "$value" {
            optimize(child);
        }
    }
}

fn is_empty_extensions(json: &Json) -> bool {
    match json {
        Json::Object(map) => map.values().all(is_empty_extensions),
        Json::Null => true,
        _ => false,
    }
}
