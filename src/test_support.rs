use crate::models::{FileRecord, PathOptions};
use crate::path_builder::PathBuilder;
use serde_json::Value;

/// Unwrap a `json!` object into path options
pub(crate) fn options(value: Value) -> PathOptions {
    match value {
        Value::Object(map) => map,
        _ => panic!("options must be an object"),
    }
}

/// Puts every file under `/files/` and serves it from a CDN
pub(crate) struct FlatBuilder;

impl PathBuilder for FlatBuilder {
    fn name(&self) -> &str {
        "flat"
    }

    fn path(&self, _record: &FileRecord, _options: &PathOptions) -> String {
        "/files/".to_string()
    }

    fn filename(&self, record: &FileRecord, _options: &PathOptions) -> String {
        record.id.clone()
    }

    fn url(&self, record: &FileRecord, _options: &PathOptions) -> String {
        format!("https://cdn.example/{}", record.id)
    }
}
