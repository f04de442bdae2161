//! Shared helpers for walking decoded RisPort70 records.

use serde_json::{Map, Value};

/// Entries of an `{ "item": obj | [obj] }` container, always as a slice-like Vec.
///
/// Decoded replies collapse single-element lists, so one child arrives as a
/// bare object and several arrive as an array.
pub fn items_of(container: Option<&Value>) -> Vec<&Map<String, Value>> {
    match container.and_then(|c| c.get("item")) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        Some(Value::Object(item)) => vec![item],
        _ => Vec::new(),
    }
}

/// String field of a record, or `""` when absent or not a string.
pub fn str_field<'a>(record: &'a Map<String, Value>, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// String field parsed as a number.
pub fn code_field(record: &Map<String, Value>, key: &str) -> Option<u32> {
    str_field(record, key).trim().parse().ok()
}
