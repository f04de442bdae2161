// Static RisPort70 enumeration catalogs
//
// Device model codes (the `TypeModel` enumeration CUCM reports in `Model`)
// and the `StatusReason` codes attached to unregistered devices. Both are
// plain tables indexed once into hash maps so lookups are O(1) in either
// direction.

mod models;
mod status_reasons;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value;

pub use models::MODELS;
pub use status_reasons::STATUS_REASONS;

/// Model code meaning "any model" in selection criteria.
pub const ANY_MODEL: u32 = 255;

struct Index {
    by_code: HashMap<u32, &'static str>,
    by_name: HashMap<&'static str, u32>,
}

impl Index {
    fn build(table: &'static [(u32, &'static str)]) -> Self {
        Self {
            by_code: table.iter().copied().collect(),
            by_name: table.iter().map(|&(code, name)| (name, code)).collect(),
        }
    }
}

static MODEL_INDEX: LazyLock<Index> = LazyLock::new(|| Index::build(MODELS));
static REASON_INDEX: LazyLock<Index> = LazyLock::new(|| Index::build(STATUS_REASONS));

/// Model code for a catalog name, e.g. `"Cisco 7960"` -> `7`.
pub fn model_code(name: &str) -> Option<u32> {
    MODEL_INDEX.by_name.get(name).copied()
}

/// Catalog name for a model code.
pub fn model_name(code: u32) -> Option<&'static str> {
    MODEL_INDEX.by_code.get(&code).copied()
}

/// The full model catalog in code order.
pub fn models() -> &'static [(u32, &'static str)] {
    MODELS
}

/// Description for a `StatusReason` code.
pub fn status_reason(code: u32) -> Option<&'static str> {
    REASON_INDEX.by_code.get(&code).copied()
}

/// `StatusReason` code for a description.
pub fn status_reason_code(description: &str) -> Option<u32> {
    REASON_INDEX.by_name.get(description).copied()
}

/// The full status-reason catalog in code order.
pub fn status_reasons() -> &'static [(u32, &'static str)] {
    STATUS_REASONS
}

/// Key added next to each recognised `StatusReason` by [`annotate_status_reasons`].
pub const STATUS_REASON_TEXT: &str = "StatusReasonText";

/// Annotate every `StatusReason` code in a decoded record with its catalog text.
///
/// Walks the whole tree, so nested `CmDevices.item` entries are covered.
/// Codes missing from the catalog are left alone.
pub fn annotate_status_reasons(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let text = map
                .get("StatusReason")
                .and_then(Value::as_str)
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .and_then(status_reason);
            if let Some(text) = text {
                map.insert(STATUS_REASON_TEXT.into(), Value::String(text.into()));
            }
            map.values_mut().for_each(annotate_status_reasons);
        }
        Value::Array(items) => items.iter_mut().for_each(annotate_status_reasons),
        _ => {}
    }
}
