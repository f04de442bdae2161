// Reply normalization
//
// Only fixed locations are consulted: the operation's result node, then
// the SOAP fault node. Anything else is an unrecognized reply.

use serde_json::{Map, Value};
use tracing::debug;

use super::tree::parse_document;
use super::{DeviceRecord, Fault};
use crate::error::Error;

const DEVICE_RESPONSES: [&str; 2] = ["selectCmDeviceResponse", "selectCmDeviceExtResponse"];

/// Which result node a reply is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// `SelectCmDeviceResult.CmNodes`
    Device,
    /// `SelectCtiItemResult.CtiNodes`
    Cti,
}

/// A decoded reply body.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Items(Vec<DeviceRecord>),
    Fault(Fault),
}

/// Parse and normalize a reply body.
pub fn decode_reply(xml: &str, kind: ReplyKind) -> Result<Reply, Error> {
    let (root, tree) = parse_document(xml)?;
    Ok(normalize(&root, tree, kind))
}

/// Normalize a parsed document into records or a fault.
///
/// A result node wins over a fault node when both are present. A result
/// node with no items yields an empty list.
pub fn normalize(root: &str, tree: Value, kind: ReplyKind) -> Reply {
    if root != "Envelope" {
        debug!(root, "reply root is not a SOAP envelope");
        return Reply::Fault(Fault::unrecognized());
    }
    let tree = strip_attributes(tree);
    let Some(body) = tree.get("Body") else {
        return Reply::Fault(Fault::unrecognized());
    };

    if let Some(nodes) = result_nodes(body, kind) {
        let items = nodes.and_then(|n| n.get("item")).cloned();
        return Reply::Items(into_records(items));
    }

    match body.get("Fault") {
        Some(fault) => Reply::Fault(Fault::new(
            text_of(fault.get("faultcode")),
            text_of(fault.get("faultstring")),
        )),
        None => Reply::Fault(Fault::unrecognized()),
    }
}

/// `Some(nodes)` when the result node is present, where `nodes` is the
/// `CmNodes` / `CtiNodes` container if it has content.
fn result_nodes(body: &Value, kind: ReplyKind) -> Option<Option<&Value>> {
    match kind {
        ReplyKind::Device => DEVICE_RESPONSES.iter().find_map(|response| {
            body.get(response)?
                .get("selectCmDeviceReturn")?
                .get("SelectCmDeviceResult")
                .map(|result| result.get("CmNodes"))
        }),
        ReplyKind::Cti => body
            .get("selectCtiItemResponse")?
            .get("selectCtiItemReturn")?
            .get("SelectCtiItemResult")
            .map(|result| result.get("CtiNodes")),
    }
}

fn into_records(items: Option<Value>) -> Vec<DeviceRecord> {
    let items = match items {
        None => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(single) => vec![single],
    };
    items
        .into_iter()
        .filter_map(|item| match clean(item) {
            Some(Value::Object(record)) => Some(record),
            Some(Value::String(s)) if s.is_empty() => None,
            None => Some(Map::new()),
            other => {
                debug!(item = ?other, "skipping non-record item");
                None
            }
        })
        .collect()
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Drop `"$"` attribute bags and collapse `{"_": text}` wrappers.
fn strip_attributes(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut map: Map<String, Value> = map
                .into_iter()
                .filter(|(key, _)| key != "$")
                .map(|(key, value)| (key, strip_attributes(value)))
                .collect();
            if map.len() == 1 && map.contains_key("_") {
                map.remove("_").unwrap_or_default()
            } else {
                Value::Object(map)
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(strip_attributes).collect()),
        other => other,
    }
}

/// Recursively drop nulls, empty objects and empty arrays.
///
/// Returns `None` when the value itself is empty.
fn clean(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let map: Map<String, Value> = map
                .into_iter()
                .filter_map(|(key, value)| clean(value).map(|value| (key, value)))
                .collect();
            (!map.is_empty()).then_some(Value::Object(map))
        }
        Value::Array(items) => {
            let items: Vec<Value> = items.into_iter().filter_map(clean).collect();
            (!items.is_empty()).then_some(Value::Array(items))
        }
        other => Some(other),
    }
}
