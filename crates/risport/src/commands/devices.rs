//! `risport devices`: selectCmDevice / selectCmDeviceExt.

use risport_api::catalog;
use risport_api::{DeviceQuery, DeviceRecord, Items, Model};
use serde_json::{Map, Value};
use tabled::Tabled;

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::{code_field, items_of, str_field};
use super::{Session, report_session_token};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "DN")]
    dir_number: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl DeviceRow {
    fn new(node: &str, device: &Map<String, Value>) -> Self {
        Self {
            node: node.to_owned(),
            name: str_field(device, "Name").to_owned(),
            description: str_field(device, "Description").to_owned(),
            dir_number: str_field(device, "DirNumber").to_owned(),
            ip: first_ip(device),
            model: model_label(device),
            protocol: str_field(device, "Protocol").to_owned(),
            status: str_field(device, "Status").to_owned(),
            reason: reason_label(device),
        }
    }
}

/// First address of a device: `IPAddress.item[].IP` on current releases,
/// a plain `IpAddress` string on older ones.
fn first_ip(device: &Map<String, Value>) -> String {
    if let Some(ip) = device.get("IpAddress").and_then(Value::as_str) {
        return ip.to_owned();
    }
    items_of(device.get("IPAddress"))
        .first()
        .map(|addr| str_field(addr, "IP").to_owned())
        .unwrap_or_default()
}

fn model_label(device: &Map<String, Value>) -> String {
    match code_field(device, "Model") {
        Some(code) => catalog::model_name(code).map_or_else(|| code.to_string(), str::to_owned),
        None => str_field(device, "Model").to_owned(),
    }
}

fn reason_label(device: &Map<String, Value>) -> String {
    match code_field(device, "StatusReason") {
        None | Some(0) => String::new(),
        Some(code) => catalog::status_reason(code).map_or_else(|| code.to_string(), str::to_owned),
    }
}

/// Flatten `CmNodes.item[].CmDevices.item[]` into one row per device.
fn device_rows(nodes: &[DeviceRecord]) -> Vec<DeviceRow> {
    nodes
        .iter()
        .flat_map(|node| {
            let node_name = str_field(node, "Name");
            items_of(node.get("CmDevices"))
                .into_iter()
                .map(move |device| DeviceRow::new(node_name, device))
        })
        .collect()
}

fn device_names(nodes: &[DeviceRecord]) -> Vec<String> {
    device_rows(nodes).into_iter().map(|row| row.name).collect()
}

// ── Query ───────────────────────────────────────────────────────────

/// Parse `--model`: a numeric code, otherwise a catalog name.
fn parse_model(raw: &str) -> Model {
    raw.trim()
        .parse::<u32>()
        .map_or_else(|_| Model::from(raw), Model::from)
}

fn build_query(args: &DevicesArgs) -> DeviceQuery {
    let items = Items::from(args.items.clone());

    let mut query = DeviceQuery::new()
        .max_returned(args.max)
        .device_class(args.class)
        .status(args.status)
        .select(args.select_by, items)
        .protocol(args.protocol)
        .download_status(args.download_status);
    if let Some(ref model) = args.model {
        query = query.model(parse_model(model));
    }
    if let Some(ref node) = args.node {
        query = query.node(node.clone());
    }
    if args.extended {
        query = query.extended();
    }
    query
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let query = build_query(&args);
    tracing::debug!(?query, "selecting devices");

    let client = session.client_for(args.affinity.as_deref());
    let result = client
        .select_cm_device_with_cancel(&query, &session.cancel)
        .await
        .map_err(|e| session.api_error(e))?;
    report_session_token(&result, global);

    let mut payload = serde_json::to_value(&result)?;
    if args.describe_reasons {
        catalog::annotate_status_reasons(&mut payload);
    }

    let out = output::render(
        global.output,
        &payload,
        |_| device_rows(&result.items),
        |_| device_names(&result.items),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use risport_api::criteria::{DeviceVariant, SelectBy};
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> DeviceRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn node(name: &str, devices: Value) -> DeviceRecord {
        record(json!({ "Name": name, "ReturnCode": "Ok", "CmDevices": { "item": devices } }))
    }

    #[test]
    fn flattens_devices_across_nodes() {
        let nodes = vec![
            node(
                "cucm-pub",
                json!([
                    { "Name": "SEP001", "Model": "684", "Status": "Registered", "StatusReason": "0",
                      "IPAddress": { "item": { "IP": "10.0.0.10", "IPAddrType": "ipv4" } } },
                    { "Name": "SEP002", "Model": "99999", "Status": "UnRegistered", "StatusReason": "1" }
                ]),
            ),
            node("cucm-sub", json!({ "Name": "CSFJDOE", "IpAddress": "10.0.0.20" })),
        ];

        let rows = device_rows(&nodes);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].node, "cucm-pub");
        assert_eq!(rows[0].ip, "10.0.0.10");
        assert_eq!(rows[0].model, catalog::model_name(684).unwrap_or("684"));
        assert_eq!(rows[0].reason, "");
        assert_eq!(rows[1].model, "99999");
        assert_eq!(rows[2].node, "cucm-sub");
        assert_eq!(rows[2].ip, "10.0.0.20");
    }

    #[test]
    fn node_without_devices_has_no_rows() {
        let nodes = vec![record(json!({ "Name": "cucm-pub", "ReturnCode": "NotFound" }))];
        assert!(device_rows(&nodes).is_empty());
    }

    #[test]
    fn model_flag_accepts_code_or_name() {
        assert_eq!(parse_model("684"), Model::Code(684));
        assert_eq!(parse_model("Cisco 8851"), Model::Name("Cisco 8851".into()));
    }

    #[test]
    fn empty_items_select_everything() {
        let cli = <crate::cli::Cli as clap::Parser>::try_parse_from(["risport", "devices", "-x"])
            .expect("parses");
        let crate::cli::Command::Devices(args) = cli.command else {
            panic!("expected devices");
        };
        let query = build_query(&args);
        let criteria = risport_api::criteria::build_device_criteria(&query);
        assert_eq!(criteria.select_items, ["*"]);
        assert_eq!(query.select_by, SelectBy::Name);
        assert_eq!(query.variant, DeviceVariant::Extended);
    }
}
