//! `risport cti`: selectCtiItem.

use risport_api::{CtiQuery, DeviceRecord};
use serde_json::{Map, Value};
use tabled::Tabled;

use crate::cli::{CtiArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::{items_of, str_field};
use super::{Session, report_session_token};

#[derive(Tabled)]
struct CtiRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "App ID")]
    app_id: String,
    #[tabled(rename = "User")]
    user_id: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "DN")]
    dir_number: String,
}

impl CtiRow {
    fn new(node: &str, item: &Map<String, Value>) -> Self {
        let nested = |key: &str, field: &str| {
            item.get(key)
                .and_then(Value::as_object)
                .map(|obj| str_field(obj, field).to_owned())
                .unwrap_or_default()
        };
        Self {
            node: node.to_owned(),
            app_id: str_field(item, "AppId").to_owned(),
            user_id: str_field(item, "UserId").to_owned(),
            ip: str_field(item, "AppIpAddr").to_owned(),
            status: str_field(item, "AppStatus").to_owned(),
            device: nested("CtiDevice", "DeviceName"),
            dir_number: nested("CtiLine", "DirNumber"),
        }
    }
}

/// Flatten `CtiNodes.item[].CtiItems.item[]` into one row per CTI item.
fn cti_rows(nodes: &[DeviceRecord]) -> Vec<CtiRow> {
    nodes
        .iter()
        .flat_map(|node| {
            let node_name = str_field(node, "Name");
            items_of(node.get("CtiItems"))
                .into_iter()
                .map(move |item| CtiRow::new(node_name, item))
        })
        .collect()
}

fn build_query(args: &CtiArgs) -> CtiQuery {
    let mut query = CtiQuery::new()
        .max_returned(args.max)
        .class(args.class)
        .status(args.status)
        .app_items(args.select_app_by, args.app_items.clone())
        .dev_names(args.dev_names.clone())
        .dir_numbers(args.dir_numbers.clone());
    if let Some(ref node) = args.node {
        query = query.node(node.clone());
    }
    query
}

pub async fn handle(session: &Session, args: CtiArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let query = build_query(&args);
    tracing::debug!(?query, "selecting CTI items");

    let client = session.client_for(args.affinity.as_deref());
    let result = client
        .select_cti_device_with_cancel(&query, &session.cancel)
        .await
        .map_err(|e| session.api_error(e))?;
    report_session_token(&result, global);

    let out = output::render(
        global.output,
        &result,
        |r| cti_rows(&r.items),
        |r| cti_rows(&r.items).into_iter().map(|row| row.app_id).collect(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flattens_cti_items() {
        let node = json!({
            "Name": "cucm-pub",
            "ReturnCode": "Ok",
            "CtiItems": { "item": [
                { "AppId": "jtapi-1", "UserId": "jtapiuser", "AppIpAddr": "10.0.0.50",
                  "AppStatus": "Open",
                  "CtiDevice": { "DeviceName": "SEP001", "DeviceStatus": "Open" } },
                { "AppId": "tapi-2", "AppStatus": "Closed",
                  "CtiLine": { "DirNumber": "1000" } }
            ] }
        });
        let Value::Object(node) = node else {
            panic!("object expected");
        };

        let rows = cti_rows(&[node]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].device, "SEP001");
        assert_eq!(rows[0].ip, "10.0.0.50");
        assert_eq!(rows[1].dir_number, "1000");
        assert_eq!(rows[1].device, "");
    }

    #[test]
    fn repeated_flags_become_lists() {
        let cli = <crate::cli::Cli as clap::Parser>::try_parse_from([
            "risport", "cti", "--app-item", "a", "--app-item", "b", "--dev-name", "SEP001", "--node", "sub1",
        ])
        .expect("parses");
        let crate::cli::Command::Cti(args) = cli.command else {
            panic!("expected cti");
        };
        let query = build_query(&args);
        assert_eq!(query.app_items.as_slice(), ["a", "b"]);
        assert_eq!(query.dev_names.as_slice(), ["SEP001"]);
        assert_eq!(query.node.as_deref(), Some("sub1"));
    }
}
