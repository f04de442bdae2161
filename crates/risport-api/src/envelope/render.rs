// Request envelope rendering.
//
// Each template has one substitution point per criterion field, in the
// order the RisPort70 WSDL declares them. Values are substituted verbatim:
// callers must not pass markup characters.

use std::fmt::Write;

use crate::criteria::{CtiSelectionCriteria, DeviceVariant, SelectionCriteria};

const SOAP_ACTION_DEVICE: &str = "http://schemas.cisco.com/ast/soap/action/#RisPort#SelectCmDevice";
const SOAP_ACTION_DEVICE_EXT: &str =
    "http://schemas.cisco.com/ast/soap/action/#RisPort#SelectCmDeviceExt";

/// `SOAPAction` header value for `selectCtiItem`.
pub const CTI_SOAP_ACTION: &str = "http://schemas.cisco.com/ast/soap/action/#RisPort#SelectCtiItem";

/// `SOAPAction` header value for a device query variant.
pub fn soap_action(variant: DeviceVariant) -> &'static str {
    match variant {
        DeviceVariant::Standard => SOAP_ACTION_DEVICE,
        DeviceVariant::Extended => SOAP_ACTION_DEVICE_EXT,
    }
}

fn operation(variant: DeviceVariant) -> &'static str {
    match variant {
        DeviceVariant::Standard => "selectCmDevice",
        DeviceVariant::Extended => "selectCmDeviceExt",
    }
}

/// `<soap:item><soap:{tag}>value</soap:{tag}></soap:item>` per value, no separator.
fn render_items(values: &[String], tag: &str) -> String {
    values.iter().fold(String::new(), |mut out, value| {
        let _ = write!(out, "<soap:item><soap:{tag}>{value}</soap:{tag}></soap:item>");
        out
    })
}

/// Render a `selectCmDevice` / `selectCmDeviceExt` request body.
pub fn render_device(criteria: &SelectionCriteria, variant: DeviceVariant) -> String {
    let operation = operation(variant);
    let items = render_items(&criteria.select_items, "Item");
    let node = criteria.node.as_deref().unwrap_or_default();
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:soap="http://schemas.cisco.com/ast/soap">
<soapenv:Header/>
<soapenv:Body>
   <soap:{operation}>
      <soap:StateInfo></soap:StateInfo>
      <soap:CmSelectionCriteria>
         <soap:MaxReturnedDevices>{max}</soap:MaxReturnedDevices>
         <soap:DeviceClass>{class}</soap:DeviceClass>
         <soap:Model>{model}</soap:Model>
         <soap:Status>{status}</soap:Status>
         <soap:NodeName>{node}</soap:NodeName>
         <soap:SelectBy>{select_by}</soap:SelectBy>
         <soap:SelectItems>{items}</soap:SelectItems>
         <soap:Protocol>{protocol}</soap:Protocol>
         <soap:DownloadStatus>{download}</soap:DownloadStatus>
      </soap:CmSelectionCriteria>
   </soap:{operation}>
</soapenv:Body>
</soapenv:Envelope>"#,
        max = criteria.max_returned,
        class = criteria.device_class,
        model = criteria.model,
        status = criteria.status,
        select_by = criteria.select_by,
        protocol = criteria.protocol,
        download = criteria.download_status,
    )
}

/// Render a `selectCtiItem` request body.
pub fn render_cti(criteria: &CtiSelectionCriteria) -> String {
    let app_items = render_items(&criteria.app_items, "AppItem");
    let dev_names = render_items(&criteria.dev_names, "DevName");
    let dir_numbers = render_items(&criteria.dir_numbers, "DirNumber");
    let node = criteria.node.as_deref().unwrap_or_default();
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:soap="http://schemas.cisco.com/ast/soap">
<soapenv:Header/>
<soapenv:Body>
   <soap:selectCtiItem>
      <soap:StateInfo></soap:StateInfo>
      <soap:CtiSelectionCriteria>
         <soap:MaxReturnedItems>{max}</soap:MaxReturnedItems>
         <soap:CtiMgrClass>{class}</soap:CtiMgrClass>
         <soap:Status>{status}</soap:Status>
         <soap:NodeName>{node}</soap:NodeName>
         <soap:SelectAppBy>{select_app_by}</soap:SelectAppBy>
         <soap:AppItems>{app_items}</soap:AppItems>
         <soap:DevNames>{dev_names}</soap:DevNames>
         <soap:DirNumbers>{dir_numbers}</soap:DirNumbers>
      </soap:CtiSelectionCriteria>
   </soap:selectCtiItem>
</soapenv:Body>
</soapenv:Envelope>"#,
        max = criteria.max_returned,
        class = criteria.class,
        status = criteria.status,
        select_app_by = criteria.select_app_by,
    )
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::criteria::{
        CtiMgrClass, CtiQuery, CtiStatus, DeviceClass, DeviceQuery, DeviceStatus, DownloadStatus,
        Protocol, SelectAppBy, SelectBy, build_cti_criteria, build_device_criteria,
    };
    use crate::envelope::parse_document;

    fn criteria_node<'a>(doc: &'a Value, operation: &str, node: &str) -> &'a Value {
        &doc["Body"][operation][node]
    }

    fn sample_device_query() -> DeviceQuery {
        DeviceQuery::new()
            .max_returned(200)
            .device_class(DeviceClass::Phone)
            .model("Cisco 7960")
            .status(DeviceStatus::Registered)
            .node("cucm-pub")
            .select(SelectBy::Name, ["SEP000000000001", "SEP000000000002"])
            .protocol(Protocol::Sip)
            .download_status(DownloadStatus::Successful)
    }

    #[test]
    fn device_fields_land_in_their_elements() {
        let criteria = build_device_criteria(&sample_device_query());
        let xml = render_device(&criteria, DeviceVariant::Standard);
        let (root, doc) = parse_document(&xml).expect("rendered envelope parses");

        assert_eq!(root, "Envelope");
        let node = criteria_node(&doc, "selectCmDevice", "CmSelectionCriteria");
        assert_eq!(node["MaxReturnedDevices"], json!("200"));
        assert_eq!(node["DeviceClass"], json!("Phone"));
        assert_eq!(node["Model"], json!("7"));
        assert_eq!(node["Status"], json!("Registered"));
        assert_eq!(node["NodeName"], json!("cucm-pub"));
        assert_eq!(node["SelectBy"], json!("Name"));
        assert_eq!(
            node["SelectItems"]["item"],
            json!([{ "Item": "SEP000000000001" }, { "Item": "SEP000000000002" }])
        );
        assert_eq!(node["Protocol"], json!("SIP"));
        assert_eq!(node["DownloadStatus"], json!("Successful"));
    }

    #[test]
    fn device_fields_render_in_wsdl_order() {
        let criteria = build_device_criteria(&sample_device_query());
        let xml = render_device(&criteria, DeviceVariant::Standard);
        let order = [
            "<soap:MaxReturnedDevices>200<",
            "<soap:DeviceClass>Phone<",
            "<soap:Model>7<",
            "<soap:Status>Registered<",
            "<soap:NodeName>cucm-pub<",
            "<soap:SelectBy>Name<",
            "<soap:Item>SEP000000000001<",
            "<soap:Item>SEP000000000002<",
            "<soap:Protocol>SIP<",
            "<soap:DownloadStatus>Successful<",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| xml.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {positions:?}");
    }

    #[test]
    fn items_are_concatenated_without_separator() {
        let criteria = build_device_criteria(&sample_device_query());
        let xml = render_device(&criteria, DeviceVariant::Standard);
        assert!(xml.contains(
            "<soap:SelectItems><soap:item><soap:Item>SEP000000000001</soap:Item></soap:item>\
             <soap:item><soap:Item>SEP000000000002</soap:Item></soap:item></soap:SelectItems>"
        ));
    }

    #[test]
    fn extended_variant_changes_operation_only() {
        let criteria = build_device_criteria(&DeviceQuery::new());
        let standard = render_device(&criteria, DeviceVariant::Standard);
        let extended = render_device(&criteria, DeviceVariant::Extended);
        assert_eq!(standard.replace("selectCmDevice>", "selectCmDeviceExt>"), extended);
        assert_eq!(soap_action(DeviceVariant::Extended), SOAP_ACTION_DEVICE_EXT);
    }

    #[test]
    fn missing_node_renders_empty_element() {
        let criteria = build_device_criteria(&DeviceQuery::new());
        let xml = render_device(&criteria, DeviceVariant::Standard);
        assert!(xml.contains("<soap:NodeName></soap:NodeName>"));
        assert!(xml.contains("<soap:Model>255</soap:Model>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let criteria = build_device_criteria(&sample_device_query());
        assert_eq!(
            render_device(&criteria, DeviceVariant::Standard),
            render_device(&criteria, DeviceVariant::Standard)
        );
    }

    #[test]
    fn cti_fields_land_in_their_elements() {
        let query = CtiQuery::new()
            .max_returned(50)
            .class(CtiMgrClass::Device)
            .status(CtiStatus::Open)
            .app_items(SelectAppBy::UserId, "jdoe")
            .dev_names(["CSFJDOE", "SEP001122334455"])
            .dir_numbers("1001");
        let xml = render_cti(&build_cti_criteria(&query));
        let (_, doc) = parse_document(&xml).expect("rendered envelope parses");

        let node = criteria_node(&doc, "selectCtiItem", "CtiSelectionCriteria");
        assert_eq!(node["MaxReturnedItems"], json!("50"));
        assert_eq!(node["CtiMgrClass"], json!("Device"));
        assert_eq!(node["Status"], json!("Open"));
        assert_eq!(node["NodeName"], json!(""));
        assert_eq!(node["SelectAppBy"], json!("UserId"));
        assert_eq!(node["AppItems"]["item"], json!({ "AppItem": "jdoe" }));
        assert_eq!(
            node["DevNames"]["item"],
            json!([{ "DevName": "CSFJDOE" }, { "DevName": "SEP001122334455" }])
        );
        assert_eq!(node["DirNumbers"]["item"], json!({ "DirNumber": "1001" }));
    }

    #[test]
    fn empty_cti_item_lists_render_empty_elements() {
        let xml = render_cti(&build_cti_criteria(&CtiQuery::new()));
        assert!(xml.contains("<soap:AppItems></soap:AppItems>"));
        assert!(xml.contains("<soap:DevNames></soap:DevNames>"));
        assert!(xml.contains("<soap:DirNumbers></soap:DirNumbers>"));
    }
}
