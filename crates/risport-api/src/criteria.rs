// Selection criteria for RisPort70 queries
//
// `DeviceQuery` / `CtiQuery` are the ergonomic, caller-facing parameter sets.
// `build_device_criteria` / `build_cti_criteria` turn them into fully
// resolved `SelectionCriteria` / `CtiSelectionCriteria` values that the
// envelope renderer consumes as-is.

use strum::{Display, EnumIter, EnumString};

use crate::catalog;

// ── Enumerations ────────────────────────────────────────────────────

/// `DeviceClass` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum DeviceClass {
    #[default]
    Any,
    Phone,
    Gateway,
    H323,
    Cti,
    VoiceMail,
    MediaResources,
    HuntList,
    #[strum(serialize = "SIPTrunk")]
    SipTrunk,
    Unknown,
}

/// Registration `Status` selector for device queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum DeviceStatus {
    #[default]
    Any,
    Registered,
    #[strum(serialize = "UnRegistered")]
    Unregistered,
    Rejected,
    PartiallyRegistered,
    Unknown,
}

/// Which attribute `SelectItems` are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SelectBy {
    #[default]
    Name,
    #[strum(serialize = "IPV4Address")]
    Ipv4Address,
    #[strum(serialize = "IPV6Address")]
    Ipv6Address,
    DirNumber,
    Description,
    #[strum(serialize = "SIPStatus")]
    SipStatus,
}

/// Signalling `Protocol` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Protocol {
    #[default]
    Any,
    #[strum(serialize = "SCCP")]
    Sccp,
    #[strum(serialize = "SIP")]
    Sip,
    Unknown,
}

/// Firmware `DownloadStatus` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum DownloadStatus {
    #[default]
    Any,
    Upgrading,
    Successful,
    Failed,
    Unknown,
}

/// `CtiMgrClass` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum CtiMgrClass {
    Provider,
    Device,
    #[default]
    Line,
}

/// Connection `Status` selector for CTI queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum CtiStatus {
    #[default]
    Any,
    Open,
    Closed,
    OpenFailed,
    Unknown,
}

/// Which attribute `AppItems` are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SelectAppBy {
    #[default]
    AppId,
    #[strum(serialize = "AppIPV4Address")]
    AppIpv4Address,
    #[strum(serialize = "AppIPV6Address")]
    AppIpv6Address,
    UserId,
}

// ── Model ───────────────────────────────────────────────────────────

/// Device model filter: a raw `TypeModel` code or a catalog name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    Code(u32),
    Name(String),
}

impl Model {
    /// Resolve to the numeric code sent on the wire.
    ///
    /// Names missing from the catalog resolve to [`catalog::ANY_MODEL`]
    /// instead of failing the query.
    pub fn resolve(&self) -> u32 {
        match self {
            Self::Code(code) => *code,
            Self::Name(name) => catalog::model_code(name).unwrap_or_else(|| {
                tracing::debug!(model = %name, "unknown model name, selecting any model");
                catalog::ANY_MODEL
            }),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::Code(catalog::ANY_MODEL)
    }
}

impl From<u32> for Model {
    fn from(code: u32) -> Self {
        Self::Code(code)
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

// ── Items ───────────────────────────────────────────────────────────

/// One or many selection items, always held as an ordered sequence.
///
/// A single value converts into a one-element sequence; a sequence is kept
/// in caller order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Items(Vec<String>);

impl Items {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Items {
    fn from(item: &str) -> Self {
        Self(vec![item.to_owned()])
    }
}

impl From<String> for Items {
    fn from(item: String) -> Self {
        Self(vec![item])
    }
}

impl From<Vec<String>> for Items {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl From<Vec<&str>> for Items {
    fn from(items: Vec<&str>) -> Self {
        Self(items.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Items {
    fn from(items: &[&str]) -> Self {
        Self(items.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Items {
    fn from(items: [&str; N]) -> Self {
        Self(items.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl FromIterator<String> for Items {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Device query ────────────────────────────────────────────────────

/// Wildcard `SelectItems` entry matching every device.
pub const ANY_ITEM: &str = "*";

/// Which device query operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceVariant {
    /// `selectCmDevice`
    #[default]
    Standard,
    /// `selectCmDeviceExt`
    Extended,
}

/// Caller-facing parameters for `selectCmDevice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceQuery {
    pub variant: DeviceVariant,
    /// 1..=2000; not validated client side.
    pub max_returned: u32,
    pub device_class: DeviceClass,
    pub model: Model,
    pub status: DeviceStatus,
    /// Restrict to one CUCM node. `None` queries the whole cluster.
    pub node: Option<String>,
    pub select_by: SelectBy,
    pub select_items: Items,
    pub protocol: Protocol,
    pub download_status: DownloadStatus,
}

impl Default for DeviceQuery {
    fn default() -> Self {
        Self {
            variant: DeviceVariant::Standard,
            max_returned: 1000,
            device_class: DeviceClass::Any,
            model: Model::default(),
            status: DeviceStatus::Any,
            node: None,
            select_by: SelectBy::Name,
            select_items: Items::from(ANY_ITEM),
            protocol: Protocol::Any,
            download_status: DownloadStatus::Any,
        }
    }
}

impl DeviceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extended(mut self) -> Self {
        self.variant = DeviceVariant::Extended;
        self
    }

    pub fn max_returned(mut self, max: u32) -> Self {
        self.max_returned = max;
        self
    }

    pub fn device_class(mut self, class: DeviceClass) -> Self {
        self.device_class = class;
        self
    }

    pub fn model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn select(mut self, by: SelectBy, items: impl Into<Items>) -> Self {
        self.select_by = by;
        self.select_items = items.into();
        self
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn download_status(mut self, status: DownloadStatus) -> Self {
        self.download_status = status;
        self
    }
}

/// Fully resolved `CmSelectionCriteria`, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub max_returned: u32,
    pub device_class: DeviceClass,
    pub model: u32,
    pub status: DeviceStatus,
    pub node: Option<String>,
    pub select_by: SelectBy,
    pub select_items: Vec<String>,
    pub protocol: Protocol,
    pub download_status: DownloadStatus,
}

/// Build `CmSelectionCriteria` from caller parameters.
///
/// The model is resolved to its numeric code here; an unknown name selects
/// every model. An empty item list selects every device.
pub fn build_device_criteria(query: &DeviceQuery) -> SelectionCriteria {
    SelectionCriteria {
        max_returned: query.max_returned,
        device_class: query.device_class,
        model: query.model.resolve(),
        status: query.status,
        node: query.node.clone(),
        select_by: query.select_by,
        select_items: if query.select_items.is_empty() {
            vec![ANY_ITEM.to_owned()]
        } else {
            query.select_items.as_slice().to_vec()
        },
        protocol: query.protocol,
        download_status: query.download_status,
    }
}

// ── CTI query ───────────────────────────────────────────────────────

/// Caller-facing parameters for `selectCtiItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtiQuery {
    pub max_returned: u32,
    pub class: CtiMgrClass,
    pub status: CtiStatus,
    pub node: Option<String>,
    pub select_app_by: SelectAppBy,
    pub app_items: Items,
    pub dev_names: Items,
    pub dir_numbers: Items,
}

impl Default for CtiQuery {
    fn default() -> Self {
        Self {
            max_returned: 1000,
            class: CtiMgrClass::Line,
            status: CtiStatus::Any,
            node: None,
            select_app_by: SelectAppBy::AppId,
            app_items: Items::default(),
            dev_names: Items::default(),
            dir_numbers: Items::default(),
        }
    }
}

impl CtiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_returned(mut self, max: u32) -> Self {
        self.max_returned = max;
        self
    }

    pub fn class(mut self, class: CtiMgrClass) -> Self {
        self.class = class;
        self
    }

    pub fn status(mut self, status: CtiStatus) -> Self {
        self.status = status;
        self
    }

    pub fn node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn app_items(mut self, by: SelectAppBy, items: impl Into<Items>) -> Self {
        self.select_app_by = by;
        self.app_items = items.into();
        self
    }

    pub fn dev_names(mut self, names: impl Into<Items>) -> Self {
        self.dev_names = names.into();
        self
    }

    pub fn dir_numbers(mut self, numbers: impl Into<Items>) -> Self {
        self.dir_numbers = numbers.into();
        self
    }
}

/// Fully resolved `CtiSelectionCriteria`, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtiSelectionCriteria {
    pub max_returned: u32,
    pub class: CtiMgrClass,
    pub status: CtiStatus,
    pub node: Option<String>,
    pub select_app_by: SelectAppBy,
    pub app_items: Vec<String>,
    pub dev_names: Vec<String>,
    pub dir_numbers: Vec<String>,
}

/// Build `CtiSelectionCriteria` from caller parameters.
pub fn build_cti_criteria(query: &CtiQuery) -> CtiSelectionCriteria {
    CtiSelectionCriteria {
        max_returned: query.max_returned,
        class: query.class,
        status: query.status,
        node: query.node.clone(),
        select_app_by: query.select_app_by,
        app_items: query.app_items.as_slice().to_vec(),
        dev_names: query.dev_names.as_slice().to_vec(),
        dir_numbers: query.dir_numbers.as_slice().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_code_passes_through() {
        let criteria = build_device_criteria(&DeviceQuery::new().model(7u32));
        assert_eq!(criteria.model, 7);
    }

    #[test]
    fn model_name_resolves_from_catalog() {
        let criteria = build_device_criteria(&DeviceQuery::new().model("Cisco 8851"));
        assert_eq!(criteria.model, 684);
    }

    #[test]
    fn unknown_model_name_falls_back_to_any() {
        for name in ["Hello", "", "cisco 7960", "Cisco 7960 "] {
            let criteria = build_device_criteria(&DeviceQuery::new().model(name));
            assert_eq!(criteria.model, catalog::ANY_MODEL, "model name {name:?}");
        }
    }

    #[test]
    fn scalar_item_becomes_single_element() {
        let query = DeviceQuery::new().select(SelectBy::Name, "SEP001122334455");
        let criteria = build_device_criteria(&query);
        assert_eq!(criteria.select_items, vec!["SEP001122334455".to_owned()]);
    }

    #[test]
    fn item_sequence_keeps_order() {
        let items = ["SEPB", "SEPA", "SEPC", "SEPA"];
        let query = DeviceQuery::new().select(SelectBy::Name, items);
        let criteria = build_device_criteria(&query);
        assert_eq!(criteria.select_items, items);
    }

    #[test]
    fn empty_items_select_every_device() {
        let query = DeviceQuery::new().select(SelectBy::Name, Items::default());
        let criteria = build_device_criteria(&query);
        assert_eq!(criteria.select_items, vec!["*".to_owned()]);
    }

    #[test]
    fn cti_items_normalize_independently() {
        let query = CtiQuery::new()
            .app_items(SelectAppBy::AppId, "jtapi-app")
            .dev_names(vec!["CSFJDOE", "SEP001122334455"])
            .dir_numbers(Items::default());
        let criteria = build_cti_criteria(&query);
        assert_eq!(criteria.app_items, vec!["jtapi-app".to_owned()]);
        assert_eq!(criteria.dev_names, vec!["CSFJDOE".to_owned(), "SEP001122334455".to_owned()]);
        assert!(criteria.dir_numbers.is_empty());
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(DeviceClass::SipTrunk.to_string(), "SIPTrunk");
        assert_eq!(DeviceStatus::Unregistered.to_string(), "UnRegistered");
        assert_eq!(SelectBy::Ipv4Address.to_string(), "IPV4Address");
        assert_eq!(Protocol::Sccp.to_string(), "SCCP");
        assert_eq!(SelectAppBy::AppIpv6Address.to_string(), "AppIPV6Address");
        assert_eq!(CtiMgrClass::Line.to_string(), "Line");
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("phone".parse::<DeviceClass>().ok(), Some(DeviceClass::Phone));
        assert_eq!("sip".parse::<Protocol>().ok(), Some(Protocol::Sip));
        assert_eq!("unregistered".parse::<DeviceStatus>().ok(), Some(DeviceStatus::Unregistered));
        assert!("bogus".parse::<DeviceStatus>().is_err());
    }
}
