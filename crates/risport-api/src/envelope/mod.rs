// SOAP envelope codec
//
// Encoding renders resolved selection criteria into the fixed RisPort70
// request skeletons. Decoding parses a reply into a loosely-typed tree,
// strips XML scaffolding, and yields either an ordered list of records or
// a classified SOAP fault.

mod decode;
mod render;
mod tree;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use decode::{Reply, ReplyKind, decode_reply, normalize};
pub use render::{CTI_SOAP_ACTION, render_cti, render_device, soap_action};
pub use tree::parse_document;

/// One normalized record from a RisPort70 reply (a `CmNode` or `CtiNode`).
///
/// Returned as loosely-typed JSON because the field set varies by CUCM
/// release. Attribute bags, empty elements and null placeholders are gone.
///
/// Only the top-level node list is forced into a sequence. Nested `item`
/// containers such as `CmDevices.item` keep the reply's shape: a bare
/// object for one child, an array for several.
pub type DeviceRecord = serde_json::Map<String, serde_json::Value>;

/// Outcome of a successful query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Session-affinity cookie offered by the node, if any. Feed it to
    /// [`RisClient::pinned_to`](crate::RisClient::pinned_to) to keep polling
    /// the same node.
    pub session_token: Option<String>,
    /// Records in the order the node returned them. Never a bare record.
    pub items: Vec<DeviceRecord>,
}

/// Three-way SOAP fault classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultCode {
    /// The node's request-rate limiter rejected the call.
    RateControl,
    /// `generalException`, typically bad criteria or an internal error.
    GeneralException,
    Other,
}

impl FaultCode {
    /// Classify a raw `faultcode` string.
    ///
    /// Matching is a case-sensitive substring test; anything unmatched is
    /// [`Other`](Self::Other).
    pub fn classify(faultcode: &str) -> Self {
        if faultcode.contains("RateControl") {
            Self::RateControl
        } else if faultcode.contains("generalException") {
            Self::GeneralException
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RateControl => "RateControl",
            Self::GeneralException => "generalException",
            Self::Other => "Other",
        })
    }
}

/// A SOAP fault (or an unrecognizable reply) returned by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub code: FaultCode,
    /// The node's `faultstring`.
    pub detail: String,
    /// The raw `faultcode`. `None` when the reply held neither a result nor
    /// a fault.
    pub faultcode: Option<String>,
}

impl Fault {
    pub(crate) const UNRECOGNIZED: &'static str = "empty or unrecognized response";

    pub fn new(faultcode: impl Into<String>, detail: impl Into<String>) -> Self {
        let faultcode = faultcode.into();
        Self {
            code: FaultCode::classify(&faultcode),
            detail: detail.into(),
            faultcode: Some(faultcode),
        }
    }

    /// Stand-in fault for a reply with neither a result nor a fault node.
    pub fn unrecognized() -> Self {
        Self {
            code: FaultCode::Other,
            detail: Self::UNRECOGNIZED.into(),
            faultcode: None,
        }
    }

    /// Whether this fault came from a reply that matched no known shape.
    pub fn is_unrecognized(&self) -> bool {
        self.faultcode.is_none()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.faultcode {
            Some(raw) => write!(f, "SOAP fault {} ({raw}): {}", self.code, self.detail),
            None => write!(f, "SOAP fault {}: {}", self.code, self.detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_fault_codes() {
        assert_eq!(FaultCode::classify("Client.RateControl"), FaultCode::RateControl);
        assert_eq!(
            FaultCode::classify("soapenv:Server.generalException"),
            FaultCode::GeneralException
        );
        assert_eq!(FaultCode::classify("soapenv:Server"), FaultCode::Other);
        assert_eq!(FaultCode::classify("Server.GeneralException"), FaultCode::Other);
        assert_eq!(FaultCode::classify("ratecontrol"), FaultCode::Other);
    }

    #[test]
    fn fault_display_carries_detail() {
        let fault = Fault::new("Client.RateControl", "Exceeded allowed rate");
        assert_eq!(
            fault.to_string(),
            "SOAP fault RateControl (Client.RateControl): Exceeded allowed rate"
        );
        assert!(!fault.is_unrecognized());
        assert!(Fault::unrecognized().is_unrecognized());
    }
}
