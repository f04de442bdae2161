use thiserror::Error;

use crate::envelope::Fault;

/// Top-level error type for the `risport-api` crate.
///
/// Covers every failure mode of a query: client construction, transport,
/// reply parsing, and SOAP faults reported by the node. Exactly one of
/// these reaches the caller when a query does not produce a result.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configured header name or value cannot be sent.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with a non-success status and no SOAP fault.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Every attempt in the retry budget failed transiently.
    #[error("Giving up after {attempts} attempt(s): {last}")]
    RetriesExhausted { attempts: u32, last: Box<Error> },

    /// The call was cancelled while waiting on the exchange or a retry delay.
    #[error("Request cancelled")]
    Cancelled,

    // ── Reply ───────────────────────────────────────────────────────
    /// The reply body is not well-formed XML.
    #[error("Malformed reply: {message}")]
    Parse { message: String, body: String },

    /// A well-formed SOAP fault returned by the node.
    #[error("{0}")]
    Fault(Fault),
}

impl Error {
    /// Returns `true` if this is a transport failure worth retrying.
    ///
    /// Status-based retries are decided by the [`RetryPolicy`](crate::RetryPolicy),
    /// not here.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_builder(),
            _ => false,
        }
    }

    /// Returns `true` if the node reported a SOAP fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// The SOAP fault, if this error carries one.
    ///
    /// Looks through [`RetriesExhausted`](Self::RetriesExhausted) to the
    /// final attempt.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            Self::RetriesExhausted { last, .. } => last.fault(),
            _ => None,
        }
    }

    /// HTTP status code, if the failure was status-driven.
    ///
    /// Looks through [`RetriesExhausted`](Self::RetriesExhausted) to the
    /// final attempt.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::RetriesExhausted { last, .. } => last.status(),
            _ => None,
        }
    }
}
