// RisPort70 client facade
//
// Wraps `reqwest::Client` with the fixed RisPort70 endpoint, the request
// header set, and the retry loop. Every call renders its own envelope and
// builds its own header map; nothing on the client changes after
// construction.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{
    AUTHORIZATION, CONNECTION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue,
    SET_COOKIE,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::Credentials;
use crate::criteria::{CtiQuery, DeviceQuery, build_cti_criteria, build_device_criteria};
use crate::envelope::{
    CTI_SOAP_ACTION, QueryResult, Reply, ReplyKind, decode_reply, render_cti, render_device,
    soap_action,
};
use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::transport::TransportConfig;

/// Path of the RisPort70 service on a CUCM node.
pub const SERVICE_PATH: &str = "/realtimeservice2/services/RISService70";
/// Port the CUCM Tomcat serves AXL/serviceability APIs on.
pub const DEFAULT_PORT: u16 = 8443;

const SOAP_ACTION: &str = "soapaction";
const BODY_PREVIEW: usize = 200;

/// Everything needed to construct a [`RisClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Node root, e.g. `https://cucm-pub:8443`.
    pub base_url: Url,
    pub credentials: Credentials,
    pub transport: TransportConfig,
    pub retry: RetryPolicy,
    /// Sent on every request, after and over the fixed header set.
    pub extra_headers: Vec<(String, String)>,
    /// Session-affinity cookie from an earlier [`QueryResult`].
    pub affinity_token: Option<String>,
}

impl ClientConfig {
    /// Default transport, with the retry policy read from the environment.
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        Self {
            base_url,
            credentials,
            transport: TransportConfig::default(),
            retry: RetryPolicy::from_env(),
            extra_headers: Vec::new(),
            affinity_token: None,
        }
    }

    /// Config for `https://{host}:8443`.
    pub fn for_host(host: &str, credentials: Credentials) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("https://{host}:{DEFAULT_PORT}"))?;
        Ok(Self::new(base_url, credentials))
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_affinity_token(mut self, token: impl Into<String>) -> Self {
        self.affinity_token = Some(token.into());
        self
    }
}

/// One attempt's reply, read to completion.
struct RawReply {
    status: StatusCode,
    session_token: Option<String>,
    body: String,
}

/// Async client for one CUCM node's RisPort70 service.
///
/// Cheap to clone; clones share the connection pool. Use
/// [`pinned_to`](Self::pinned_to) to derive a client that presents a
/// session-affinity token.
#[derive(Debug, Clone)]
pub struct RisClient {
    http: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
    affinity_token: Option<String>,
    retry: RetryPolicy,
}

impl RisClient {
    /// Create a client, building its `reqwest::Client` from the transport config.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Self::with_client(http, config)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The transport section of `config` is ignored.
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Result<Self, Error> {
        let endpoint = config.base_url.join(SERVICE_PATH)?;
        let headers = base_headers(config)?;
        if let Some(token) = &config.affinity_token {
            header_value("Cookie", token)?;
        }
        Ok(Self {
            http,
            endpoint,
            headers,
            affinity_token: config.affinity_token.clone(),
            retry: config.retry.clone(),
        })
    }

    /// A copy of this client that presents `token` as its session cookie.
    pub fn pinned_to(&self, token: impl Into<String>) -> Self {
        Self {
            affinity_token: Some(token.into()),
            ..self.clone()
        }
    }

    /// The full service URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn affinity_token(&self) -> Option<&str> {
        self.affinity_token.as_deref()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Run `selectCmDevice` (or `selectCmDeviceExt`, per `query.variant`).
    pub async fn select_cm_device(&self, query: &DeviceQuery) -> Result<QueryResult, Error> {
        self.select_cm_device_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// [`select_cm_device`](Self::select_cm_device), abandoning the
    /// exchange or retry delay as soon as `cancel` fires.
    pub async fn select_cm_device_with_cancel(
        &self,
        query: &DeviceQuery,
        cancel: &CancellationToken,
    ) -> Result<QueryResult, Error> {
        let criteria = build_device_criteria(query);
        let body = render_device(&criteria, query.variant);
        self.exchange(soap_action(query.variant), &body, ReplyKind::Device, cancel)
            .await
    }

    /// Run `selectCtiItem`.
    pub async fn select_cti_device(&self, query: &CtiQuery) -> Result<QueryResult, Error> {
        self.select_cti_device_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// [`select_cti_device`](Self::select_cti_device) with cancellation.
    pub async fn select_cti_device_with_cancel(
        &self,
        query: &CtiQuery,
        cancel: &CancellationToken,
    ) -> Result<QueryResult, Error> {
        let criteria = build_cti_criteria(query);
        let body = render_cti(&criteria);
        self.exchange(CTI_SOAP_ACTION, &body, ReplyKind::Cti, cancel)
            .await
    }

    // ── Exchange ─────────────────────────────────────────────────────

    async fn exchange(
        &self,
        action: &'static str,
        body: &str,
        kind: ReplyKind,
        cancel: &CancellationToken,
    ) -> Result<QueryResult, Error> {
        let headers = self.request_headers(action)?;
        let attempts = self.retry.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, action, "POST {}", self.endpoint);

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled),
                outcome = self.send_once(&headers, body) => outcome,
            };

            let status = outcome.as_ref().map(|reply| reply.status);
            if self.retry.should_retry(attempt, status) {
                let delay = self.retry.delay_after(attempt);
                let reason = match &outcome {
                    Ok(reply) => format!("HTTP {}", reply.status.as_u16()),
                    Err(e) => e.to_string(),
                };
                warn!(
                    attempt,
                    attempts,
                    delay_ms = millis(delay),
                    error = %reason,
                    "transient failure, retrying"
                );
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(Error::Cancelled),
                    () = tokio::time::sleep(delay) => {}
                }
                continue;
            }

            let exhausted = self.retry.is_retryable(status);
            return match outcome.and_then(|reply| finish(reply, kind)) {
                Err(last) if exhausted => Err(Error::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(last),
                }),
                other => other,
            };
        }
    }

    async fn send_once(&self, headers: &HeaderMap, body: &str) -> Result<RawReply, Error> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .headers(headers.clone())
            .body(body.to_owned())
            .send()
            .await?;

        let status = resp.status();
        let session_token = session_token(resp.headers());
        let body = resp.text().await?;
        trace!(status = status.as_u16(), bytes = body.len(), "reply received");

        Ok(RawReply {
            status,
            session_token,
            body,
        })
    }

    fn request_headers(&self, action: &'static str) -> Result<HeaderMap, Error> {
        let mut headers = self.headers.clone();
        headers.insert(HeaderName::from_static(SOAP_ACTION), HeaderValue::from_static(action));
        if let Some(token) = &self.affinity_token {
            headers.insert(COOKIE, header_value("Cookie", token)?);
        }
        Ok(headers)
    }
}

/// Turn the deciding reply into the call's result.
///
/// A result node is accepted whatever the status. A fault is surfaced as
/// such; a non-success reply without one surfaces its status instead.
fn finish(reply: RawReply, kind: ReplyKind) -> Result<QueryResult, Error> {
    let status = reply.status;
    match decode_reply(&reply.body, kind) {
        Ok(Reply::Items(items)) => {
            debug!(count = items.len(), "reply decoded");
            Ok(QueryResult {
                session_token: reply.session_token,
                items,
            })
        }
        Ok(Reply::Fault(fault)) if status.is_success() || !fault.is_unrecognized() => {
            debug!(code = %fault.code, "SOAP fault");
            Err(Error::Fault(fault))
        }
        Err(e) if status.is_success() => Err(e),
        _ => Err(Error::Http {
            status: status.as_u16(),
            message: preview(&reply.body),
        }),
    }
}

fn base_headers(config: &ClientConfig) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, config.credentials.basic_auth_header()?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml;charset=UTF-8"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    for (name, value) in &config.extra_headers {
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(header, header_value(name, value)?);
    }
    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        name: name.to_owned(),
        reason: e.to_string(),
    })
}

/// `name=value` pairs of every `Set-Cookie` header, joined for a `Cookie` header.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();
    (!pairs.is_empty()).then(|| pairs.join("; "))
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW).collect()
}

fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
