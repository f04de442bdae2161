//! CLI error types with miette diagnostics.
//!
//! Maps `risport_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use risport_api::{Error as ApiError, FaultCode};
use risport_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const RATE_LIMITED: i32 = 9;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach RisPort70 at {url}")]
    #[diagnostic(
        code(risport::connection_failed),
        help(
            "Check that the node is reachable on port 8443 and that the\n\
             Cisco RIS Data Collector service is running.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(risport::timeout),
        help("Increase the timeout with --timeout or check node responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("Interrupted")]
    #[diagnostic(code(risport::interrupted))]
    Interrupted,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(risport::auth_failed),
        help(
            "Verify the application user credentials and that the user has\n\
             the Standard CCM Admin Users and Standard SERVICEABILITY roles.\n\
             Store a password with: risport config set-password --for {profile}"
        )
    )]
    AuthFailed { status: u16, profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(risport::no_credentials),
        help(
            "Pass --username / --password, set RISPORT_USERNAME and\n\
             RISPORT_PASSWORD, or add them to the profile."
        )
    )]
    NoCredentials { profile: String },

    // ── Service ──────────────────────────────────────────────────────
    #[error("Rate limited by the node: {detail}")]
    #[diagnostic(
        code(risport::rate_limited),
        help(
            "RisPort70 limits how many queries it accepts per minute.\n\
             Poll less often or raise RISPORT_RETRIES / RISPORT_RETRIES_DELAY."
        )
    )]
    RateLimited { detail: String },

    #[error("SOAP fault {code}: {detail}")]
    #[diagnostic(code(risport::fault))]
    Fault { code: String, detail: String },

    #[error("HTTP {status}: {message}")]
    #[diagnostic(code(risport::http))]
    Http { status: u16, message: String },

    #[error(transparent)]
    #[diagnostic(code(risport::api))]
    Api(ApiError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(risport::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(risport::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No node configured")]
    #[diagnostic(
        code(risport::no_config),
        help(
            "Pass --host, set RISPORT_HOST, or add a profile to\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(risport::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(risport::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(risport::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::RateLimited { .. } => exit_code::RATE_LIMITED,
            Self::Interrupted => exit_code::INTERRUPTED,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a query failure, with the context needed for help text.
    pub fn from_api(err: ApiError, url: &str, profile: &str, timeout_secs: u64) -> Self {
        let last = match &err {
            ApiError::RetriesExhausted { last, .. } => last.as_ref(),
            other => other,
        };
        if matches!(last, ApiError::Transport(e) if e.is_timeout()) {
            return Self::Timeout {
                seconds: timeout_secs,
            };
        }
        // A fault on the final attempt is reported as that fault.
        let err = match err {
            ApiError::RetriesExhausted { last: fault, .. } if fault.is_fault() => *fault,
            other => other,
        };
        if matches!(err, ApiError::RetriesExhausted { .. }) && err.status() == Some(503) {
            return Self::RateLimited {
                detail: err.to_string(),
            };
        }

        match err {
            ApiError::Cancelled => Self::Interrupted,
            ApiError::Fault(fault) if fault.code == FaultCode::RateControl => Self::RateLimited {
                detail: fault.detail,
            },
            ApiError::Fault(fault) => Self::Fault {
                code: fault.faultcode.unwrap_or_else(|| fault.code.to_string()),
                detail: fault.detail,
            },
            ApiError::Http {
                status: status @ (401 | 403),
                ..
            } => Self::AuthFailed {
                status,
                profile: profile.into(),
            },
            ApiError::Http { status, message } => Self::Http { status, message },
            ApiError::Transport(_) | ApiError::RetriesExhausted { .. } => Self::ConnectionFailed {
                url: url.into(),
                source: err,
            },
            other => Self::Api(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
