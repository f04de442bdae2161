//! Shared configuration for RisPort70 tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `risport_api::ClientConfig`. The CLI layers its
//! flag overrides on top.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use risport_api::client::DEFAULT_PORT;
use risport_api::{ClientConfig, Credentials, RetryPolicy, TlsMode, TransportConfig};

/// Keyring service name passwords are stored under.
pub const KEYRING_SERVICE: &str = "risport";
/// Environment variable consulted for the username.
pub const ENV_USERNAME: &str = "RISPORT_USERNAME";
/// Environment variable consulted for the password.
pub const ENV_PASSWORD: &str = "RISPORT_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    ProfileNotFound { name: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named CUCM node profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name, falling back to `default_profile`.
    pub fn profile<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|profile| (name, profile))
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// CUCM nodes ship with self-signed certificates, so this defaults on.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Retries after the first attempt of a query.
    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default)]
    pub backoff: BackoffKind,

    /// Status codes retried as transient overload.
    #[serde(default = "default_retry_on")]
    pub retry_on: Vec<u16>,
}

/// How the retry delay grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    #[default]
    Fixed,
    /// Doubles per attempt, capped at 30 seconds.
    Exponential,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: default_insecure(),
            timeout: default_timeout(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            backoff: BackoffKind::default(),
            retry_on: default_retry_on(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    1000
}
fn default_retry_on() -> Vec<u16> {
    vec![503]
}

/// A named CUCM node profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Hostname or IP of the node, or a full `https://host:port` URL.
    pub host: String,

    /// Port when `host` is a bare name. Defaults to 8443.
    pub port: Option<u16>,

    /// Application user with the Standard CCM Admin Users role.
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Path to a PEM CA certificate for the node's Tomcat cert.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,

    pub retries: Option<u32>,

    pub retry_delay_ms: Option<u64>,

    pub backoff: Option<BackoffKind>,

    pub retry_on: Option<Vec<u16>>,

    /// Extra HTTP headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Profile {
    /// Service base URL for this profile.
    pub fn base_url(&self) -> Result<url::Url, ConfigError> {
        let raw = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("https://{}:{}", self.host, self.port.unwrap_or(DEFAULT_PORT))
        };
        raw.parse().map_err(|_| ConfigError::Validation {
            field: "host".into(),
            reason: format!("invalid host or URL: {}", self.host),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "risport", "risport").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("risport");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` if it exists, then `RISPORT_` environment keys.
///
/// Nested keys use a double underscore: `RISPORT_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RISPORT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Render config as TOML with every plaintext password masked.
pub fn render_redacted(cfg: &Config) -> Result<String, ConfigError> {
    let mut redacted = cfg.clone();
    for profile in redacted.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("********".into());
        }
    }
    Ok(toml::to_string_pretty(&redacted)?)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the credential pair for a profile.
///
/// Username: profile, then `RISPORT_USERNAME`. Password: `RISPORT_PASSWORD`,
/// then the system keyring, then plaintext in the profile.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    resolve_credentials_with(profile, profile_name, |name| std::env::var(name).ok(), keyring_password)
}

fn resolve_credentials_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    let username = profile
        .username
        .clone()
        .or_else(|| env(ENV_USERNAME))
        .ok_or_else(no_credentials)?;

    let password = env(ENV_PASSWORD)
        .or_else(|| keyring(profile_name))
        .or_else(|| profile.password.clone())
        .ok_or_else(no_credentials)?;

    Ok(Credentials::new(username, SecretString::from(password)))
}

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
}

fn keyring_password(profile_name: &str) -> Option<String> {
    keyring_entry(profile_name).ok()?.get_password().ok()
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ClientConfig` from a profile, with no CLI flag overrides.
///
/// `RISPORT_RETRIES` / `RISPORT_RETRIES_DELAY` take precedence over the
/// file's retry settings.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let credentials = resolve_credentials(profile, profile_name)?;
    client_config_with_credentials(profile, defaults, credentials)
}

/// Build a `ClientConfig` from a profile and already-resolved credentials.
pub fn client_config_with_credentials(
    profile: &Profile,
    defaults: &Defaults,
    credentials: Credentials,
) -> Result<ClientConfig, ConfigError> {
    let mut config = build_client_config(profile, defaults, profile.base_url()?, credentials);
    config.retry = config.retry.with_env_overrides();
    Ok(config)
}

fn build_client_config(
    profile: &Profile,
    defaults: &Defaults,
    base_url: url::Url,
    credentials: Credentials,
) -> ClientConfig {
    let tls = if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    };

    let mut config = ClientConfig::new(base_url, credentials)
        .with_transport(transport)
        .with_retry(retry_policy(profile, defaults));
    for (name, value) in &profile.headers {
        config = config.with_header(name, value);
    }
    config
}

/// Retry policy from profile and defaults, before environment overrides.
pub fn retry_policy(profile: &Profile, defaults: &Defaults) -> RetryPolicy {
    let policy = RetryPolicy {
        delay: Duration::from_millis(profile.retry_delay_ms.unwrap_or(defaults.retry_delay_ms)),
        retry_on: profile
            .retry_on
            .clone()
            .unwrap_or_else(|| defaults.retry_on.clone()),
        ..RetryPolicy::default()
    }
    .with_retries(profile.retries.unwrap_or(defaults.retries));

    match profile.backoff.unwrap_or(defaults.backoff) {
        BackoffKind::Fixed => policy,
        BackoffKind::Exponential => policy.exponential(),
    }
}
