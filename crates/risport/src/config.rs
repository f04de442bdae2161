//! CLI-side profile resolution: merges the config file, global flags and
//! environment into the `ClientConfig` the query commands run with.

use risport_api::{ClientConfig, Credentials};
use risport_config::{Config, Profile};
use secrecy::SecretString;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// A client configuration plus the context error messages need.
#[derive(Debug)]
pub struct Resolved {
    pub client: ClientConfig,
    pub profile_name: String,
    pub timeout_secs: u64,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the client configuration for the query commands.
///
/// A profile named with `--profile` must exist. Otherwise the active profile
/// is used when present, and `--host` alone is enough to run without one.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = risport_config::load_config_or_default();
    resolve_with(global, &cfg)
}

fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None if global.host.is_some() => Profile::default(),
        None => {
            return Err(CliError::NoConfig {
                path: risport_config::config_path().display().to_string(),
            });
        }
    };

    apply_overrides(&mut profile, global);

    let credentials = match (&global.password, &profile.username) {
        (Some(password), Some(username)) => {
            Credentials::new(username.clone(), SecretString::from(password.clone()))
        }
        _ => risport_config::resolve_credentials(&profile, &profile_name)?,
    };

    let timeout_secs = profile.timeout.unwrap_or(cfg.defaults.timeout);
    let client =
        risport_config::client_config_with_credentials(&profile, &cfg.defaults, credentials)?;

    tracing::debug!(
        profile = %profile_name,
        endpoint = %client.base_url,
        "resolved client configuration"
    );

    Ok(Resolved {
        client,
        profile_name,
        timeout_secs,
    })
}

/// Flags win over the profile.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}
