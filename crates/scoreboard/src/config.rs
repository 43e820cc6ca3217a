//! CLI-side configuration: picks the active profile and layers global flags
//! over it to produce a `scoreboard_core::ClientConfig`.
//!
//! Loading, saving, and the credential chain live in `scoreboard-config`.

use secrecy::SecretString;

use scoreboard_config::{Config, Profile};
use scoreboard_core::{ClientConfig, Credentials};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use scoreboard_config::{config_path, load_config, save_config, store_password};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// Flags win over the profile, which wins over `[defaults]`. With no profile
/// on disk, `--server` alone is enough.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            });
        }
        None => Profile {
            server: global.server.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?,
            ..Profile::default()
        },
    };

    resolve_profile(&profile, &profile_name, &cfg, global)
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut profile = profile.clone();

    // 1. Server URL (flag > env > profile)
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }

    // 2. Username (flag > env > profile)
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }

    // 3. Tuning overrides
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(millis) = global.poll_interval_ms {
        profile.poll_interval_ms = Some(millis);
    }

    // 4. Credentials: a --password flag short-circuits the chain.
    let credentials = match (&profile.username, &global.password) {
        (Some(username), Some(password)) => Some(Credentials {
            username: username.clone(),
            password: SecretString::from(password.clone()),
        }),
        _ => scoreboard_config::resolve_credentials(&profile, profile_name)?,
    };

    Ok(scoreboard_config::client_config(
        &profile,
        &cfg.defaults,
        credentials,
    )?)
}
