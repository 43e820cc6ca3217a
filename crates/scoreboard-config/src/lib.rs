//! Shared configuration for scoreboard clients.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `scoreboard_core::ClientConfig`. The CLI layers its
//! flag overrides on top of these.

use std::collections::HashMap;
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

use scoreboard_core::{ClientConfig, Credentials, NotifierConfig, TlsVerification};

/// Keyring service name for stored passwords.
const KEYRING_SERVICE: &str = "scoreboard";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for '{username}' in profile '{profile}'")]
    NoCredentials { profile: String, username: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
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

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval_ms() -> u64 {
    1000
}

/// A named server profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API root URL (e.g., "http://localhost:8000/api").
    pub server: String,

    /// Username to log in as.
    pub username: Option<String>,

    /// Password in plaintext. Prefer keyring or env var..
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override change poll interval (milliseconds).
    pub poll_interval_ms: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("app", "scoreboard", "scoreboard").map_or_else(
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
    p.push("scoreboard");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// A missing file yields the defaults; a file that exists but fails to
/// parse or extract is an error, never silently replaced.
///
/// Environment keys use the `SCOREBOARD_` prefix and `__` as the nesting
/// separator, e.g. `SCOREBOARD_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SCOREBOARD_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Keyring account under which a profile's password is stored.
pub fn keyring_account(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_account(profile_name)).map_err(
        |e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        },
    )?;
    entry
        .set_password(password)
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

/// Resolve login credentials for a profile.
///
/// Returns `Ok(None)` when the profile has no username (anonymous use).
/// With a username, the password comes from the first of:
/// `password_env` → `SCOREBOARD_PASSWORD` → keyring → plaintext.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<Credentials>, ConfigError> {
    let Some(username) = profile
        .username
        .clone()
        .or_else(|| std::env::var("SCOREBOARD_USERNAME").ok())
    else {
        return Ok(None);
    };

    let credentials = |password: String| {
        Ok(Some(Credentials {
            username: username.clone(),
            password: SecretString::from(password),
        }))
    };

    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return credentials(pw);
        }
    }

    // 2. Shared env var
    if let Ok(pw) = std::env::var("SCOREBOARD_PASSWORD") {
        return credentials(pw);
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_account(profile_name)) {
        if let Ok(pw) = entry.get_password() {
            return credentials(pw);
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return credentials(pw.clone());
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        username,
    })
}

/// Parse and check a server URL.
pub fn parse_server_url(server: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!("expected an http(s) URL, got '{server}'"),
        });
    }
    Ok(url)
}

/// Check a poll interval, rejecting zero.
pub fn poll_interval(millis: u64) -> Result<Duration, ConfigError> {
    if millis == 0 {
        return Err(ConfigError::Validation {
            field: "poll_interval_ms".into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_millis(millis))
}

/// Build a `ClientConfig` from a profile without CLI flag overrides.
///
/// Profile values win over `defaults`.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let credentials = resolve_credentials(profile, profile_name)?;
    client_config(profile, defaults, credentials)
}

/// Build a `ClientConfig` from a profile with already-resolved credentials.
pub fn client_config(
    profile: &Profile,
    defaults: &Defaults,
    credentials: Option<Credentials>,
) -> Result<ClientConfig, ConfigError> {
    let url = parse_server_url(&profile.server)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ClientConfig {
        url,
        credentials,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        notifier: NotifierConfig {
            poll_interval: poll_interval(
                profile.poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
            )?,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.poll_interval_ms, 1000);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config(
            r#"
            [profiles.home]
            username = "alice"

            [profiles.work]
            server = "http://localhost:8000/api"
            "#,
        );
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "got {err:?}");

        let file = write_config("[profiles.work\nserver = ");
        assert!(load_config_from(file.path()).is_err());
    }

    #[test]
    fn profiles_load_from_toml() {
        let file = write_config(
            r#"
            default_profile = "club"

            [defaults]
            poll_interval_ms = 2500

            [profiles.club]
            server = "https://scores.example.com/api"
            timeout = 5
            "#,
        );
        let cfg = load_config_from(file.path()).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("club"));
        assert_eq!(cfg.defaults.poll_interval_ms, 2500);
        assert_eq!(cfg.defaults.output, "table");

        let profile = &cfg.profiles["club"];
        let client = profile_to_client_config(profile, "club", &cfg.defaults).unwrap();
        assert_eq!(client.url.as_str(), "https://scores.example.com/api");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.notifier.poll_interval, Duration::from_millis(2500));
        assert!(client.credentials.is_none());
        assert_eq!(client.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "http://localhost:8000/api".into(),
                insecure: Some(true),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"].server, "http://localhost:8000/api");
        assert_eq!(loaded.profiles["default"].insecure, Some(true));
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let profile = Profile {
            server: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_client_config(&profile, "bad", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "server"));

        assert!(parse_server_url("ftp://example.com/api").is_err());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(poll_interval(0).is_err());
        assert_eq!(poll_interval(250).unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn insecure_profile_skips_verification() {
        let profile = Profile {
            server: "https://localhost:8443/api".into(),
            insecure: Some(true),
            ..Profile::default()
        };
        let client = profile_to_client_config(&profile, "dev", &Defaults::default()).unwrap();
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
    }
}
