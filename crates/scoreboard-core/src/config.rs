// ── Runtime client configuration ──
//
// These types describe *how* to talk to a scoreboard server. They carry
// credential data and tuning knobs but never touch disk; the CLI builds a
// `ClientConfig` from its profile and flags and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use scoreboard_api::transport::{TlsMode, TransportConfig};

/// Default interval between `last_changed` checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Username and password for the cookie session.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Tuning for the change notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// How often the server's change marker is checked while anyone is
    /// subscribed.
    pub poll_interval: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Configuration for a session against one scoreboard server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., `http://localhost:8000/api`).
    pub url: Url,
    /// Logged in on connect when present.
    pub credentials: Option<Credentials>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Change notifier tuning.
    pub notifier: NotifierConfig,
}

impl ClientConfig {
    /// A config for `url` with default timeout, TLS, and poll interval and
    /// no credentials.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            notifier: NotifierConfig::default(),
        }
    }

    /// Build the transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
            cookie_jar: None, // ApiClient::new adds one automatically
        }
    }
}
