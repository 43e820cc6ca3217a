use thiserror::Error;

/// Top-level error type for the `scoreboard-api` crate.
///
/// Every endpoint call resolves to either its decoded response or one of
/// these. `scoreboard-core` maps them into domain-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Server responses ────────────────────────────────────────────
    /// The server answered with a non-success HTTP status.
    ///
    /// `body` is a short text snippet of the response body, read after the
    /// status check so the caller sees the server's own message.
    #[error("Response to {endpoint} was HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Could not decode response to {endpoint}: {message}")]
    Deserialization {
        endpoint: String,
        message: String,
        body: String,
    },
}

impl Error {
    /// The HTTP status code, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the session (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// The endpoint name carried by the error, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Status { endpoint, .. } | Self::Deserialization { endpoint, .. } => {
                Some(endpoint)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    fn status(code: u16) -> Error {
        Error::Status {
            endpoint: "groups".into(),
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn status_helpers_classify_codes() {
        assert!(status(401).is_unauthorized());
        assert!(status(404).is_not_found());
        assert!(!status(500).is_not_found());
        assert!(status(503).is_transient());
        assert!(!status(400).is_transient());
    }

    #[test]
    fn display_names_endpoint_and_status() {
        let err = Error::Status {
            endpoint: "get_group".into(),
            status: 400,
            body: "Group not found".into(),
        };
        assert_eq!(err.to_string(), "Response to get_group was HTTP 400: Group not found");
        assert_eq!(err.endpoint(), Some("get_group"));
    }
}
