// ── Core error types ──
//
// Domain-level errors from scoreboard-core. Consumers see what went wrong
// (not logged in, not found, server unreachable) rather than raw HTTP
// details. The `From<scoreboard_api::Error>` impl does the translation.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to scoreboard server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {endpoint} ({message})")]
    NotFound { endpoint: String, message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Endpoint that produced the error, if known.
        endpoint: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A change check inside the polling loop failed.
///
/// Logged by the loop and never delivered to subscribers; the stored
/// change marker is left as it was and the next tick tries again.
#[derive(Debug, Error)]
#[error("change poll failed: {0}")]
pub struct PollError(#[from] pub CoreError);

// ── Conversion from transport-layer errors ───────────────────────────

impl From<scoreboard_api::Error> for CoreError {
    fn from(err: scoreboard_api::Error) -> Self {
        use scoreboard_api::Error as Api;

        match err {
            Api::Status {
                endpoint,
                status: 401,
                body,
            } => CoreError::AuthenticationFailed {
                message: if body.is_empty() {
                    format!("{endpoint} requires a logged-in session")
                } else {
                    body
                },
            },
            Api::Status {
                endpoint,
                status,
                body,
            } if status == 404 || (status == 400 && is_missing_entity(&body)) => {
                CoreError::NotFound {
                    endpoint,
                    message: body,
                }
            }
            Api::Status {
                endpoint,
                status,
                body,
            } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                endpoint: Some(endpoint),
                status: Some(status),
            },
            Api::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        endpoint: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            Api::Deserialization {
                endpoint, message, ..
            } => CoreError::Api {
                message: format!("unexpected response body: {message}"),
                endpoint: Some(endpoint),
                status: None,
            },
        }
    }
}

/// The server answers lookups of unknown users, groups, scorables and
/// scores with HTTP 400 and a body such as `group 'g1' not found`.
fn is_missing_entity(body: &str) -> bool {
    let body = body.trim();
    body.ends_with(" not found")
        && ["user '", "group '", "scorable '", "score '"]
            .iter()
            .any(|prefix| body.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    fn status(code: u16, body: &str) -> scoreboard_api::Error {
        scoreboard_api::Error::Status {
            endpoint: "groups".into(),
            status: code,
            body: body.into(),
        }
    }

    #[test]
    fn unauthorized_maps_to_authentication_failed() {
        let err = CoreError::from(status(401, ""));
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
        assert!(err.to_string().contains("logged-in session"));
    }

    #[test]
    fn not_found_keeps_endpoint() {
        match CoreError::from(status(404, "gone")) {
            CoreError::NotFound { endpoint, message } => {
                assert_eq!(endpoint, "groups");
                assert_eq!(message, "gone");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_entity_bad_request_maps_to_not_found() {
        for body in [
            "group 'g1' not found",
            "scorable 's1' not found",
            "score 'x' not found",
            "user 'alice' not found",
        ] {
            match CoreError::from(status(400, body)) {
                CoreError::NotFound { endpoint, message } => {
                    assert_eq!(endpoint, "groups");
                    assert_eq!(message, body);
                }
                other => panic!("expected NotFound for {body:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn other_statuses_keep_code() {
        match CoreError::from(status(400, "scorable name must not be empty")) {
            CoreError::Api { status, endpoint, .. } => {
                assert_eq!(status, Some(400));
                assert_eq!(endpoint.as_deref(), Some("groups"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }
}
