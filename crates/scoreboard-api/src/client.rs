// Scoreboard API HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction, the
// GET-vs-POST method rule, and status/body handling. The typed endpoint
// methods live in sibling modules as inherent impls to keep this one
// focused on transport mechanics.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Maximum number of characters of an error body kept in [`Error::Status`].
const ERROR_BODY_SNIPPET: usize = 200;

/// HTTP client for the scoreboard JSON API.
///
/// Every endpoint is a single request/response cycle against
/// `{base_url}/{endpoint}`: a `POST` with a JSON body when the call has
/// parameters, a bare `GET` otherwise. Cheap to clone; clones share the
/// connection pool and the session cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the server keeps the login session in a cookie). The
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build the full URL for an endpoint: `{base_url}/{name}`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{}", endpoint.name()))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Perform one round trip against `endpoint`.
    ///
    /// `Some(params)` sends a `POST` with the JSON-encoded parameters,
    /// `None` sends a `GET` without a body. `Content-Type` is always
    /// `application/json`. The response body is decoded into `R`.
    pub async fn call<P, R>(&self, endpoint: Endpoint, params: Option<&P>) -> Result<R, Error>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        let method = if params.is_some() {
            Method::POST
        } else {
            Method::GET
        };
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = params {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        parse_response(endpoint, resp).await
    }

    /// `GET` a parameterless endpoint.
    pub(crate) async fn get<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R, Error> {
        self.call::<(), R>(endpoint, None).await
    }

    /// `POST` JSON parameters to an endpoint.
    pub(crate) async fn post<P, R>(&self, endpoint: Endpoint, params: &P) -> Result<R, Error>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        self.call(endpoint, Some(params)).await
    }
}

/// Check the status and decode the JSON body.
///
/// On failure the body is read to completion first, so the error carries
/// the server's text rather than a placeholder.
async fn parse_response<R: DeserializeOwned>(endpoint: Endpoint, resp: Response) -> Result<R, Error> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Status {
            endpoint: endpoint.name().to_owned(),
            status: status.as_u16(),
            body: snippet(&body),
        });
    }

    let body = resp.text().await?;
    trace!(endpoint = endpoint.name(), bytes = body.len(), "response body received");

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        endpoint: endpoint.name().to_owned(),
        message: format!("{e} (body preview: {:?})", snippet(&body)),
        body,
    })
}

/// The first few characters of a body, cut on a char boundary.
fn snippet(body: &str) -> String {
    body.trim().chars().take(ERROR_BODY_SNIPPET).collect()
}
