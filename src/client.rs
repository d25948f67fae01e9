//! Backlog API client implementation.
//!
//! This module provides the request/response envelope every endpoint call
//! goes through: authenticated request construction, execution, error
//! classification, and JSON decoding. Resource endpoints in the sibling
//! modules declare a path, a verb, and a target shape, and delegate here.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{ApiErrors, Error, Result};
use crate::params::Params;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Name of the credential query parameter attached to every request.
const API_KEY_PARAM: &str = "apiKey";

/// Placeholder substituted for the credential in any surfaced URL.
const REDACTED: &str = "REDACTED";

/// The Backlog API client.
///
/// Holds the immutable per-space configuration: an HTTP client, the base URL,
/// and the API key. Construct it once and share it; all methods take `&self`
/// and concurrent calls do not interfere.
pub struct Client {
    /// The HTTP client.
    http: reqwest::Client,
    /// Base endpoint, e.g. `https://{space}.backlog.com/api/v2/`.
    base_url: Url,
    /// Credential appended to every request as a query parameter.
    api_key: String,
}

impl Client {
    /// Create a client for a Backlog space.
    ///
    /// The space is the tenant subdomain: `new("demo", key)` talks to
    /// `https://demo.backlog.com/api/v2/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the derived base URL cannot be parsed or the HTTP
    /// client cannot be built.
    pub fn new(space: &str, api_key: &str) -> Result<Self> {
        Self::with_base_url(&format!("https://{space}.backlog.com/api/v2/"), api_key)
    }

    /// Create a client against an explicit base endpoint.
    ///
    /// Use this for non-default hosts (e.g. `backlog.jp`) or for tests. The
    /// base URL must end with a trailing slash for relative paths to resolve
    /// under it; `build_request` rejects bases that do not.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Create a client on top of a caller-supplied HTTP client.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: &str,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// The configured base endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an authenticated API request.
    ///
    /// Resolves `path` against the base URL, injects the API key as a query
    /// parameter, and sets `Accept: application/json`. Parameters, when
    /// present, go into the query string for GET and DELETE and into a
    /// form-encoded body for POST and PATCH.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL path does not end with
    /// `/` or the path does not resolve against it.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
    ) -> Result<Request> {
        if !self.base_url.path().ends_with('/') {
            return Err(Error::Config(format!(
                "base URL must have a trailing slash, but {:?} does not",
                self.base_url.as_str()
            )));
        }

        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid request path {path:?}: {e}")))?;
        url.query_pairs_mut().append_pair(API_KEY_PARAM, &self.api_key);

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");

        if let Some(params) = params {
            builder = if method == Method::GET || method == Method::DELETE {
                builder.query(params.pairs())
            } else {
                // reqwest sets the x-www-form-urlencoded content type.
                builder.form(params.pairs())
            };
        }

        builder.build().map_err(transport_error)
    }

    /// Execute an API request and decode the response body.
    ///
    /// On a non-2xx status the body is parsed into [`ApiErrors`] and returned
    /// as [`Error::Api`]. On success the JSON body is decoded into `T`; an
    /// empty body yields `None` (a valid no-content response, not an error).
    /// Every URL embedded in a returned error is redacted first.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<(Option<T>, Response)> {
        let method = request.method().clone();
        let url = sanitize_url(request.url());
        debug!(%method, %url, "executing API request");

        let resp = self.http.execute(request).await.map_err(transport_error)?;

        let response = Response {
            status: resp.status(),
            headers: resp.headers().clone(),
            url: sanitize_url(resp.url()),
        };

        if !response.status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let errors = ApiErrors::parse(&body);
            debug!(status = %response.status, %url, "API request failed");
            return Err(Error::Api {
                method,
                url,
                status: response.status,
                errors,
            });
        }

        let body = resp.text().await.map_err(transport_error)?;
        if body.is_empty() {
            return Ok((None, response));
        }

        let value = serde_json::from_str(&body)
            .map_err(|e| Error::Decode(format!("failed to parse response body: {e}")))?;
        Ok((Some(value), response))
    }
}

// The API key must never leak through Debug output.
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &REDACTED)
            .finish_non_exhaustive()
    }
}

/// A Backlog API response envelope.
///
/// Carries the response metadata (status, headers, redacted final URL) for
/// callers that need more than the decoded record.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
}

impl Response {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The final request URL with the credential redacted.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Convert a reqwest error, redacting the API key from any embedded URL.
fn transport_error(e: reqwest::Error) -> Error {
    let mut e = e;
    if let Some(u) = e.url_mut() {
        let clean = sanitize_url(u);
        *u = clean;
    }
    Error::Network(e)
}

/// Redact the `apiKey` query parameter from a URL.
///
/// Replaces only that parameter's value, preserving all other parameters and
/// their order. URLs without the parameter are returned unchanged.
fn sanitize_url(url: &Url) -> Url {
    let mut out = url.clone();
    if url.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == API_KEY_PARAM {
                    REDACTED.to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();
        out.query_pairs_mut().clear().extend_pairs(pairs);
    }
    out
}

/// Unwrap a decoded body that the endpoint requires to be present.
pub(crate) fn required<T>(body: Option<T>) -> Result<T> {
    body.ok_or_else(|| Error::Decode("unexpected empty response body".to_string()))
}
