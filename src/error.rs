//! Error types for the Backlog API client.

use std::fmt;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Errors that can occur when interacting with the Backlog API.
#[derive(Debug, Error)]
pub enum Error {
    /// The client configuration is unusable (malformed base URL).
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Network or HTTP transport failure. Any URL carried by the underlying
    /// error has had its `apiKey` value redacted before construction.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with a non-2xx status. The URL is redacted.
    #[error("{method} {url}: {status}\n{errors}")]
    Api {
        method: Method,
        url: Url,
        status: StatusCode,
        errors: ApiErrors,
    },

    /// A 2xx response body could not be decoded into the expected shape.
    #[error("invalid API response: {0}")]
    Decode(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The parsed error detail of an API error, if this is one.
    pub fn api_errors(&self) -> Option<&ApiErrors> {
        match self {
            Error::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// The body of a non-2xx response.
///
/// Backlog API v2 reports an array of error entries; older deployments return
/// a single message field. Both shapes are parsed best-effort; anything else
/// degrades to an empty `Structured` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiErrors {
    /// API v2 shape: `{"errors": [{"message", "code", "moreInfo"}, ...]}`.
    Structured { errors: Vec<ApiErrorDetail> },
    /// Legacy shape: `{"message": "..."}`.
    Plain { message: String },
}

/// One entry in a structured API error body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub more_info: String,
}

impl ApiErrors {
    /// Parse an error body, falling back to an empty structured list when the
    /// body is not JSON or matches neither known shape.
    pub(crate) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// The individual error entries, empty for the legacy message shape.
    pub fn details(&self) -> &[ApiErrorDetail] {
        match self {
            ApiErrors::Structured { errors } => errors,
            ApiErrors::Plain { .. } => &[],
        }
    }
}

impl Default for ApiErrors {
    fn default() -> Self {
        ApiErrors::Structured { errors: Vec::new() }
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrors::Structured { errors } => {
                for e in errors {
                    writeln!(
                        f,
                        "  code:{}, message:{}, info:{}",
                        e.code, e.message, e.more_info
                    )?;
                }
                Ok(())
            }
            ApiErrors::Plain { message } => writeln!(f, "  message:{message}"),
        }
    }
}
