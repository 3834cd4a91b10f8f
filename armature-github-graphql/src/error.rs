//! GitHub GraphQL client error types.

use std::collections::HashMap;

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::response::ResponseErrors;

/// Result type for GitHub GraphQL client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used for wrapped causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Raw, still-encoded JSON entries keyed by field name.
pub type RawFields = HashMap<String, Box<RawValue>>;

/// Value of the `type` entry GitHub sets when a request hits the rate limit.
pub const RATE_LIMITED: &str = "RATE_LIMITED";

/// Errors returned by [`Client`](crate::Client).
///
/// GraphQL-level errors are always reported as [`Error::Api`]. Everything else
/// produced by the executor is passed through untouched as [`Error::Execute`].
#[derive(Debug, Error)]
pub enum Error {
    /// Transport, status or decoding error from the executor.
    #[error(transparent)]
    Execute(ExecuteError),

    /// GraphQL errors reported by the API.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Get the API error if the server reported GraphQL errors.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            Self::Execute(_) => None,
        }
    }

    /// Get the executor error if this is not a GraphQL-level error.
    pub fn execute_error(&self) -> Option<&ExecuteError> {
        match self {
            Self::Execute(err) => Some(err),
            Self::Api(_) => None,
        }
    }
}

impl From<ExecuteError> for Error {
    fn from(err: ExecuteError) -> Self {
        crate::enhance::enhance_error(err)
    }
}

/// Errors produced by an [`Executor`](crate::Executor).
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Response headers.
        headers: HeaderMap,
        /// Response body, cut to at most 4 KiB.
        body: String,
    },

    /// GraphQL errors returned by the server.
    #[error(transparent)]
    GraphQL(#[from] ResponseErrors),

    /// The response carried neither data nor errors.
    #[error("Response contained no data")]
    MissingData,

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Error raised by a custom transport.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),
}

impl ExecuteError {
    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Check if this is a GraphQL error (server-side).
    pub fn is_graphql_error(&self) -> bool {
        matches!(self, Self::GraphQL(_))
    }

    /// Get the HTTP status code, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// GraphQL-level errors with GitHub-specific entries parsed out.
#[derive(Debug, Default, Error)]
#[error("{message}")]
pub struct ApiError {
    /// The wrapped error, if any.
    #[source]
    pub source: Option<BoxError>,

    /// Top-level error message.
    pub message: String,

    /// The response errors, in the order the server returned them.
    pub errors: Vec<ErrorItem>,

    /// HTTP status of the response.
    pub status: StatusCode,

    /// HTTP headers of the response, e.g. `x-ratelimit-reset`.
    pub headers: HeaderMap,

    /// Partial data sent alongside the errors, still encoded.
    pub data: Option<Box<RawValue>>,
}

impl ApiError {
    /// Get the response errors.
    pub fn errors(&self) -> &[ErrorItem] {
        &self.errors
    }

    /// Decode the partial data, if the server sent any.
    ///
    /// Fields the server could not resolve are usually `null`, so `T` should
    /// make them optional.
    pub fn data<T: DeserializeOwned>(&self) -> Option<serde_json::Result<T>> {
        self.data.as_ref().map(|raw| serde_json::from_str(raw.get()))
    }

    /// Get a response header as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if any response error reports the rate limit.
    pub fn is_rate_limited(&self) -> bool {
        self.errors.iter().any(ErrorItem::is_rate_limited)
    }
}

/// A response error. See <https://spec.graphql.org/>.
#[derive(Debug, Clone, Default)]
pub struct ErrorItem {
    /// Error message.
    pub message: String,

    /// Value of the `type` entry, empty if absent.
    ///
    /// Not part of the GraphQL specification, but GitHub sets it for some
    /// errors. Known values: `RATE_LIMITED`.
    pub error_type: String,

    /// Value of the `extensions` entry.
    pub extensions: Option<Map<String, Value>>,

    /// Raw entries as returned by the server, minus the ones parsed into
    /// the fields above.
    pub raw: RawFields,
}

impl ErrorItem {
    /// Get a single extension value.
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.as_ref().and_then(|ext| ext.get(key))
    }

    /// Get a raw entry that was not parsed into a named field.
    pub fn raw_field(&self, key: &str) -> Option<&RawValue> {
        self.raw.get(key).map(|v| &**v)
    }

    /// Check if this error reports the rate limit.
    pub fn is_rate_limited(&self) -> bool {
        self.error_type == RATE_LIMITED
    }
}

impl std::fmt::Display for ErrorItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.error_type.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.error_type, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_api_error_display_and_source() {
        let err = ApiError {
            source: Some("decode failed".into()),
            message: "msg".to_string(),
            ..Default::default()
        };

        assert_eq!(err.to_string(), "msg");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("decode failed"));
    }

    #[test]
    fn test_error_source_chain_reaches_wrapped_cause() {
        let err = Error::Api(ApiError {
            source: Some("inner".into()),
            message: "outer".to_string(),
            ..Default::default()
        });

        assert_eq!(err.to_string(), "outer");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("inner"));
    }

    #[test]
    fn test_rate_limited() {
        let item = ErrorItem {
            message: "API rate limit exceeded".to_string(),
            error_type: RATE_LIMITED.to_string(),
            ..Default::default()
        };
        assert!(item.is_rate_limited());
        assert_eq!(item.to_string(), "RATE_LIMITED: API rate limit exceeded");

        let err = ApiError {
            message: "msg".to_string(),
            errors: vec![ErrorItem::default(), item],
            ..Default::default()
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_api_error_partial_data() {
        #[derive(Debug, serde::Deserialize)]
        struct Data {
            viewer: Option<String>,
            repo: Option<String>,
        }

        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-reset", "1700000000".parse().unwrap());
        let data = r#"{"viewer":"octocat","repo":null}"#;
        let err = ApiError {
            headers,
            data: Some(RawValue::from_string(data.to_string()).unwrap()),
            ..Default::default()
        };

        let data: Data = err.data().unwrap().unwrap();
        assert_eq!(data.viewer.as_deref(), Some("octocat"));
        assert!(data.repo.is_none());
        assert_eq!(err.header("x-ratelimit-reset"), Some("1700000000"));
        assert!(err.header("retry-after").is_none());

        assert!(ApiError::default().data::<Data>().is_none());
    }

    #[test]
    fn test_status_accessor() {
        let err = ExecuteError::Status {
            status: StatusCode::UNAUTHORIZED,
            headers: HeaderMap::new(),
            body: r#"{"message":"Bad credentials"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(
            err.to_string(),
            r#"HTTP status 401 Unauthorized: {"message":"Bad credentials"}"#
        );
        assert!(!err.is_timeout());
        assert!(!err.is_graphql_error());
    }
}
