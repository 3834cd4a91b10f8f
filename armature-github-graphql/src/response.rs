//! GraphQL response types.

use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;
use serde_json::value::RawValue;
use thiserror::Error;

use crate::enhance::take_field;
use crate::error::{BoxError, ExecuteError, RawFields};

/// GraphQL response envelope as received from the server.
#[derive(Debug, Default, Deserialize)]
pub struct GraphQLResponse {
    /// HTTP status of the response.
    #[serde(skip)]
    pub status: StatusCode,
    /// HTTP headers of the response.
    #[serde(skip)]
    pub headers: HeaderMap,
    /// The data returned by the query/mutation, still encoded.
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
    /// Errors returned by the server.
    #[serde(default)]
    pub errors: Option<Vec<ResponseErrorItem>>,
    /// Extensions (for tracing, rate limit info, etc.).
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphQLResponse {
    /// Check if the response has errors.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Decode the data, returning an error if there are GraphQL errors.
    ///
    /// The error keeps the status, headers and any partial data.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Response<T>, ExecuteError> {
        let data = self.data.filter(|raw| raw.get() != "null");

        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            let source = data
                .as_deref()
                .and_then(|raw| serde_json::from_str::<T>(raw.get()).err())
                .map(|e| Box::new(e) as BoxError);
            return Err(ExecuteError::GraphQL(ResponseErrors {
                status: self.status,
                headers: self.headers,
                data,
                ..ResponseErrors::new(source, errors)
            }));
        }

        let raw = data.ok_or(ExecuteError::MissingData)?;
        let data = serde_json::from_str(raw.get())?;
        Ok(Response {
            status: self.status,
            headers: self.headers,
            data,
        })
    }
}

/// A successfully decoded response.
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// HTTP headers of the response.
    pub headers: HeaderMap,
    /// The decoded data.
    pub data: T,
}

impl<T> Response<T> {
    /// Get the data, dropping status and headers.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// GraphQL-level errors as parsed by the executor, before GitHub-specific
/// entries are extracted.
#[derive(Debug, Default, Error)]
#[error("{message}")]
pub struct ResponseErrors {
    /// The wrapped error, if any.
    #[source]
    pub source: Option<BoxError>,
    /// Top-level error message.
    pub message: String,
    /// Response errors, if the server sent a list.
    pub errors: Option<Vec<ResponseErrorItem>>,
    /// HTTP status of the response.
    pub status: StatusCode,
    /// HTTP headers of the response.
    pub headers: HeaderMap,
    /// Partial data sent alongside the errors, still encoded.
    pub data: Option<Box<RawValue>>,
}

impl ResponseErrors {
    /// Build from the server's error list, summarising it into one message.
    pub fn new(source: Option<BoxError>, errors: Vec<ResponseErrorItem>) -> Self {
        let message = match errors.as_slice() {
            [] => "GraphQL error".to_string(),
            [only] => format!("GraphQL error: {}", only.message),
            [first, rest @ ..] => format!(
                "GraphQL error: {} (and {} more errors)",
                first.message,
                rest.len()
            ),
        };
        Self {
            source,
            message,
            errors: Some(errors),
            ..Default::default()
        }
    }
}

/// A GraphQL error entry. Everything besides `message` stays encoded in `raw`.
///
/// A missing or `null` message decodes as empty. A message that is not a
/// string stays in `raw`.
#[derive(Debug, Clone, Default)]
pub struct ResponseErrorItem {
    /// Error message.
    pub message: String,
    /// All other entries of the error object.
    pub raw: RawFields,
}

impl<'de> Deserialize<'de> for ResponseErrorItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = RawFields::deserialize(deserializer)?;
        let message = take_field::<String>(&mut raw, "message").unwrap_or_default();
        Ok(Self { message, raw })
    }
}
