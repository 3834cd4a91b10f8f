//! Parsing of GitHub-specific entries of response errors.
//!
//! GitHub adds a `type` entry to some response errors and may attach an
//! `extensions` object. Neither is part of the generic error item, so they
//! arrive as raw JSON and are promoted to named fields here.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{ApiError, Error, ErrorItem, ExecuteError, RawFields};
use crate::response::{ResponseErrorItem, ResponseErrors};

/// Replace GraphQL-level errors with an [`ApiError`].
///
/// Any other error is returned unmodified as [`Error::Execute`].
pub fn enhance_error(err: ExecuteError) -> Error {
    match err {
        ExecuteError::GraphQL(base) => Error::Api(enhance_response_errors(base)),
        other => Error::Execute(other),
    }
}

fn enhance_response_errors(base: ResponseErrors) -> ApiError {
    let errors = base
        .errors
        .map(|items| items.into_iter().map(enhance_error_item).collect())
        .unwrap_or_default();

    ApiError {
        source: base.source,
        message: base.message,
        errors,
        status: base.status,
        headers: base.headers,
        data: base.data,
    }
}

/// Promote the `extensions` and `type` entries of a response error.
pub fn enhance_error_item(base: ResponseErrorItem) -> ErrorItem {
    let mut raw = base.raw;
    let extensions = take_field::<Map<String, Value>>(&mut raw, "extensions");
    let error_type = take_field::<String>(&mut raw, "type").unwrap_or_default();

    ErrorItem {
        message: base.message,
        error_type,
        extensions,
        raw,
    }
}

/// Decode `raw[key]` as `T` and remove it from `raw` on success.
///
/// A missing key or a value that does not decode leaves `raw` untouched and
/// yields `None`. A JSON `null` decodes successfully and also yields `None`.
pub fn take_field<T: DeserializeOwned>(raw: &mut RawFields, key: &str) -> Option<T> {
    let value = raw.get(key)?;
    match serde_json::from_str::<Option<T>>(value.get()) {
        Ok(parsed) => {
            raw.remove(key);
            parsed
        }
        Err(e) => {
            trace!(key, error = %e, "Leaving undecodable error entry raw");
            None
        }
    }
}
