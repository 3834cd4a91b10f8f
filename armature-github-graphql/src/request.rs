//! GraphQL request builders.

use serde::de::DeserializeOwned;
use serde::{Serialize, ser};
use serde_json::{Map, Value};

use crate::error::{ExecuteError, Result};
use crate::{Client, Response};

/// Marker for mutation input objects.
///
/// A value passed to [`MutationBuilder::input`] is sent as the `input`
/// variable, matching the `input: XxxInput!` argument of GitHub mutations.
pub trait Input: Serialize + Send + Sync {}

/// GraphQL request payload.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    /// The GraphQL query or mutation.
    pub query: String,
    /// Operation name (for documents with multiple operations).
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Variables for the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQLRequest {
    /// Create a new request.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    /// Set the operation name.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Set a single variable.
    pub fn variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value);
        self
    }
}

/// Query builder for GraphQL queries.
pub struct QueryBuilder<'a> {
    client: &'a Client,
    request: GraphQLRequest,
    error: Option<serde_json::Error>,
}

impl<'a> QueryBuilder<'a> {
    /// Create a new query builder.
    pub(crate) fn new(client: &'a Client, query: impl Into<String>) -> Self {
        Self {
            client,
            request: GraphQLRequest::new(query),
            error: None,
        }
    }

    /// Set the operation name.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.request.operation_name = Some(name.into());
        self
    }

    /// Set variables. `variables` must serialize to a JSON object.
    pub fn variables<T: Serialize>(mut self, variables: T) -> Self {
        match serde_json::to_value(variables) {
            Ok(Value::Object(map)) => self.request.variables = Some(map),
            Ok(_) => {
                self.fail(ser::Error::custom("variables must serialize to a JSON object"));
            }
            Err(e) => self.fail(e),
        }
        self
    }

    /// Set a single variable.
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self.request = self.request.variable(name, value),
            Err(e) => self.fail(e),
        }
        self
    }

    /// The request that will be sent.
    pub fn request(&self) -> &GraphQLRequest {
        &self.request
    }

    /// Execute the query and deserialize the data.
    pub async fn send<T: DeserializeOwned>(self) -> Result<T> {
        self.send_with_response().await.map(Response::into_data)
    }

    /// Execute the query, keeping the HTTP status and headers.
    pub async fn send_with_response<T: DeserializeOwned>(self) -> Result<Response<T>> {
        if let Some(e) = self.error {
            return Err(ExecuteError::Json(e).into());
        }
        self.client.execute(self.request).await
    }

    // Keeps the first failure; it is reported by `send`.
    fn fail(&mut self, error: serde_json::Error) {
        self.error.get_or_insert(error);
    }
}

/// Mutation builder for GraphQL mutations.
pub struct MutationBuilder<'a> {
    inner: QueryBuilder<'a>,
}

impl<'a> MutationBuilder<'a> {
    /// Create a new mutation builder.
    pub(crate) fn new(client: &'a Client, mutation: impl Into<String>) -> Self {
        Self {
            inner: QueryBuilder::new(client, mutation),
        }
    }

    /// Set the operation name.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.operation_name(name);
        self
    }

    /// Set the mutation input, sent as the `input` variable.
    pub fn input<I: Input>(mut self, input: I) -> Self {
        self.inner = self.inner.variable("input", input);
        self
    }

    /// Set variables. `variables` must serialize to a JSON object.
    pub fn variables<T: Serialize>(mut self, variables: T) -> Self {
        self.inner = self.inner.variables(variables);
        self
    }

    /// Set a single variable.
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        self.inner = self.inner.variable(name, value);
        self
    }

    /// The request that will be sent.
    pub fn request(&self) -> &GraphQLRequest {
        self.inner.request()
    }

    /// Execute the mutation and deserialize the data.
    pub async fn send<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.send().await
    }

    /// Execute the mutation, keeping the HTTP status and headers.
    pub async fn send_with_response<T: DeserializeOwned>(self) -> Result<Response<T>> {
        self.inner.send_with_response().await
    }
}
