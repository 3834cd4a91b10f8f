//! GitHub GraphQL client implementation.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::executor::{Executor, HttpExecutor};
use crate::request::{GraphQLRequest, MutationBuilder, QueryBuilder};
use crate::response::Response;

/// GitHub GraphQL v4 client.
///
/// Errors from the executor are passed through [`enhance_error`]: GraphQL-level
/// errors arrive as [`Error::Api`], everything else as [`Error::Execute`].
///
/// The client never retries. A caller may treat any of these as transient:
///
/// 1. an [`ExecuteError::Http`] whose `reqwest::Error` reports
///    `is_timeout()` or `is_connect()`;
/// 2. an [`ExecuteError::Status`] with a 5xx status;
/// 3. an [`ExecuteError::Status`] with status 429;
/// 4. an [`ApiError`](crate::ApiError) reporting `RATE_LIMITED`, once the
///    rate limit window has passed. The `x-ratelimit-reset` header is
///    available through [`ApiError::header`](crate::ApiError::header).
///
/// GraphQL errors often come with partial data; it is kept in the
/// [`ApiError`](crate::ApiError) together with the response status and headers.
///
/// [`enhance_error`]: crate::enhance_error
/// [`Error::Api`]: crate::Error::Api
/// [`Error::Execute`]: crate::Error::Execute
#[derive(Clone)]
pub struct Client {
    executor: Arc<dyn Executor>,
}

impl Client {
    /// Create a client for <https://api.github.com/graphql>.
    ///
    /// The HTTP client should add credentials to requests.
    pub fn new(http_client: reqwest::Client) -> Self {
        Self::with_executor(HttpExecutor::github(http_client))
    }

    /// Create a client for a GitHub Enterprise Server endpoint.
    ///
    /// The HTTP client should add credentials to requests.
    pub fn enterprise(endpoint: impl Into<String>, http_client: reqwest::Client) -> Result<Self> {
        Self::with_config(ClientConfig::new(endpoint), http_client)
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig, http_client: reqwest::Client) -> Result<Self> {
        let executor = HttpExecutor::new(config, http_client)?;
        Ok(Self::with_executor(executor))
    }

    /// Create a client over a custom executor.
    pub fn with_executor(executor: impl Executor + 'static) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    /// Create a query builder.
    pub fn query(&self, query: impl Into<String>) -> QueryBuilder<'_> {
        QueryBuilder::new(self, query)
    }

    /// Create a mutation builder.
    pub fn mutate(&self, mutation: impl Into<String>) -> MutationBuilder<'_> {
        MutationBuilder::new(self, mutation)
    }

    /// Execute a request and decode its data.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: GraphQLRequest,
    ) -> Result<Response<T>> {
        let response = self.executor.execute(request).await?;
        Ok(response.decode::<T>()?)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
