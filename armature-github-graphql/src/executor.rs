//! GraphQL request execution.

use async_trait::async_trait;
use http::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ExecuteError;
use crate::request::GraphQLRequest;
use crate::response::GraphQLResponse;

/// Longest response body kept in [`ExecuteError::Status`].
const MAX_ERROR_BODY: usize = 4096;

/// Executes GraphQL requests.
///
/// Implementations perform a single request and parse the response envelope.
/// They do not retry.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute a request.
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, ExecuteError>;
}

/// Executor posting JSON over a caller-supplied HTTP client.
///
/// Credentials are expected to be added by the HTTP client, e.g. through its
/// default headers, or through [`ClientConfig::default_headers`].
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl HttpExecutor {
    /// Create an executor for the configured endpoint.
    pub fn new(config: ClientConfig, http_client: reqwest::Client) -> Result<Self, ExecuteError> {
        Url::parse(&config.endpoint)
            .map_err(|e| ExecuteError::InvalidUrl(format!("{}: {}", config.endpoint, e)))?;

        Ok(Self::from_parts(config, http_client))
    }

    /// Executor for the public GitHub endpoint.
    pub fn github(http_client: reqwest::Client) -> Self {
        Self::from_parts(ClientConfig::default(), http_client)
    }

    fn from_parts(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Get the endpoint.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, ExecuteError> {
        debug!(
            endpoint = %self.config.endpoint,
            operation = request.operation_name.as_deref().unwrap_or(""),
            "Executing GraphQL request"
        );

        let mut http_request = self.http_client.post(self.config.endpoint.as_str());

        // Add default headers
        for (name, value) in &self.config.default_headers {
            http_request = http_request.header(name.as_str(), value.as_str());
        }

        http_request = http_request
            .header(USER_AGENT, self.config.user_agent.as_str())
            .header(CONTENT_TYPE, "application/json");

        if let Some(timeout) = self.config.timeout {
            http_request = http_request.timeout(timeout);
        }

        let response = http_request.json(&request).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        if !status.is_success() {
            let body = truncate_body(response.text().await?);
            warn!(status = %status, body = %body, "GraphQL request failed");
            return Err(ExecuteError::Status {
                status,
                headers,
                body,
            });
        }

        let body = response.bytes().await?;
        let mut graphql_response: GraphQLResponse = serde_json::from_slice(&body)?;
        graphql_response.status = status;
        graphql_response.headers = headers;

        debug!(
            status = %status,
            errors = graphql_response.errors.as_ref().map_or(0, Vec::len),
            "Received GraphQL response"
        );
        Ok(graphql_response)
    }
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}
