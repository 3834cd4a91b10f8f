//! GitHub GraphQL client configuration.

use std::env;
use std::time::Duration;

/// Endpoint of the public GitHub GraphQL API.
pub const GITHUB_ENDPOINT: &str = "https://api.github.com/graphql";

/// Environment variable overriding the endpoint.
pub const ENV_URL: &str = "ARMATURE_GITHUB_GRAPHQL_URL";

/// Environment variable setting the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "ARMATURE_GITHUB_GRAPHQL_TIMEOUT_SECS";

/// Environment variable overriding the user agent.
pub const ENV_USER_AGENT: &str = "ARMATURE_GITHUB_GRAPHQL_USER_AGENT";

/// GitHub GraphQL client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Per-request timeout. `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
    /// Default headers for all requests.
    pub default_headers: Vec<(String, String)>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: GITHUB_ENDPOINT.to_string(),
            timeout: None,
            default_headers: Vec::new(),
            user_agent: format!("armature-github-graphql/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create configuration for a specific endpoint, e.g. a GitHub Enterprise
    /// Server instance.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// - `ARMATURE_GITHUB_GRAPHQL_URL` - endpoint URL
    /// - `ARMATURE_GITHUB_GRAPHQL_TIMEOUT_SECS` - request timeout in seconds
    /// - `ARMATURE_GITHUB_GRAPHQL_USER_AGENT` - user agent
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from a variable lookup function.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let endpoint = lookup(ENV_URL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.endpoint);

        let timeout = lookup(ENV_TIMEOUT_SECS)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .or(defaults.timeout);

        let user_agent = lookup(ENV_USER_AGENT)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        Self {
            endpoint,
            timeout,
            default_headers: defaults.default_headers,
            user_agent,
        }
    }
}

/// Builder for GitHub GraphQL client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the GraphQL endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Add a default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .push((name.into(), value.into()));
        self
    }

    /// Set user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
