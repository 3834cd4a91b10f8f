//! # Armature GitHub GraphQL
//!
//! A client for the GitHub GraphQL v4 API with typed scalars and enhanced
//! errors.
//!
//! ## Features
//!
//! - **Typed scalars**: `BigInt`, `DateTime`, `PreciseDateTime`, `ID`, `URI`
//!   and the other GitHub scalars encode exactly to their wire text
//! - **Enhanced errors**: the GitHub `type` and `extensions` entries of
//!   response errors are parsed into named fields, nothing else is dropped
//! - **Pluggable execution**: bring your own `reqwest::Client` or implement
//!   [`Executor`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use armature_github_graphql::{Client, DateTime, Id};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Repository {
//!     id: Id,
//!     pushed_at: DateTime,
//! }
//!
//! #[derive(Deserialize)]
//! struct RepositoryQuery {
//!     repository: Repository,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The HTTP client adds the token to every request.
//!     let http = reqwest::Client::builder()
//!         .default_headers(auth_headers())
//!         .build()?;
//!     let client = Client::new(http);
//!
//!     let data: RepositoryQuery = client
//!         .query(
//!             "query($owner: String!, $name: String!) \
//!              { repository(owner: $owner, name: $name) { id pushedAt } }",
//!         )
//!         .variable("owner", "octocat")
//!         .variable("name", "Hello-World")
//!         .send()
//!         .await?;
//!
//!     println!("Last push: {}", data.repository.pushed_at);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! ```rust,ignore
//! use armature_github_graphql::Error;
//!
//! match client.query(doc).send::<Data>().await {
//!     Ok(data) => handle(data),
//!     Err(Error::Api(api)) if api.is_rate_limited() => back_off(),
//!     Err(Error::Api(api)) => {
//!         for item in api.errors() {
//!             eprintln!("{} {:?} {:?}", item, item.extensions, item.raw_field("path"));
//!         }
//!     }
//!     Err(Error::Execute(e)) => eprintln!("request failed: {e}"),
//! }
//! ```

mod client;
mod config;
mod enhance;
mod error;
mod executor;
mod request;
mod response;
pub mod scalar;

pub use client::Client;
pub use config::{
    ClientConfig, ClientConfigBuilder, ENV_TIMEOUT_SECS, ENV_URL, ENV_USER_AGENT, GITHUB_ENDPOINT,
};
pub use enhance::{enhance_error, enhance_error_item, take_field};
pub use error::{
    ApiError, BoxError, Error, ErrorItem, ExecuteError, RATE_LIMITED, RawFields, Result,
};
pub use executor::{Executor, HttpExecutor};
pub use request::{GraphQLRequest, Input, MutationBuilder, QueryBuilder};
pub use response::{GraphQLResponse, Response, ResponseErrorItem, ResponseErrors};
pub use scalar::{
    Base64String, BigInt, Date, DateTime, GitObjectId, GitSshRemote, GitTimestamp, Html, Id,
    PreciseDateTime, Scalar, ScalarError, Uri,
};

// Re-export common types
pub use serde_json::Value as JsonValue;
