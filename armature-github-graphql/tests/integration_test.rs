//! Integration tests for armature-github-graphql

use armature_github_graphql::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repository {
    id: Id,
    disk_usage: BigInt,
    pushed_at: DateTime,
    updated_at: PreciseDateTime,
    url: Uri,
}

#[derive(Debug, Deserialize)]
struct RepositoryQuery {
    repository: Repository,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddStarInput {
    starrable_id: Id,
}

impl Input for AddStarInput {}

fn client_for(server: &MockServer) -> Client {
    Client::enterprise(format!("{}/api/graphql", server.uri()), reqwest::Client::new()).unwrap()
}

#[tokio::test]
async fn test_query_decodes_scalars() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "id": "R_kgDOA",
                    "diskUsage": "123456789012345678901234567890",
                    "pushedAt": "2023-06-01T23:59:59Z",
                    "updatedAt": "2023-06-01T23:59:59.1234Z",
                    "url": "https://github.com/octocat/Hello-World"
                }
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .query(
            "query { repository(owner: \"octocat\", name: \"Hello-World\") \
             { id diskUsage pushedAt updatedAt url } }",
        )
        .send_with_response::<RepositoryQuery>()
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 200);
    let repo = response.data.repository;
    assert_eq!(repo.id.as_str(), "R_kgDOA");
    assert_eq!(repo.disk_usage.encode(), "123456789012345678901234567890");
    assert_eq!(repo.pushed_at.encode(), "2023-06-01T23:59:59Z");
    assert_eq!(repo.updated_at.encode(), "2023-06-01T23:59:59.1234Z");
    assert_eq!(repo.url.as_str(), "https://github.com/octocat/Hello-World");
}

#[tokio::test]
async fn test_graphql_errors_are_enhanced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                {
                    "type": "RATE_LIMITED",
                    "message": "API rate limit exceeded for user ID 1.",
                    "extensions": {"resetAt": "2023-06-01T23:59:59Z"},
                    "path": ["repository"]
                },
                {
                    "type": "NOT_FOUND",
                    "message": "Could not resolve to a Repository.",
                    "extensions": 7,
                    "locations": [{"line": 1, "column": 9}]
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query("query { repository(owner: \"a\", name: \"b\") { id } }")
        .send::<RepositoryQuery>()
        .await
        .unwrap_err();

    let api = match err {
        Error::Api(api) => api,
        other => panic!("expected API error, got {:?}", other),
    };
    assert!(api.is_rate_limited());
    assert_eq!(api.errors.len(), 2);

    let first = &api.errors[0];
    assert_eq!(first.error_type, RATE_LIMITED);
    assert_eq!(first.message, "API rate limit exceeded for user ID 1.");
    assert_eq!(first.extension("resetAt"), Some(&json!("2023-06-01T23:59:59Z")));
    assert_eq!(first.raw.len(), 1);
    assert_eq!(first.raw_field("path").map(|v| v.get()), Some(r#"["repository"]"#));

    let second = &api.errors[1];
    assert_eq!(second.error_type, "NOT_FOUND");
    assert!(second.extensions.is_none());
    assert_eq!(second.raw_field("extensions").map(|v| v.get()), Some("7"));
    assert!(second.raw.contains_key("locations"));
}

#[tokio::test]
async fn test_partial_data_and_headers_survive_errors() {
    #[derive(Debug, Deserialize)]
    struct Viewer {
        login: String,
    }

    #[derive(Debug, Deserialize)]
    struct PartialQuery {
        viewer: Viewer,
        repo: Option<Repository>,
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({
                    "data": {"viewer": {"login": "octocat"}, "repo": null},
                    "errors": [
                        {"message": "Could not resolve", "type": "NOT_FOUND", "path": ["repo"]}
                    ]
                })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query("{ viewer { login } repo: repository(owner: \"a\", name: \"b\") { id } }")
        .send::<PartialQuery>()
        .await
        .unwrap_err();

    let api = err.api_error().unwrap();
    assert!(api.source.is_none());
    assert_eq!(api.status.as_u16(), 200);
    assert_eq!(api.header("x-ratelimit-reset"), Some("1700000000"));
    assert_eq!(api.errors[0].error_type, "NOT_FOUND");

    let data: PartialQuery = api.data().unwrap().unwrap();
    assert_eq!(data.viewer.login, "octocat");
    assert!(data.repo.is_none());
}

#[tokio::test]
async fn test_errors_without_message_are_enhanced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                {"type": "RATE_LIMITED", "extensions": {"a": "b"}},
                {"message": null, "type": "NOT_FOUND"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query("{ viewer { login } }")
        .send::<serde_json::Value>()
        .await
        .unwrap_err();

    let api = match err {
        Error::Api(api) => api,
        other => panic!("expected API error, got {:?}", other),
    };
    assert!(api.is_rate_limited());
    assert_eq!(api.errors.len(), 2);
    assert_eq!(api.errors[0].message, "");
    assert_eq!(api.errors[0].extension("a"), Some(&json!("b")));
    assert!(api.errors[0].raw.is_empty());
    assert_eq!(api.errors[1].error_type, "NOT_FOUND");
    assert!(api.errors[1].raw.is_empty());
}

#[tokio::test]
async fn test_server_errors_keep_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query("{ viewer { login } }")
        .send::<serde_json::Value>()
        .await
        .unwrap_err();

    match err {
        Error::Execute(ExecuteError::Status {
            status, headers, ..
        }) => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(headers.get("retry-after").unwrap(), "30");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_error_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/graphql"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query("{ viewer { login } }")
        .send::<serde_json::Value>()
        .await
        .unwrap_err();

    match err.execute_error() {
        Some(ExecuteError::Status { status, body, .. }) => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(err.to_string().contains("Bad credentials"));
}

#[tokio::test]
async fn test_malformed_body_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query("{ viewer { login } }")
        .send::<serde_json::Value>()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Execute(ExecuteError::Json(_))));
}

#[tokio::test]
async fn test_mutation_sends_input_variable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "Star",
            "variables": {"input": {"starrableId": "R_kgDOA"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"addStar": {"clientMutationId": null}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let data: serde_json::Value = client
        .mutate(
            "mutation Star($input: AddStarInput!) \
             { addStar(input: $input) { clientMutationId } }",
        )
        .operation_name("Star")
        .input(AddStarInput {
            starrable_id: Id::new("R_kgDOA"),
        })
        .send()
        .await
        .unwrap();

    assert_eq!(data, json!({"addStar": {"clientMutationId": null}}));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "bearer token123"))
        .and(header("user-agent", "integration-test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"viewer": {"login": "octocat"}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .endpoint(format!("{}/graphql", server.uri()))
        .header("Authorization", "bearer token123")
        .user_agent("integration-test")
        .build();
    let client = Client::with_config(config, reqwest::Client::new()).unwrap();

    let data: serde_json::Value = client.query("{ viewer { login } }").send().await.unwrap();
    assert_eq!(data["viewer"]["login"], "octocat");
}
