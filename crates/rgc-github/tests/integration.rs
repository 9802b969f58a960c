//! Integration tests for rgc-github against a mock Contents API.
//!
//! Tests against the real GitHub API require network access and are ignored
//! by default. Run with: cargo test --package rgc-github -- --ignored

use base64::{engine::general_purpose, Engine as _};
use rgc_github::{GitHubOptions, GitHubProvider, RepositoryRef};
use rgc_provider::{ContentProvider, ProviderErrorKind};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup(token: Option<&str>) -> (MockServer, GitHubProvider) {
    let server = MockServer::start().await;
    let options = GitHubOptions {
        api_url: server.uri(),
        token: token.map(String::from),
        requests_per_second: None,
        request_timeout: Duration::from_millis(500),
    };
    let provider = GitHubProvider::new(RepositoryRef::new("acme", "web"), options).unwrap();
    (server, provider)
}

#[tokio::test]
async fn test_list_root() {
    let (server, provider) = setup(Some("test-token")).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/web/contents"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "src", "path": "src", "type": "dir", "size": 0 },
            { "name": "README.md", "path": "README.md", "type": "file", "size": 42 },
            { "name": "link", "path": "link", "type": "symlink", "size": 7 }
        ])))
        .mount(&server)
        .await;

    let entries = provider.list_directory("").await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "README.md");
    assert_eq!(entries[0].size_bytes, 42);
    assert!(entries[1].is_dir);
}

#[tokio::test]
async fn test_get_file_content() {
    let (server, provider) = setup(None).await;
    let text = "export function Button() {\n  return <button />;\n}\n";

    Mock::given(method("GET"))
        .and(path("/repos/acme/web/contents/src/Button.tsx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Button.tsx",
            "path": "src/Button.tsx",
            "type": "file",
            "size": text.len(),
            "encoding": "base64",
            "content": general_purpose::STANDARD.encode(text)
        })))
        .mount(&server)
        .await;

    let content = provider.get_file_content("src/Button.tsx").await.unwrap();
    assert_eq!(content, text);
}

#[tokio::test]
async fn test_not_found() {
    let (server, provider) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/web/contents/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = provider.list_directory("missing").await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::NotFound);
    assert_eq!(err.path, "missing");
}

#[tokio::test]
async fn test_rate_limited() {
    let (server, provider) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/web/contents/a"))
        .respond_with(ResponseTemplate::new(403).insert_header("x-ratelimit-remaining", "0"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/web/contents/b"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = provider.list_directory("a").await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::RateLimited);
    let err = provider.list_directory("b").await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::RateLimited);
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let (server, provider) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/web/contents/src"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = provider.list_directory("src").await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Transient);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let (server, provider) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/web/contents/slow.tsx"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let err = provider.get_file_content("slow.tsx").await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::TimedOut);
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_list_public_repository() {
    let options = GitHubOptions {
        token: std::env::var("GITHUB_TOKEN").ok(),
        ..GitHubOptions::default()
    };
    let provider =
        GitHubProvider::new(RepositoryRef::new("octocat", "Hello-World"), options).unwrap();

    let entries = provider.list_directory("").await.unwrap();
    assert!(entries.iter().any(|e| e.name == "README"));
}
