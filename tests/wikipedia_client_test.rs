//! Wikipedia client tests against a mock HTTP server

use mockito::Server;
use veridict::{CancellationToken, KnowledgeRetriever, RetryPolicy, VerifyError, WikipediaClient};

fn policy() -> RetryPolicy {
    RetryPolicy {
        timeout_ms: 2_000,
        max_retries: 1,
        backoff_ms: 10,
    }
}

fn client(server: &Server, max_chars: usize) -> WikipediaClient {
    WikipediaClient::new(server.url(), max_chars, policy()).unwrap()
}

/// A found page resolves to a truncated evidence document
#[tokio::test]
async fn test_found_page_resolves_to_document() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/rest_v1/page/summary/soleil")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"title":"Soleil","extract":"Le Soleil est l'étoile du Système solaire."}"#)
        .create_async()
        .await;

    let client = client(&server, 5000);
    let resolved = client
        .resolve("soleil", &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(resolved.concept, "soleil");
    assert_eq!(resolved.title, "Soleil");
    assert!(resolved.text.starts_with("Le Soleil"));
    mock.assert_async().await;
}

/// Extract text is prefix-truncated to the configured maximum
#[tokio::test]
async fn test_extract_is_truncated() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/rest_v1/page/summary/soleil")
        .with_status(200)
        .with_body(r#"{"title":"Soleil","extract":"abcdefghijklmnop"}"#)
        .create_async()
        .await;

    let client = client(&server, 10);
    let resolved = client
        .resolve("soleil", &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(resolved.text, "abcdefghij");
}

/// A missing page (404) resolves to None, not an error
#[tokio::test]
async fn test_missing_page_resolves_to_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/rest_v1/page/summary/licorne")
        .with_status(404)
        .with_body(r#"{"type":"not_found","title":"Not found."}"#)
        .create_async()
        .await;

    let client = client(&server, 5000);
    let resolved = client
        .resolve("licorne", &CancellationToken::new())
        .await
        .unwrap();

    assert!(resolved.is_none());
}

/// A page with an empty extract carries no usable evidence
#[tokio::test]
async fn test_empty_extract_resolves_to_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/rest_v1/page/summary/vide")
        .with_status(200)
        .with_body(r#"{"title":"Vide","extract":"  "}"#)
        .create_async()
        .await;

    let client = client(&server, 5000);
    let resolved = client
        .resolve("vide", &CancellationToken::new())
        .await
        .unwrap();

    assert!(resolved.is_none());
}

/// Upstream errors are retried once, then surfaced as an external-service failure
#[tokio::test]
async fn test_upstream_error_retried_then_surfaced() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/rest_v1/page/summary/soleil")
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(2)
        .create_async()
        .await;

    let client = client(&server, 5000);
    let result = client.resolve("soleil", &CancellationToken::new()).await;

    assert!(matches!(
        result,
        Err(VerifyError::ExternalService { service: "wikipedia", .. })
    ));
    mock.assert_async().await;
}

/// A cancelled token aborts the lookup instead of waiting for the backoff
#[tokio::test]
async fn test_cancellation_aborts_lookup() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/rest_v1/page/summary/soleil")
        .with_status(503)
        .create_async()
        .await;

    let client = client(&server, 5000);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client.resolve("soleil", &cancel).await;
    assert!(matches!(result, Err(VerifyError::Cancelled)));
}
