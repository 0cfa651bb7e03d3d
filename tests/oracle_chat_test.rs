//! Oracle chat transport tests against a mock HTTP server

use mockito::{Matcher, Server};
use veridict::{CancellationToken, OllamaChatClient, RetryPolicy, VerifyError};

fn policy() -> RetryPolicy {
    RetryPolicy {
        timeout_ms: 2_000,
        max_retries: 1,
        backoff_ms: 10,
    }
}

/// The reply content of a successful chat call is returned verbatim
#[tokio::test]
async fn test_chat_returns_reply_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "mistral",
            "stream": false,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":{"role":"assistant","content":"RESULTAT_ATTENDU: FAUX"}}"#)
        .create_async()
        .await;

    let client = OllamaChatClient::new(server.url(), policy()).unwrap();
    let reply = client
        .chat("reference oracle", "mistral", "une question", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(reply, "RESULTAT_ATTENDU: FAUX");
    mock.assert_async().await;
}

/// Transport-level failures are retried once with backoff before surfacing
#[tokio::test]
async fn test_chat_retries_once_then_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body("model crashed")
        .expect(2)
        .create_async()
        .await;

    let client = OllamaChatClient::new(server.url(), policy()).unwrap();
    let result = client
        .chat("reasoning oracle", "llama3.1", "une question", &CancellationToken::new())
        .await;

    match result {
        Err(VerifyError::ExternalService { service, reason }) => {
            assert_eq!(service, "reasoning oracle");
            assert!(reason.contains("500"));
        }
        other => panic!("expected ExternalService, got {other:?}"),
    }
    mock.assert_async().await;
}

/// A malformed reply body is an external-service failure, not a panic
#[tokio::test]
async fn test_chat_rejects_malformed_reply() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body("not json at all")
        .expect(2)
        .create_async()
        .await;

    let client = OllamaChatClient::new(server.url(), policy()).unwrap();
    let result = client
        .chat("reference oracle", "mistral", "une question", &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(VerifyError::ExternalService { .. })));
}
