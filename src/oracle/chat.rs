//! Shared chat transport for both oracles

use crate::cancel::CancellationToken;
use crate::config::RetryPolicy;
use crate::error::{Result, VerifyError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for an Ollama-compatible `/api/chat` endpoint.
///
/// Both oracles share one transport; which model answers is a per-call
/// parameter, so oracle selection stays configuration, not logic.
pub struct OllamaChatClient {
    http: Client,
    base_url: String,
    policy: RetryPolicy,
}

impl OllamaChatClient {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Result<Self> {
        let http = Client::builder()
            .timeout(policy.timeout())
            .build()
            .map_err(|e| VerifyError::external("oracle", e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// Send one user prompt to `model` and return the reply text.
    ///
    /// Transport failures and non-success statuses are retried per the policy
    /// with backoff; cancellation interrupts both the call and the backoff.
    pub async fn chat(
        &self,
        service: &'static str,
        model: &str,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let outcome = tokio::select! {
                () = cancel.cancelled() => return Err(VerifyError::Cancelled),
                outcome = self.send_chat(service, model, prompt) => outcome,
            };

            match outcome {
                Ok(reply) => {
                    debug!(service, model, attempt, chars = reply.len(), "oracle replied");
                    return Ok(reply);
                }
                Err(e) => {
                    if attempt > self.policy.max_retries {
                        return Err(e);
                    }
                    let backoff = self.policy.backoff(attempt);
                    warn!(service, model, attempt, error = %e, "retrying oracle call in {:?}", backoff);
                    tokio::select! {
                        () = cancel.cancelled() => return Err(VerifyError::Cancelled),
                        () = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }
    }

    async fn send_chat(&self, service: &'static str, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VerifyError::external(service, format!("timeout calling model {model}"))
                } else {
                    VerifyError::external(service, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VerifyError::external(
                service,
                format!("status {status}: {body}"),
            ));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::external(service, e.to_string()))?;

        Ok(reply.message.content)
    }
}
