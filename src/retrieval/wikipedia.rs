//! Wikipedia REST client backing the knowledge retriever

use super::KnowledgeRetriever;
use crate::cancel::CancellationToken;
use crate::config::RetryPolicy;
use crate::error::{Result, VerifyError};
use crate::evidence::{EvidenceCache, EvidenceDocument};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

const SERVICE: &str = "wikipedia";

#[derive(Debug, Deserialize)]
struct PageSummary {
    title: String,
    #[serde(default)]
    extract: String,
}

/// Client for the MediaWiki REST `page/summary` endpoint.
///
/// A missing page (HTTP 404) resolves to `None`; transport failures, timeouts,
/// and upstream errors are retried per the policy before surfacing.
pub struct WikipediaClient {
    http: Client,
    base_url: String,
    max_evidence_chars: usize,
    policy: RetryPolicy,
    cache: Option<EvidenceCache>,
}

impl WikipediaClient {
    pub fn new(
        base_url: impl Into<String>,
        max_evidence_chars: usize,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(policy.timeout())
            .user_agent(concat!("veridict/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VerifyError::external(SERVICE, e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_evidence_chars,
            policy,
            cache: None,
        })
    }

    /// Attach a bounded TTL cache consulted before the network.
    pub fn with_cache(mut self, cache: EvidenceCache) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn fetch_summary(&self, concept: &str) -> Result<Option<EvidenceDocument>> {
        let url = format!("{}/api/rest_v1/page/summary/{}", self.base_url, concept);

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                VerifyError::external(SERVICE, format!("timeout fetching {concept}"))
            } else {
                VerifyError::external(SERVICE, e.to_string())
            }
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let summary: PageSummary = response
                    .json()
                    .await
                    .map_err(|e| VerifyError::external(SERVICE, e.to_string()))?;

                if summary.extract.trim().is_empty() {
                    return Ok(None);
                }

                Ok(Some(EvidenceDocument::new(
                    concept,
                    summary.title,
                    &summary.extract,
                    self.max_evidence_chars,
                )))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(VerifyError::external(
                    SERVICE,
                    format!("status {status}: {body}"),
                ))
            }
        }
    }
}

#[async_trait]
impl KnowledgeRetriever for WikipediaClient {
    async fn resolve(
        &self,
        concept: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<EvidenceDocument>> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(concept) {
                return Ok(Some(hit));
            }
        }

        let mut attempt = 0;
        let resolved = loop {
            attempt += 1;

            let outcome = tokio::select! {
                () = cancel.cancelled() => return Err(VerifyError::Cancelled),
                outcome = self.fetch_summary(concept) => outcome,
            };

            match outcome {
                Ok(resolved) => break resolved,
                Err(e) => {
                    if attempt > self.policy.max_retries {
                        return Err(e);
                    }
                    let backoff = self.policy.backoff(attempt);
                    warn!(concept, attempt, error = %e, "retrying wikipedia lookup in {:?}", backoff);
                    tokio::select! {
                        () = cancel.cancelled() => return Err(VerifyError::Cancelled),
                        () = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        };

        match &resolved {
            Some(document) => {
                debug!(concept, title = %document.title, bytes = document.text.len(), "page found");
                if let Some(cache) = &self.cache {
                    cache.insert(document.clone());
                }
            }
            None => debug!(concept, "no page for concept"),
        }

        Ok(resolved)
    }
}
