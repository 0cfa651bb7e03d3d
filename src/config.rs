//! Configuration for the verification pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout and retry policy applied uniformly to retrieval and oracle calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_call_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Base backoff in milliseconds, doubled per attempt with jitter
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: default_call_timeout_ms(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Exponential backoff for a 1-based attempt number, with up to 25% jitter.
    pub fn backoff(&self, attempt: usize) -> Duration {
        use rand::Rng;
        let base = Duration::from_millis(self.backoff_ms);
        let multiplier = 2_u32.saturating_pow(attempt.saturating_sub(1) as u32);
        let backoff = base.saturating_mul(multiplier);
        let jitter = rand::thread_rng().gen_range(0..=backoff.as_millis() as u64 / 4);
        backoff + Duration::from_millis(jitter)
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Wikipedia instance, language-specific
    #[serde(default = "default_wikipedia_url")]
    pub wikipedia_url: String,

    /// Ollama-compatible chat endpoint
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model backing the free-form reasoning oracle
    #[serde(default = "default_reasoning_model")]
    pub reasoning_model: String,

    /// Model backing the constrained reference oracle (a more cautious one)
    #[serde(default = "default_reference_model")]
    pub reference_model: String,

    /// Lexicon locale ("fr" or "en")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Maximum characters of evidence text kept per document
    #[serde(default = "default_max_evidence_chars")]
    pub max_evidence_chars: usize,

    /// Relevance score a document must reach to be admitted
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: u32,

    /// Maximum concurrent retrieval requests
    #[serde(default = "default_max_concurrent_retrievals")]
    pub max_concurrent_retrievals: usize,

    /// Evidence cache TTL in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Evidence cache capacity in documents
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    #[serde(default)]
    pub retry: RetryPolicy,
}

// Default value functions
fn default_wikipedia_url() -> String { "https://fr.wikipedia.org".to_string() }
fn default_ollama_url() -> String { "http://localhost:11434".to_string() }
fn default_reasoning_model() -> String { "llama3.1".to_string() }
fn default_reference_model() -> String { "mistral".to_string() }
fn default_locale() -> String { "fr".to_string() }
fn default_max_evidence_chars() -> usize { 5000 }
fn default_relevance_threshold() -> u32 { 2 }
fn default_max_concurrent_retrievals() -> usize { 4 }
fn default_cache_ttl_secs() -> u64 { 600 }
fn default_cache_capacity() -> u64 { 256 }
fn default_call_timeout_ms() -> u64 { 30_000 }
fn default_max_retries() -> usize { 1 }
fn default_backoff_ms() -> u64 { 200 }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            wikipedia_url: default_wikipedia_url(),
            ollama_url: default_ollama_url(),
            reasoning_model: default_reasoning_model(),
            reference_model: default_reference_model(),
            locale: default_locale(),
            max_evidence_chars: default_max_evidence_chars(),
            relevance_threshold: default_relevance_threshold(),
            max_concurrent_retrievals: default_max_concurrent_retrievals(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            retry: RetryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("VERIDICT_WIKIPEDIA_URL") {
            self.wikipedia_url = val;
        }

        if let Ok(val) = std::env::var("VERIDICT_OLLAMA_URL") {
            self.ollama_url = val;
        }

        if let Ok(val) = std::env::var("VERIDICT_REASONING_MODEL") {
            self.reasoning_model = val;
        }

        if let Ok(val) = std::env::var("VERIDICT_REFERENCE_MODEL") {
            self.reference_model = val;
        }

        if let Ok(val) = std::env::var("VERIDICT_LOCALE") {
            self.locale = val;
        }

        if let Ok(val) = std::env::var("VERIDICT_MAX_EVIDENCE_CHARS") {
            if let Ok(max) = val.parse() {
                self.max_evidence_chars = max;
            }
        }

        if let Ok(val) = std::env::var("VERIDICT_RELEVANCE_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.relevance_threshold = threshold;
            }
        }

        if let Ok(val) = std::env::var("VERIDICT_MAX_CONCURRENT_RETRIEVALS") {
            if let Ok(max) = val.parse() {
                self.max_concurrent_retrievals = max;
            }
        }

        if let Ok(val) = std::env::var("VERIDICT_CACHE_TTL_SECS") {
            if let Ok(ttl) = val.parse() {
                self.cache_ttl_secs = ttl;
            }
        }

        if let Ok(val) = std::env::var("VERIDICT_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.retry.timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("VERIDICT_MAX_RETRIES") {
            if let Ok(retries) = val.parse() {
                self.retry.max_retries = retries;
            }
        }

        if let Ok(val) = std::env::var("VERIDICT_RETRY_BACKOFF_MS") {
            if let Ok(ms) = val.parse() {
                self.retry.backoff_ms = ms;
            }
        }

        self
    }

    /// Get evidence cache TTL as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
