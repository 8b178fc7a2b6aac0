//! Configuration for page fetching
//!
//! Defines request headers, timeouts and the concurrency cap. A config value
//! is immutable once handed to the executor.

use std::env;

/// Desktop Chrome User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Batches at or below this size may run without a concurrency cap
pub const UNBOUNDED_BATCH_LIMIT: usize = 10;

/// Cap applied to larger batches when none is configured
pub const DEFAULT_CONCURRENCY_CAP: usize = 5;

/// Configuration for page fetching
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Per-request timeout in milliseconds (default: 10000)
    pub request_timeout_ms: u64,
    /// Maximum in-flight requests; `None` picks a cap from the batch size
    pub max_concurrency: Option<usize>,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Accept-Language header sent with every request
    pub accept_language: String,
    /// Maximum redirects followed per request (default: 5)
    pub max_redirects: usize,
    /// Skip TLS certificate verification (default: false)
    pub accept_invalid_certs: bool,
}

impl HarvestConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            request_timeout_ms: env::var("HARVEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            max_concurrency: env::var("HARVEST_MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok()),
            user_agent: env::var("HARVEST_USER_AGENT").unwrap_or(defaults.user_agent),
            accept_language: env::var("HARVEST_ACCEPT_LANGUAGE")
                .unwrap_or(defaults.accept_language),
            max_redirects: env::var("HARVEST_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redirects),
            accept_invalid_certs: env::var("HARVEST_ACCEPT_INVALID_CERTS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be at least 1".to_string());
        }
        if self.max_concurrency == Some(0) {
            return Err("max_concurrency must be at least 1".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }

    /// Concurrency cap for a batch of `batch_size` URLs
    ///
    /// An explicit cap always wins. Otherwise small batches run fully
    /// concurrent and larger ones fall back to [`DEFAULT_CONCURRENCY_CAP`].
    pub fn effective_concurrency(&self, batch_size: usize) -> usize {
        match self.max_concurrency {
            Some(cap) => cap.max(1),
            None if batch_size <= UNBOUNDED_BATCH_LIMIT => batch_size.max(1),
            None => DEFAULT_CONCURRENCY_CAP,
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            max_concurrency: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            max_redirects: 5,
            accept_invalid_certs: false,
        }
    }
}
