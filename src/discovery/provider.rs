// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! URL discovery trait definition

use async_trait::async_trait;
use std::collections::HashSet;
use url::Url;

use super::types::DiscoveryError;

/// Trait for implementing URL discovery
///
/// Implementations turn a topic into an ordered list of candidate URLs.
/// Multiple implementations can be combined with failover, see
/// [`super::service::DiscoveryService`].
#[async_trait]
pub trait UrlDiscovery: Send + Sync {
    /// Discover candidate URLs for a topic
    ///
    /// # Arguments
    /// * `query` - The topic to search for
    /// * `limit` - Maximum number of URLs to return
    ///
    /// # Returns
    /// At most `limit` unique absolute URLs in provider order. An empty
    /// vector means nothing was found; errors are transport failures only.
    async fn discover(&self, query: &str, limit: usize) -> Result<Vec<String>, DiscoveryError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider can be used
    fn is_available(&self) -> bool {
        true
    }

    /// Get provider priority (lower = preferred)
    fn priority(&self) -> u8 {
        100
    }
}

/// True when `candidate` parses as an absolute http(s) URL
pub fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Keep absolute http(s) URLs, drop duplicates, stop at `limit`
pub fn collect_candidates<I, S>(candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for candidate in candidates {
        if urls.len() >= limit {
            break;
        }
        let candidate = candidate.as_ref().trim();
        if is_http_url(candidate) && seen.insert(candidate.to_string()) {
            urls.push(candidate.to_string());
        }
    }
    urls
}

/// Candidate list for explicitly supplied URLs
///
/// Bypasses discovery entirely: entries are trimmed, anything that is not an
/// absolute http(s) URL is dropped and duplicates keep their first position.
pub fn direct<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    collect_candidates(urls, usize::MAX)
}
