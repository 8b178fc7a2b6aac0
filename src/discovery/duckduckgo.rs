// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo discovery
//!
//! Scrapes DuckDuckGo's HTML interface. No API key required.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::config::DiscoveryConfig;
use super::provider::{collect_candidates, UrlDiscovery};
use super::types::DiscoveryError;
use crate::harvest::document::Document;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
const RESULT_LINK_SELECTOR: &str = "a.result__a";

/// DuckDuckGo HTML result page discovery
pub struct DuckDuckGoDiscovery {
    client: Client,
    timeout_ms: u64,
}

impl DuckDuckGoDiscovery {
    /// Create a new DuckDuckGo discovery provider
    pub fn new(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DiscoveryError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: config.request_timeout_ms,
        })
    }
}

#[async_trait]
impl UrlDiscovery for DuckDuckGoDiscovery {
    async fn discover(&self, query: &str, limit: usize) -> Result<Vec<String>, DiscoveryError> {
        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| DiscoveryError::from_reqwest(self.name(), self.timeout_ms, e))?;

        if !response.status().is_success() {
            return Err(DiscoveryError::Status {
                provider: self.name().to_string(),
                status: response.status().as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| DiscoveryError::from_reqwest(self.name(), self.timeout_ms, e))?;

        let urls = parse_ddg_html(&html, limit);
        debug!("DuckDuckGo returned {} URLs for: {}", urls.len(), query);
        Ok(urls)
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn priority(&self) -> u8 {
        50
    }
}

/// Extract result URLs from a DuckDuckGo HTML result page
///
/// Only the primary result links are read; ads and internal links that point
/// back at duckduckgo.com are skipped.
pub fn parse_ddg_html(html: &str, limit: usize) -> Vec<String> {
    let document = match Document::parse(html) {
        Ok(document) => document,
        Err(_) => return Vec::new(),
    };
    let links = document.find_all(RESULT_LINK_SELECTOR).unwrap_or_default();

    let candidates = links
        .iter()
        .filter_map(|link| link.attribute("href"))
        .filter_map(extract_ddg_url)
        .filter(|url| !is_ddg_host(url));

    collect_candidates(candidates, limit)
}

/// Extract the target URL from a DuckDuckGo redirect link
///
/// Redirects look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
pub fn extract_ddg_url(href: &str) -> Option<String> {
    let base = Url::parse(DDG_HTML_URL).ok()?;
    let resolved = base.join(href.trim()).ok()?;

    if is_ddg_host(resolved.as_str()) {
        if let Some((_, target)) = resolved.query_pairs().find(|(key, _)| key == "uddg") {
            return Some(target.into_owned());
        }
    }

    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

fn is_ddg_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h == "duckduckgo.com" || h.ends_with(".duckduckgo.com")))
        .unwrap_or(false)
}
