// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bing discovery
//!
//! Scrapes Bing's HTML result page. Alternative to DuckDuckGo.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::config::DiscoveryConfig;
use super::provider::{collect_candidates, UrlDiscovery};
use super::types::DiscoveryError;
use crate::harvest::document::Document;

const BING_SEARCH_URL: &str = "https://www.bing.com/search";
const RESULT_LINK_SELECTOR: &str = "li.b_algo h2 a";

/// Bing HTML result page discovery
pub struct BingDiscovery {
    client: Client,
    timeout_ms: u64,
}

impl BingDiscovery {
    /// Create a new Bing discovery provider
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
impl UrlDiscovery for BingDiscovery {
    async fn discover(&self, query: &str, limit: usize) -> Result<Vec<String>, DiscoveryError> {
        // Ask for extra results; some entries are not plain links
        let count = (limit.saturating_mul(2)).clamp(1, 50).to_string();

        let response = self
            .client
            .get(BING_SEARCH_URL)
            .query(&[("q", query), ("count", count.as_str())])
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

        let urls = parse_bing_html(&html, limit);
        debug!("Bing returned {} URLs for: {}", urls.len(), query);
        Ok(urls)
    }

    fn name(&self) -> &'static str {
        "bing"
    }
}

/// Extract organic result URLs from a Bing result page
pub fn parse_bing_html(html: &str, limit: usize) -> Vec<String> {
    let document = match Document::parse(html) {
        Ok(document) => document,
        Err(_) => return Vec::new(),
    };
    let links = document.find_all(RESULT_LINK_SELECTOR).unwrap_or_default();

    collect_candidates(links.iter().filter_map(|link| link.attribute("href")), limit)
}
