// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Discovery service orchestration
//!
//! Tries discovery providers in priority order until one yields URLs.

use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::bing::BingDiscovery;
use super::config::{DiscoveryConfig, ProviderKind};
use super::duckduckgo::DuckDuckGoDiscovery;
use super::provider::UrlDiscovery;
use super::types::DiscoveryError;

/// Composite discovery with failover across providers
pub struct DiscoveryService {
    providers: Vec<Box<dyn UrlDiscovery>>,
}

impl DiscoveryService {
    /// Create a service over `providers`, ordered by priority
    ///
    /// Providers with equal priority keep the order they were given in.
    pub fn new(mut providers: Vec<Box<dyn UrlDiscovery>>) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self { providers }
    }

    /// Create a service from configuration
    ///
    /// The configured provider goes first, the other HTML provider is the
    /// fallback.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        config
            .validate()
            .map_err(|e| DiscoveryError::Client(format!("invalid configuration: {}", e)))?;

        let ddg: Box<dyn UrlDiscovery> = Box::new(DuckDuckGoDiscovery::new(config)?);
        let bing: Box<dyn UrlDiscovery> = Box::new(BingDiscovery::new(config)?);

        let providers = match config.provider {
            ProviderKind::DuckDuckGo => vec![ddg, bing],
            ProviderKind::Bing => vec![bing, ddg],
        };

        // Keep configured order regardless of per-provider priority
        Ok(Self { providers })
    }

    /// Get list of available provider names, in the order they are tried
    pub fn available_providers(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name())
            .collect()
    }
}

#[async_trait]
impl UrlDiscovery for DiscoveryService {
    async fn discover(&self, query: &str, limit: usize) -> Result<Vec<String>, DiscoveryError> {
        let start = Instant::now();
        let mut answered = false;

        for provider in &self.providers {
            if !provider.is_available() {
                continue;
            }

            debug!("Trying discovery provider: {}", provider.name());

            match provider.discover(query, limit).await {
                Ok(urls) if !urls.is_empty() => {
                    info!(
                        "Discovery complete: {} URLs from {} in {}ms",
                        urls.len(),
                        provider.name(),
                        start.elapsed().as_millis()
                    );
                    return Ok(urls);
                }
                Ok(_) => {
                    answered = true;
                    debug!("Discovery provider {} found nothing", provider.name());
                }
                Err(e) => {
                    warn!(
                        "Discovery provider {} failed: {}, trying next",
                        provider.name(),
                        e
                    );
                }
            }
        }

        if answered {
            Ok(Vec::new())
        } else {
            Err(DiscoveryError::AllProvidersFailed)
        }
    }

    fn name(&self) -> &'static str {
        "service"
    }

    fn is_available(&self) -> bool {
        self.providers.iter().any(|p| p.is_available())
    }
}
