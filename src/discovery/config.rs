// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for URL discovery

use std::env;

use crate::harvest::config::DEFAULT_USER_AGENT;

/// Search provider backing discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    DuckDuckGo,
    Bing,
}

impl ProviderKind {
    /// Parse a provider name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "duckduckgo" | "ddg" => Some(Self::DuckDuckGo),
            "bing" => Some(Self::Bing),
            _ => None,
        }
    }
}

/// Configuration for URL discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Preferred provider, the other one is used as fallback
    pub provider: ProviderKind,
    /// Default number of candidate URLs (default: 5)
    pub limit: usize,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// User-Agent sent to result pages
    pub user_agent: String,
}

impl DiscoveryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env::var("DISCOVERY_PROVIDER")
                .ok()
                .and_then(|v| ProviderKind::parse(&v))
                .unwrap_or(defaults.provider),
            limit: env::var("DISCOVERY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.limit),
            request_timeout_ms: env::var("DISCOVERY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            user_agent: env::var("HARVEST_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == 0 {
            return Err("limit must be at least 1".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::DuckDuckGo,
            limit: 5,
            request_timeout_ms: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
