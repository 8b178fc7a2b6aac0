// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed-list discovery

use async_trait::async_trait;

use super::provider::{collect_candidates, UrlDiscovery};
use super::types::DiscoveryError;

/// Discovery backed by a fixed URL list, ignoring the query
#[derive(Debug, Clone)]
pub struct StaticDiscovery {
    urls: Vec<String>,
}

impl StaticDiscovery {
    pub fn new<S: AsRef<str>>(urls: &[S]) -> Self {
        Self {
            urls: collect_candidates(urls, usize::MAX),
        }
    }

    /// Sample sites for trying the tool out
    pub fn samples() -> Self {
        Self::new(&[
            "https://www.python.org/",
            "https://docs.python.org/3/tutorial/",
            "https://realpython.com/",
            "https://www.w3schools.com/python/",
            "https://github.com/python/cpython",
        ])
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

#[async_trait]
impl UrlDiscovery for StaticDiscovery {
    async fn discover(&self, _query: &str, limit: usize) -> Result<Vec<String>, DiscoveryError> {
        Ok(self.urls.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }

    fn is_available(&self) -> bool {
        !self.urls.is_empty()
    }

    fn priority(&self) -> u8 {
        200
    }
}
