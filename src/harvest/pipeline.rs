// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch orchestration
//!
//! discovery → fetch/extract → aggregate

use std::time::Instant;
use tracing::info;

use super::aggregator::{AggregateReport, ReportQuery, ResultAggregator, DIRECT_URLS_LABEL};
use super::config::HarvestConfig;
use super::fetcher::FetchExecutor;
use super::types::HarvestError;
use crate::discovery::{collect_candidates, direct, UrlDiscovery};

/// Runs one harvest batch end to end
pub struct Harvester {
    executor: FetchExecutor,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            executor: FetchExecutor::new(config)?,
        })
    }

    /// Discover URLs for `query`, then fetch and aggregate them
    ///
    /// An empty discovery result aborts with [`HarvestError::DiscoveryEmpty`]
    /// before any request is made.
    pub async fn harvest_query(
        &self,
        discovery: &dyn UrlDiscovery,
        query: &str,
        limit: usize,
    ) -> Result<AggregateReport, HarvestError> {
        info!("Discovering up to {} URLs for: {}", limit, query);
        // Enforce the limit, dedupe and http(s) whatever the provider returned
        let urls = collect_candidates(discovery.discover(query, limit).await?, limit);

        if urls.is_empty() {
            return Err(HarvestError::DiscoveryEmpty {
                query: query.to_string(),
            });
        }

        Ok(self.run(ReportQuery::Topic(query.to_string()), urls).await)
    }

    /// Fetch and aggregate caller-supplied URLs without discovery
    pub async fn harvest_urls<S: AsRef<str>>(
        &self,
        urls: &[S],
    ) -> Result<AggregateReport, HarvestError> {
        let urls = direct(urls);
        if urls.is_empty() {
            return Err(HarvestError::DiscoveryEmpty {
                query: DIRECT_URLS_LABEL.to_string(),
            });
        }

        Ok(self.run(ReportQuery::DirectUrls, urls).await)
    }

    async fn run(&self, query: ReportQuery, urls: Vec<String>) -> AggregateReport {
        let start = Instant::now();
        let results = self.executor.fetch_all(&urls).await;
        let report = ResultAggregator::aggregate(query, results);

        info!(
            "Harvest of {} complete: {}/{} succeeded, {} images in {}ms",
            report.query(),
            report.success_count(),
            report.total_sites(),
            report.total_images(),
            start.elapsed().as_millis()
        );

        report
    }
}
