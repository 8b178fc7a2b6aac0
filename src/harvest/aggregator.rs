// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result aggregation
//!
//! Collects per-URL results into the report handed to writers.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use super::types::FetchResult;

/// Label used for reports built from explicit URL lists
pub const DIRECT_URLS_LABEL: &str = "Direct URLs";

/// What a report was built for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportQuery {
    /// A discovery topic
    Topic(String),
    /// Caller-supplied URLs, no discovery
    DirectUrls,
}

impl ReportQuery {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Topic(topic) => topic,
            Self::DirectUrls => DIRECT_URLS_LABEL,
        }
    }
}

impl fmt::Display for ReportQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReportQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered per-URL results of one batch plus derived counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    query: ReportQuery,
    generated_at: DateTime<Utc>,
    results: Vec<FetchResult>,
    success_count: usize,
    failure_count: usize,
    total_images: usize,
}

impl AggregateReport {
    pub fn query(&self) -> &ReportQuery {
        &self.query
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Results in the order the URLs were supplied
    pub fn results(&self) -> &[FetchResult] {
        &self.results
    }

    pub fn total_sites(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    /// Images across successful results
    pub fn total_images(&self) -> usize {
        self.total_images
    }

    /// Text of every successful page, each under a site header
    pub fn combined_text(&self) -> String {
        let rule = "=".repeat(80);
        let mut sections = Vec::new();
        for (i, result) in self.results.iter().enumerate() {
            if let Some(page) = result.page() {
                sections.push(format!(
                    "\n{}\nSite {}: {}\n{}\n\n{}",
                    rule,
                    i + 1,
                    result.url(),
                    rule,
                    page.text
                ));
            }
        }
        sections.join("\n")
    }

    /// Every image URL in report order
    pub fn all_image_urls(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|r| r.page())
            .flat_map(|page| page.images.iter().map(String::as_str))
            .collect()
    }
}

/// Builds an [`AggregateReport`] from a completed batch
pub struct ResultAggregator;

impl ResultAggregator {
    /// Aggregate `results`, keeping their order
    pub fn aggregate(query: ReportQuery, results: Vec<FetchResult>) -> AggregateReport {
        let success_count = results.iter().filter(|r| r.is_success()).count();
        let failure_count = results.len() - success_count;
        let total_images = results.iter().map(FetchResult::image_count).sum();

        AggregateReport {
            query,
            generated_at: Utc::now(),
            results,
            success_count,
            failure_count,
            total_images,
        }
    }
}
