// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Machine-readable run summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{truncate_chars, ReportLimits};
use crate::harvest::AggregateReport;

/// JSON summary of one run, successful sites only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub query: String,
    pub generated_at: DateTime<Utc>,
    pub total_sites: usize,
    pub successful_sites: usize,
    pub results: Vec<SiteSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub url: String,
    pub content_preview: String,
    /// Length of the full text in characters
    pub full_content_length: usize,
    pub image_urls: Vec<String>,
    pub total_images: usize,
    pub scraped_at: DateTime<Utc>,
}

impl Summary {
    pub fn from_report(report: &AggregateReport, limits: &ReportLimits) -> Self {
        let results = report
            .results()
            .iter()
            .filter_map(|result| {
                let page = result.page()?;
                let (preview, _) = truncate_chars(&page.text, limits.preview_chars);
                Some(SiteSummary {
                    url: result.url().to_string(),
                    content_preview: preview.to_string(),
                    full_content_length: page.text.chars().count(),
                    image_urls: page
                        .images
                        .iter()
                        .take(limits.max_summary_images)
                        .cloned()
                        .collect(),
                    total_images: page.images.len(),
                    scraped_at: result.captured_at(),
                })
            })
            .collect();

        Self {
            query: report.query().to_string(),
            generated_at: report.generated_at(),
            total_sites: report.total_sites(),
            successful_sites: report.success_count(),
            results,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
