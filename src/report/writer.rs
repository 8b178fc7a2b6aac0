// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Output directory writer

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tokio::fs;
use tracing::{debug, info};

use super::summary::Summary;
use super::text::{directory_timestamp, render_all_content, render_image_listing, render_site};
use super::{ReportError, ReportLimits};
use crate::harvest::AggregateReport;

pub const ALL_CONTENT_FILE: &str = "all_content.txt";
pub const IMAGE_LISTING_FILE: &str = "all_image_urls.txt";
pub const SUMMARY_FILE: &str = "summary.json";

const MAX_SAFE_QUERY_CHARS: usize = 50;

fn unsafe_chars() -> &'static Regex {
    static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();
    UNSAFE_CHARS.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid pattern"))
}

/// Directory-name form of a query
///
/// Drops everything but word characters, whitespace and `-`, joins
/// whitespace runs with `_` and keeps at most 50 characters.
pub fn safe_query(query: &str) -> String {
    unsafe_chars()
        .replace_all(query, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_SAFE_QUERY_CHARS)
        .collect()
}

/// Writes each run into its own timestamped directory under `root`
#[derive(Debug, Clone)]
pub struct ReportWriter {
    root: PathBuf,
    limits: ReportLimits,
}

impl ReportWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            limits: ReportLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ReportLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Directory a report will be written to
    pub fn output_dir(&self, report: &AggregateReport) -> PathBuf {
        self.root.join(format!(
            "scraping_results_{}_{}",
            safe_query(report.query().as_str()),
            directory_timestamp(report.generated_at())
        ))
    }

    /// Write every artifact for `report`, returning the directory used
    pub async fn write(&self, report: &AggregateReport) -> Result<PathBuf, ReportError> {
        let dir = self.output_dir(report);
        fs::create_dir_all(&dir).await?;

        fs::write(
            dir.join(ALL_CONTENT_FILE),
            render_all_content(report, &self.limits),
        )
        .await?;

        for (i, result) in report.results().iter().enumerate() {
            if let Some(site) = render_site(result) {
                let path = dir.join(format!("site_{}_content.txt", i + 1));
                debug!("Writing {}", path.display());
                fs::write(&path, site).await?;
            }
        }

        fs::write(dir.join(IMAGE_LISTING_FILE), render_image_listing(report)).await?;

        let summary = Summary::from_report(report, &self.limits);
        fs::write(dir.join(SUMMARY_FILE), summary.to_json()?).await?;

        info!("Saved results to {}", dir.display());
        Ok(dir)
    }
}
