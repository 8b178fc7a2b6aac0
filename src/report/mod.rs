// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Report rendering and persistence
//!
//! Turns an [`AggregateReport`](crate::harvest::AggregateReport) into the
//! text listings and JSON summary written to a per-run output directory.

pub mod summary;
pub mod text;
pub mod writer;

use thiserror::Error;

pub use summary::{SiteSummary, Summary};
pub use writer::{safe_query, ReportWriter};

/// Caps applied when rendering reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    /// Characters of page text kept per site in the combined listing
    pub max_report_chars: usize,
    /// Characters of page text kept in the JSON preview
    pub preview_chars: usize,
    /// Image URLs listed per site in the JSON summary
    pub max_summary_images: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            max_report_chars: 50_000,
            preview_chars: 1_000,
            max_summary_images: 20,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// First `max` characters of `text`, and whether anything was cut
pub(crate) fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}
