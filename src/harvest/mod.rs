// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Concurrent fetch and extraction
//!
//! Fetches a batch of URLs concurrently, each under its own timeout, and turns
//! every response into clean text plus absolute image URLs. Failures are
//! carried per URL; one bad site never aborts the batch.

pub mod aggregator;
pub mod config;
pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod images;
pub mod pipeline;
pub mod types;

pub use aggregator::{AggregateReport, ReportQuery, ResultAggregator, DIRECT_URLS_LABEL};
pub use config::HarvestConfig;
pub use document::{Document, Node};
pub use extractor::PageExtractor;
pub use fetcher::FetchExecutor;
pub use images::{resolve_images, ImageResolver};
pub use pipeline::Harvester;
pub use types::{
    ExtractError, ExtractedPage, FailureKind, FetchOutcome, FetchResult, HarvestError,
    ResultOutcome,
};
