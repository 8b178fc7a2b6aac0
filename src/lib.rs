// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod discovery;
pub mod harvest;
pub mod report;
pub mod version;

// Re-export the main pipeline types
pub use discovery::{direct, DiscoveryConfig, DiscoveryError, DiscoveryService, UrlDiscovery};
pub use harvest::{
    AggregateReport, ExtractedPage, FailureKind, FetchExecutor, FetchResult, HarvestConfig,
    HarvestError, Harvester, PageExtractor, ReportQuery, ResultAggregator,
};
pub use report::{ReportError, ReportLimits, ReportWriter};
