// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Candidate URL discovery
//!
//! Produces the ordered list of URLs a harvest batch will fetch:
//! - Search result scraping (DuckDuckGo, Bing) with failover
//! - Fixed lists, including a sample set
//! - Direct caller-supplied URLs, bypassing discovery

pub mod bing;
pub mod config;
pub mod duckduckgo;
pub mod provider;
pub mod service;
pub mod static_list;
pub mod types;

pub use config::{DiscoveryConfig, ProviderKind};
pub use provider::{collect_candidates, direct, UrlDiscovery};
pub use service::DiscoveryService;
pub use static_list::StaticDiscovery;
pub use types::DiscoveryError;
