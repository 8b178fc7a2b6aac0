// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};
use url::Url;

use crate::discovery::{
    DiscoveryConfig, DiscoveryService, ProviderKind, StaticDiscovery, UrlDiscovery,
};
use crate::harvest::{AggregateReport, HarvestConfig, HarvestError, Harvester};
use crate::report::{ReportWriter, Summary};

/// Label used for runs over the built-in sample sites
pub const SAMPLE_QUERY: &str = "Sample sites";

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory that receives the per-run results directory
    #[arg(long, global = true, env = "HARVEST_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Per-URL timeout in milliseconds (overrides HARVEST_TIMEOUT_MS)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Maximum concurrent fetches (overrides HARVEST_MAX_CONCURRENCY)
    #[arg(long, global = true)]
    pub max_concurrency: Option<usize>,

    /// Print the JSON summary instead of writing files
    #[arg(long, global = true)]
    pub no_save: bool,
}

impl OutputArgs {
    /// Environment configuration with command-line overrides applied
    pub fn harvest_config(&self) -> HarvestConfig {
        let mut config = HarvestConfig::from_env();
        if let Some(timeout_ms) = self.timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }
        if self.max_concurrency.is_some() {
            config.max_concurrency = self.max_concurrency;
        }
        config
    }
}

/// Arguments for search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Topic to search for
    pub query: String,

    /// Number of sites to fetch (overrides DISCOVERY_LIMIT)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Discovery provider: duckduckgo or bing (overrides DISCOVERY_PROVIDER)
    #[arg(long)]
    pub provider: Option<String>,
}

/// Arguments for urls command
#[derive(Args, Debug)]
pub struct UrlsArgs {
    /// URLs to fetch, in order
    #[arg(required = true)]
    pub urls: Vec<String>,
}

/// Discover sites for a topic, then harvest them
pub async fn search(args: SearchArgs, output: OutputArgs) -> Result<()> {
    let mut discovery_config = DiscoveryConfig::from_env();
    if let Some(limit) = args.limit {
        discovery_config.limit = limit;
    }
    if let Some(provider) = args.provider.as_deref() {
        discovery_config.provider = ProviderKind::parse(provider)
            .ok_or_else(|| anyhow!("Unknown provider '{}'. Use duckduckgo or bing", provider))?;
    }

    let service = DiscoveryService::from_config(&discovery_config)?;
    let harvester = Harvester::new(output.harvest_config())?;

    println!("🔍 Searching for: {}", args.query);
    run_query(&harvester, &service, &args.query, discovery_config.limit, &output).await
}

/// Harvest an explicit URL list
pub async fn urls(args: UrlsArgs, output: OutputArgs) -> Result<()> {
    let harvester = Harvester::new(output.harvest_config())?;

    println!("🔗 Fetching {} URLs...", args.urls.len());
    let outcome = harvester.harvest_urls(&args.urls).await;
    finish(outcome, &output).await
}

/// Harvest the built-in sample sites
pub async fn sample(output: OutputArgs) -> Result<()> {
    let discovery = StaticDiscovery::samples();
    let harvester = Harvester::new(output.harvest_config())?;

    println!("📌 Running against sample sites...");
    run_query(
        &harvester,
        &discovery,
        SAMPLE_QUERY,
        discovery.urls().len(),
        &output,
    )
    .await
}

/// Discover, harvest and report for one topic
pub async fn run_query(
    harvester: &Harvester,
    discovery: &dyn UrlDiscovery,
    query: &str,
    limit: usize,
    output: &OutputArgs,
) -> Result<()> {
    let outcome = harvester.harvest_query(discovery, query, limit).await;
    finish(outcome, output).await
}

async fn finish(outcome: Result<AggregateReport, HarvestError>, output: &OutputArgs) -> Result<()> {
    let report = match outcome {
        Ok(report) => report,
        Err(HarvestError::DiscoveryEmpty { query }) => {
            info!("Discovery returned no URLs for {}", query);
            println!("🤷 No URLs found for '{}', nothing to do", query);
            return Ok(());
        }
        Err(HarvestError::Discovery(e)) => {
            warn!("Discovery failed: {}", e);
            println!("🤷 Discovery failed ({}), nothing to do", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print_results(&report);

    if output.no_save {
        let summary = Summary::from_report(&report, &Default::default());
        println!("{}", summary.to_json()?);
        return Ok(());
    }

    let writer = ReportWriter::new(output.output_dir.clone());
    let dir = writer.write(&report).await?;
    println!("\n📁 Results saved to: {}/", dir.display());
    Ok(())
}

fn print_results(report: &AggregateReport) {
    let total = report.total_sites();
    for (i, result) in report.results().iter().enumerate() {
        let marker = if result.is_success() { "✅" } else { "⚠️" };
        println!("[{}/{}] {} {}", i + 1, total, marker, display_host(result.url()));
    }
    println!(
        "\n✨ {} succeeded, {} failed, {} images",
        report.success_count(),
        report.failure_count(),
        report.total_images()
    );
}

/// Host part of `url`, or the URL itself when it has none
pub fn display_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
