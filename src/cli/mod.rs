// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod harvest;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::version::VERSION_NUMBER;

/// Fabstir Harvest CLI
#[derive(Parser, Debug)]
#[command(name = "fabstir-harvest")]
#[command(version = VERSION_NUMBER)]
#[command(about = "Concurrently fetch web pages and extract their text and images", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub output: harvest::OutputArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover sites for a topic and harvest them
    Search(harvest::SearchArgs),

    /// Harvest the given URLs without discovery
    Urls(harvest::UrlsArgs),

    /// Harvest a fixed set of sample sites
    Sample,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search(args) => harvest::search(args, cli.output).await,
        Commands::Urls(args) => harvest::urls(args, cli.output).await,
        Commands::Sample => harvest::sample(cli.output).await,
    }
}
