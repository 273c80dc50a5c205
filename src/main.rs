// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kubeletmein::cli::Cli;
use kubeletmein::config::ApiServerOverride;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing, RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid --log-level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let provider = cli.provider();
    let config = cli.config();
    let api_override = ApiServerOverride::from_env();

    info!("bootstrapping kubelet credentials for provider {}", provider);

    let outcome = provider
        .bootstrap(&config, &api_override)
        .await
        .with_context(|| format!("{} bootstrap failed", provider))?;

    info!(
        "bootstrap complete: {} credential file(s), kubeconfig at {}",
        outcome.credential_files.len(),
        outcome.kubeconfig.display()
    );
    Ok(())
}
