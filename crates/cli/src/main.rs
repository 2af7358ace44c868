//! archive-fetch entry point.
//!
//! A minimal host for the archive connector: looks up one URL and writes the
//! archived page to stdout. Logging goes to stderr so stdout carries only the
//! page body.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use archive_fallback_connector::{ConnectTarget, Connector, WaybackConnector};
use archive_fallback_core::AppConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "archive-fetch")]
#[command(about = "Fetch an archived copy of a page from cache and snapshot services")]
struct Args {
    /// Page URL to look up
    url: String,

    /// Path to TOML configuration file (overrides ARCHIVE_FALLBACK_CONFIG_FILE)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(Some(path.as_path())),
        None => AppConfig::load(),
    }
    .context("invalid configuration")?;

    let connector = WaybackConnector::new(&config).context("failed to start archive connector")?;

    let raw_url = connector
        .encoding()
        .encode(&args.url)
        .context("URL cannot be represented in the client encoding")?;

    let mut stdout = tokio::io::stdout();
    let served = connector
        .connect(&mut stdout, &raw_url, &ConnectTarget::default())
        .await
        .with_context(|| format!("lookup failed for {}", args.url))?;

    if served {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(url = %args.url, "could not retrieve an archived copy");
        Ok(ExitCode::FAILURE)
    }
}
