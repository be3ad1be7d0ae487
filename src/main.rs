//! Sensitivity-zone ETL binary.
//!
//! Runs the pipeline exactly once: fetch, enrich, expand, replace the
//! warehouse table. Scheduling and retries belong to the invoking
//! orchestrator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use biodiv_etl::config::Config;
use biodiv_etl::extract::Extractor;
use biodiv_etl::geocode::{CachedResolver, NominatimResolver};
use biodiv_etl::load::Warehouse;
use biodiv_etl::pipeline;

#[derive(Parser, Debug)]
#[command(name = "etl")]
#[command(about = "Load sensitivity zones into the warehouse")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the source API endpoint
    #[arg(long)]
    api_url: Option<String>,

    /// Override the reverse-geocoding endpoint
    #[arg(long)]
    geocoder_url: Option<String>,

    /// Extract and transform only; skip the warehouse load
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(url) = args.api_url {
        config.source.api_url = url;
    }
    if let Some(url) = args.geocoder_url {
        config.source.geocoder_url = url;
    }

    info!("Biodiv ETL");
    info!("Source: {}", config.source.api_url);

    let resolver = CachedResolver::new(NominatimResolver::new(&config.source.geocoder_url));

    if args.dry_run {
        let items = Extractor::new().fetch(&config.source.api_url).await?;
        let rows = pipeline::transform(&items, &resolver).await?;
        info!(
            "Dry run: {} records -> {} rows, skipping load",
            items.len(),
            rows.len()
        );
        return Ok(());
    }

    let warehouse = Warehouse::connect(
        &config.warehouse.database,
        &config.warehouse.project,
        &config.warehouse.dataset,
    )?;

    let summary = pipeline::run(&config.source.api_url, &resolver, &warehouse).await?;
    info!(
        "Run complete: {} records fetched, {} rows written ({} distinct lookups)",
        summary.fetched,
        summary.rows_written,
        resolver.len()
    );

    Ok(())
}
