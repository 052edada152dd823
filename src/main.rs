use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::config::ScrapeConfig;
use crate::scraper::{RealtClient, RealtScraper};

mod cli;
mod config;
mod domain;
mod errors;
mod exports;
mod scraper;


fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);
    debug!(?args, "CLI arguments parsed");

    let cfg = ScrapeConfig::from_args(&args)?;

    let client = RealtClient::new(cfg.timeout)?;
    let scraper = RealtScraper::new(client, cfg.workers);

    // Index-level failures abort with a non-zero exit; listing failures don't.
    let outcome = scraper
        .collect(&cfg.category_url, cfg.target_count)
        .with_context(|| format!("Crawl of {} failed", cfg.category_url))?;

    exports::save_to_csv(&outcome.listings, &cfg.csv_path)?;
    exports::save_to_json(&outcome.listings, &cfg.json_path)?;

    for failure in &outcome.failures {
        warn!(url = %failure.url, error = %failure.error, "Skipped listing");
    }

    info!(
        listings = outcome.listings.len(),
        failed = outcome.failures.len(),
        pages = outcome.pages_fetched,
        csv = %cfg.csv_path.display(),
        json = %cfg.json_path.display(),
        "Scrape complete"
    );

    Ok(())
}

/// RUST_LOG wins, then -q, then -v count. Logs go to stderr; stdout carries progress.
fn init_tracing(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
