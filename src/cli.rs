//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Scrape realt.by listings of one category into CSV and JSON files.
#[derive(Parser, Debug)]
#[command(name = "realt_scraper")]
#[command(author, version, about)]
pub struct Args {
    /// Site root
    #[arg(long, env = "REALT_BASE_URL", default_value = "https://realt.by/")]
    pub base_url: String,

    /// Category path under the site root
    #[arg(long, env = "REALT_CATEGORY", default_value = "rent/cottage-for-long")]
    pub category: String,

    /// Stop once at least this many listings are collected
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Output file stem; writes <stem>.csv and <stem>.json
    #[arg(short, long, default_value = "realt.by")]
    pub output: String,

    /// Directory for the output files
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Detail pages fetched concurrently per index page (1 = sequential)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub workers: u8,

    /// Per-request timeout in seconds. No timeout when omitted.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
