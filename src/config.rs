use crate::cli::Args;
use crate::scraper::ScraperError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Everything a crawl needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub category_url: Url,
    pub target_count: usize,
    pub workers: usize,
    pub timeout: Option<Duration>,
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

impl ScrapeConfig {
    pub fn from_args(args: &Args) -> Result<Self, ScraperError> {
        Ok(Self {
            category_url: category_url(&args.base_url, &args.category)?,
            target_count: args.count as usize,
            workers: usize::from(args.workers),
            timeout: args.timeout_secs.map(Duration::from_secs),
            csv_path: args.output_dir.join(format!("{}.csv", args.output)),
            json_path: args.output_dir.join(format!("{}.json", args.output)),
        })
    }
}

/// `base` + `category`, tolerant of a missing trailing slash on `base`.
pub fn category_url(base: &str, category: &str) -> Result<Url, ScraperError> {
    let invalid = |source| ScraperError::InvalidUrl {
        url: format!("{base}{category}"),
        source,
    };

    let mut base = Url::parse(base).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(category.trim_start_matches('/')).map_err(invalid)
}
