use thiserror::Error;

/// `RealtScraper::collect` returns the index-level kinds as its error; the
/// listing-level ones (detail page, map data) only appear in
/// `CrawlOutcome::failures`.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// The first index page could not be fetched, so there is nothing to paginate.
    #[error("Index page unavailable: {url}")]
    IndexUnavailable { url: String },

    #[error("Pagination control (.paging-list) not found on index page")]
    MissingPagination,

    #[error("Last page number is not an integer: {raw:?}")]
    InvalidPageCount { raw: String },

    #[error("Detail page unavailable: {url}")]
    DetailUnavailable { url: String },

    #[error("Malformed map data: {0}")]
    MapData(#[from] serde_json::Error),

    #[error("Unexpected map data shape: {0}")]
    MapPosition(String),
}

