// scraper.rs
use crate::domain::listing::Listing;
use crate::scraper::extract::extract_listing;
use crate::scraper::fetcher::HtmlSource;
use crate::scraper::index::{parse_index, parse_listing_urls, IndexPage};
use crate::scraper::ScraperError;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, info};
use url::Url;

/// A listing that was found on an index page but could not be scraped.
#[derive(Debug)]
pub struct ListingFailure {
    pub url: String,
    pub error: ScraperError,
}

#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Page order, then document order within a page. Not deduplicated.
    pub listings: Vec<Listing>,
    pub failures: Vec<ListingFailure>,
    /// Index pages requested, including ones that came back empty.
    pub pages_fetched: u32,
}

pub struct RealtScraper<S> {
    source: S,
    workers: usize,
}

impl<S: HtmlSource> RealtScraper<S> {
    /// `workers` > 1 fetches the detail pages of one index page concurrently.
    pub fn new(source: S, workers: usize) -> Self {
        Self {
            source,
            workers: workers.max(1),
        }
    }

    /// Walks index pages 1..=N of `category_url` until `target_count` listings
    /// are collected or a page produces none.
    ///
    /// N is read once, from page 1. Only index-level problems (page 1 missing,
    /// no pagination control, non-numeric page count) are returned as errors;
    /// per-listing problems end up in `CrawlOutcome::failures`.
    pub fn collect(
        &self,
        category_url: &Url,
        target_count: usize,
    ) -> Result<CrawlOutcome, ScraperError> {
        let mut outcome = CrawlOutcome::default();

        let first_html =
            self.fetch_index(category_url, 1)
                .ok_or_else(|| ScraperError::IndexUnavailable {
                    url: category_url.to_string(),
                })?;
        outcome.pages_fetched = 1;

        let IndexPage {
            listing_urls,
            page_count,
        } = parse_index(&first_html)?;
        info!(url = %category_url, page_count, target_count, "Category index parsed");

        let mut first_page = Some(listing_urls);

        for page in 1..=page_count {
            let hrefs = match first_page.take() {
                Some(hrefs) => hrefs,
                None => {
                    outcome.pages_fetched += 1;
                    match self.fetch_index(category_url, page) {
                        Some(html) => parse_listing_urls(&html)?,
                        None => Vec::new(),
                    }
                }
            };
            debug!(page, links = hrefs.len(), "Index page links");

            let mut urls = Vec::with_capacity(hrefs.len());
            for href in hrefs {
                match category_url.join(&href) {
                    Ok(url) => urls.push(url.to_string()),
                    Err(source) => record_failure(
                        &mut outcome.failures,
                        href.clone(),
                        ScraperError::InvalidUrl { url: href, source },
                    ),
                }
            }

            let mut page_listings = 0usize;
            for (url, result) in urls.iter().zip(self.scrape_listings(&urls)) {
                match result {
                    Ok(listing) => {
                        outcome.listings.push(listing);
                        page_listings += 1;
                    }
                    Err(error) => record_failure(&mut outcome.failures, url.clone(), error),
                }
            }

            if page_listings == 0 {
                info!(page, "🏁 No listings on page, stopping");
                break;
            }

            info!(
                page,
                page_listings,
                total = outcome.listings.len(),
                "✅ Page scraped"
            );

            if outcome.listings.len() >= target_count {
                info!(target_count, "Target listing count reached");
                break;
            }
        }

        Ok(outcome)
    }

    fn fetch_index(&self, category_url: &Url, page: u32) -> Option<String> {
        debug!(page, "📄 Fetching index page");
        self.source
            .get_html(category_url.as_str(), &[("page", page.to_string())])
    }

    /// One result per url, in the same order as `urls`.
    fn scrape_listings(&self, urls: &[String]) -> Vec<Result<Listing, ScraperError>> {
        if self.workers == 1 || urls.len() < 2 {
            return urls.iter().map(|url| self.scrape_listing(url)).collect();
        }

        let cursor = &AtomicUsize::new(0);
        let mut indexed: Vec<(usize, Result<Listing, ScraperError>)> =
            Vec::with_capacity(urls.len());

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers.min(urls.len()))
                .map(|_| {
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        loop {
                            let i = cursor.fetch_add(1, Ordering::Relaxed);
                            let Some(url) = urls.get(i) else { break };
                            done.push((i, self.scrape_listing(url)));
                        }
                        done
                    })
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok(done) => indexed.extend(done),
                    Err(_) => error!("Detail worker panicked"),
                }
            }
        });

        // Completion order is arbitrary; restore document order. A panicked
        // worker leaves holes, which become DetailUnavailable.
        indexed.sort_by_key(|(i, _)| *i);
        let mut indexed = indexed.into_iter().peekable();
        urls.iter()
            .enumerate()
            .map(|(i, url)| match indexed.next_if(|(j, _)| *j == i) {
                Some((_, result)) => result,
                None => Err(ScraperError::DetailUnavailable { url: url.clone() }),
            })
            .collect()
    }

    fn scrape_listing(&self, url: &str) -> Result<Listing, ScraperError> {
        println!("Start: {url}");

        let html = self
            .source
            .get_html(url, &[])
            .ok_or_else(|| ScraperError::DetailUnavailable {
                url: url.to_string(),
            })?;

        extract_listing(url, &html)
    }
}

fn record_failure(failures: &mut Vec<ListingFailure>, url: String, error: ScraperError) {
    debug!(url = %url, error = %error, "Listing skipped");

    println!("-----");
    println!("{url}");
    println!("{}", error_chain(&error));
    println!("-----");

    failures.push(ListingFailure { url, error });
}

/// "outer: inner: root" for an error and all of its sources.
fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
