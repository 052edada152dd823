mod extract;
mod fetcher;
mod index;
mod scraper;
mod scraper_error;

pub use fetcher::{HtmlSource, RealtClient};
pub use self::scraper::RealtScraper;
pub use scraper_error::ScraperError;

#[cfg(test)]
pub use extract::extract_listing;
#[cfg(test)]
pub use index::{parse_index, parse_last_page_number, parse_listing_urls, IndexPage};

use ::scraper::{ElementRef, Selector};

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(e.to_string()))
}

/// Concatenated, trimmed text of an element and its descendants.
fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
