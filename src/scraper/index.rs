// index.rs
use crate::scraper::{selector, ScraperError};
use scraper::Html;

/// What a category (search results) page tells us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPage {
    /// Detail-page hrefs in document order, as written in the markup.
    pub listing_urls: Vec<String>,
    pub page_count: u32,
}

pub fn parse_index(html: &str) -> Result<IndexPage, ScraperError> {
    Ok(IndexPage {
        listing_urls: parse_listing_urls(html)?,
        page_count: parse_last_page_number(html)?,
    })
}

/// One href per `listing-item` container; containers without a
/// `.desc a[href]` are skipped.
pub fn parse_listing_urls(html: &str) -> Result<Vec<String>, ScraperError> {
    let document = Html::parse_document(html);
    let item_sel = selector(r#"div[class*="listing-item"]"#)?;
    let desc_sel = selector(".desc")?;
    let anchor_sel = selector("a")?;

    let urls = document
        .select(&item_sel)
        .filter_map(|item| {
            let desc = item.select(&desc_sel).next()?;
            let anchor = desc.select(&anchor_sel).next()?;
            anchor.value().attr("href").map(|href| href.trim().to_string())
        })
        .filter(|href| !href.is_empty())
        .collect();

    Ok(urls)
}

/// The last link in `.paging-list` is the total page count.
pub fn parse_last_page_number(html: &str) -> Result<u32, ScraperError> {
    let document = Html::parse_document(html);
    let paging_sel = selector("div.paging-list")?;
    let anchor_sel = selector("a")?;

    let paging = document
        .select(&paging_sel)
        .next()
        .ok_or(ScraperError::MissingPagination)?;

    let last = paging
        .select(&anchor_sel)
        .last()
        .ok_or(ScraperError::MissingPagination)?;

    let raw = last.text().collect::<String>().trim().to_string();
    raw.parse::<u32>()
        .map_err(|_| ScraperError::InvalidPageCount { raw })
}
