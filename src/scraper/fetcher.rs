// fetcher.rs
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Anything that can turn a URL (plus query params) into page HTML.
///
/// Returns `None` for every transport failure: non-success status, connection
/// errors, unreadable bodies. Callers treat that as "no data", not as an error.
pub trait HtmlSource: Sync {
    fn get_html(&self, url: &str, params: &[(&str, String)]) -> Option<String>;
}

pub struct RealtClient {
    client: Client,
}

impl RealtClient {
    /// `timeout: None` means a slow server can stall the crawl indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl HtmlSource for RealtClient {
    fn get_html(&self, url: &str, params: &[(&str, String)]) -> Option<String> {
        debug!(url, ?params, "GET");

        let resp = match self.client.get(url).query(params).send() {
            Ok(resp) => resp,
            Err(e) => {
                warn!(url, error = %e, "Request failed");
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(url, %status, "Non-success status");
            return None;
        }

        match resp.text() {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(url, error = %e, "Failed to read response body");
                None
            }
        }
    }
}
