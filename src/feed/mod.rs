pub mod fetcher;
pub mod parser;

use async_trait::async_trait;
use std::time::Duration;

use crate::{errors::RefreshError, models::raw_entry::RawEntry, pipeline::DataSource};

/// Default FMI CAP feed (English).
pub const FMI_RSS_FEED: &str = "https://alerts.fmi.fi/cap/feed/rss_en-GB.rss";

/// Reads raw entries from a feed URL over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RefreshError> {
        Ok(Self {
            client: fetcher::build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DataSource for HttpFeedSource {
    async fn fetch_raw_entries(&self) -> Result<Vec<RawEntry>, RefreshError> {
        let body = fetcher::fetch_feed(&self.client, &self.url).await?;
        let entries = parser::parse_feed_bytes(body.as_bytes())?;
        if entries.is_empty() {
            log::debug!("No warnings found in feed");
        }
        Ok(entries)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
