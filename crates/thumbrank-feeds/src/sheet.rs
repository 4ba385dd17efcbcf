//! Published Google Sheet, fetched as CSV over HTTP.

use crate::{FeedError, RecordSource};
use std::time::Duration;
use thumbrank_core::config::SheetConfig;

#[derive(Clone)]
pub struct SheetSource {
    client: reqwest::Client,
    url: String,
}

impl SheetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &SheetConfig) -> Result<Self, FeedError> {
        Self::new(
            config.csv_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl RecordSource for SheetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_text(&self) -> Result<String, FeedError> {
        tracing::debug!(url = %self.url, "fetching sheet");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
