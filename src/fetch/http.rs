//! HTTP fetcher backed by reqwest

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::Fetcher;
use crate::{MetadataError, config::HttpConfig};

/// Fetches metadata documents with a single HTTP GET
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, MetadataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MetadataError> {
        debug!("Fetching metadata: {}", url);

        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(MetadataError::Http(format!(
                "Failed to fetch {}: {}",
                url,
                response.status()
            )))
        }
    }
}
