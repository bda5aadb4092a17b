//! Fetcher returning canned responses
//!
//! # Example
//! ```
//! use bootmeta::fetch::StaticFetcher;
//!
//! let fetcher = StaticFetcher::new().with_body(r#"{"hostname": "node-1"}"#);
//! ```

use async_trait::async_trait;
use std::sync::Mutex;

use super::Fetcher;
use crate::MetadataError;

/// Fetcher that returns the same body (or error) for every URL
pub struct StaticFetcher {
    body: Vec<u8>,
    error: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Create a fetcher that returns an empty body
    pub fn new() -> Self {
        Self {
            body: Vec::new(),
            error: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Set the body to return
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Configure to fail every fetch with an HTTP error
    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for StaticFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MetadataError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        if let Some(error) = &self.error {
            return Err(MetadataError::Http(error.clone()));
        }

        Ok(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_fetcher_body() {
        let fetcher = StaticFetcher::new().with_body("hello");

        let body = fetcher.fetch("http://example.invalid/a").await.unwrap();
        assert_eq!(body, b"hello");
        assert_eq!(fetcher.requests(), vec!["http://example.invalid/a"]);
    }

    #[tokio::test]
    async fn test_static_fetcher_error() {
        let fetcher = StaticFetcher::new().with_error("connection refused");

        let err = fetcher.fetch("http://example.invalid/").await.unwrap_err();
        assert!(matches!(err, MetadataError::Http(msg) if msg == "connection refused"));
    }
}
