//! Retrieval of raw metadata documents
//!
//! Providers only need "GET this URL, give me the body". Keeping that
//! behind a trait lets the decoding pipeline run against canned bytes.

pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::MetadataError;

pub use http::HttpFetcher;
pub use mock::StaticFetcher;

/// Source of raw metadata documents
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url`, returning the response body
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MetadataError>;
}
