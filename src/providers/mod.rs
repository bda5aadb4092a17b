//! Cloud provider adapters
//!
//! A provider fetches its metadata document, decodes it into the common
//! network records and hands back a [`Metadata`].

pub mod packet;

use async_trait::async_trait;

use crate::{Metadata, MetadataError};

/// Trait for cloud metadata providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Name of this provider (e.g., "packet")
    fn name(&self) -> &'static str;

    /// Fetch and translate the instance metadata
    async fn fetch_metadata(&self) -> Result<Metadata, MetadataError>;
}
