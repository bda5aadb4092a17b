//! bootmeta library
//!
//! Fetches instance metadata from a cloud provider at boot and translates
//! it into named attributes and a provider-agnostic network model, used to
//! seed the hostname, network interfaces and SSH keys.
//!
//! # Layout
//!
//! - [`fetch`]: retrieval of raw metadata documents
//! - [`providers`]: per-provider decoding into common records
//! - [`network`]: the network model and its builder
//! - [`attributes`]: address attribute naming

pub mod attributes;
pub mod cmdline;
pub mod config;
pub mod fetch;
pub mod network;
pub mod providers;

mod error;

pub use attributes::AttributeMap;
pub use error::MetadataError;

use serde::Serialize;

use network::NetworkInterface;

/// Translated instance metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Named attributes (addresses, hostname, phone-home URL)
    pub attributes: AttributeMap,
    pub hostname: String,
    pub ssh_keys: Vec<String>,
    /// Hardware interfaces followed by the aggregate interface
    pub network: Vec<NetworkInterface>,
}
