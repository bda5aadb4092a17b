//! Packet (Equinix Metal) provider
//!
//! The metadata service returns one JSON document at `<base>/metadata`
//! describing the device, its NICs and its assigned addresses.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::net::IpAddr;
use tracing::{debug, info, warn};

use super::Provider;
use crate::attributes::{AttributeNaming, derive_address_attributes};
use crate::config::{Config, PacketConfig};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::network::{AddressRecord, InterfaceRecord, Netmask, build_interfaces};
use crate::{Metadata, MetadataError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMetadata {
    error: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    ssh_keys: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    phone_home_url: String,
    #[serde(deserialize_with = "null_as_default")]
    network: RawNetwork,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNetwork {
    #[serde(deserialize_with = "null_as_default")]
    interfaces: Vec<RawInterface>,
    #[serde(deserialize_with = "null_as_default")]
    addresses: Vec<RawAddress>,
}

#[derive(Debug, Deserialize)]
struct RawInterface {
    mac: String,
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    #[serde(default, deserialize_with = "null_as_default")]
    address_family: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    public: bool,
    address: IpAddr,
    netmask: Option<Netmask>,
    cidr: Option<u8>,
    gateway: Option<IpAddr>,
}

/// `null` leaves the field at its default, same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawAddress {
    fn into_record(self) -> AddressRecord {
        let ipv4 = self.address.to_canonical().is_ipv4();
        let netmask = match (self.netmask, self.cidr) {
            (Some(mask), _) => mask,
            (None, Some(cidr)) => Netmask::from_prefix(ipv4, cidr).unwrap_or_else(|| {
                warn!("Address {} has out-of-range cidr {}", self.address, cidr);
                Netmask::zero(ipv4)
            }),
            (None, None) => {
                warn!("Address {} has neither netmask nor cidr", self.address);
                Netmask::zero(ipv4)
            }
        };

        AddressRecord {
            family: self.address_family,
            public: self.public,
            address: self.address,
            netmask,
            gateway: self.gateway,
        }
    }
}

/// Decoded Packet metadata, before translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketMetadata {
    pub hostname: String,
    pub ssh_keys: Vec<String>,
    pub phone_home_url: String,
    pub interfaces: Vec<InterfaceRecord>,
    pub addresses: Vec<AddressRecord>,
}

/// Decode a metadata document
///
/// A non-empty `error` field in the document is returned as
/// [`MetadataError::Provider`] with the message unchanged.
pub fn decode(body: &[u8]) -> Result<PacketMetadata, MetadataError> {
    let raw: RawMetadata = serde_json::from_slice(body)?;

    if let Some(error) = raw.error.filter(|e| !e.is_empty()) {
        return Err(MetadataError::Provider(error));
    }

    let addresses = raw
        .network
        .addresses
        .into_iter()
        .map(RawAddress::into_record)
        .collect();

    let interfaces = raw
        .network
        .interfaces
        .into_iter()
        .map(|iface| InterfaceRecord { mac: iface.mac })
        .collect();

    Ok(PacketMetadata {
        hostname: raw.hostname,
        ssh_keys: raw.ssh_keys,
        phone_home_url: raw.phone_home_url,
        interfaces,
        addresses,
    })
}

impl PacketMetadata {
    /// Build the network model and attribute set
    pub fn into_metadata(self, naming: &AttributeNaming) -> Result<Metadata, MetadataError> {
        let network = build_interfaces(&self.interfaces, &self.addresses)?;

        let mut attributes = derive_address_attributes(naming, &self.addresses);
        attributes.insert(naming.key("HOSTNAME"), self.hostname.clone());
        attributes.insert(naming.key("PHONE_HOME_URL"), self.phone_home_url);

        Ok(Metadata {
            attributes,
            hostname: self.hostname,
            ssh_keys: self.ssh_keys,
            network,
        })
    }
}

/// Packet metadata provider
pub struct Packet<F = HttpFetcher> {
    fetcher: F,
    base_url: String,
    naming: AttributeNaming,
}

impl Packet<HttpFetcher> {
    pub fn new(config: &Config) -> Result<Self, MetadataError> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::with_fetcher(fetcher, &config.packet))
    }
}

impl<F: Fetcher> Packet<F> {
    /// Create with a custom fetcher (for testing)
    pub fn with_fetcher(fetcher: F, config: &PacketConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            naming: AttributeNaming::new(config.attribute_prefix.clone()),
        }
    }

    pub fn metadata_url(&self) -> String {
        format!("{}/metadata", self.base_url)
    }
}

#[async_trait]
impl<F: Fetcher> Provider for Packet<F> {
    fn name(&self) -> &'static str {
        "packet"
    }

    async fn fetch_metadata(&self) -> Result<Metadata, MetadataError> {
        let body = self.fetcher.fetch(&self.metadata_url()).await?;
        let decoded = decode(&body)?;
        debug!(
            "Decoded {} interfaces and {} addresses",
            decoded.interfaces.len(),
            decoded.addresses.len()
        );

        let metadata = decoded.into_metadata(&self.naming)?;
        info!("Fetched Packet metadata for {}", metadata.hostname);
        Ok(metadata)
    }
}
