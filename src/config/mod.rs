//! Agent configuration
//!
//! Loaded from YAML; every field has a default so an absent file or
//! section is valid.

mod loader;

pub use loader::{DEFAULT_CONFIG_PATH, load_config};

use serde::{Deserialize, Serialize};

/// Default Packet metadata service
pub const PACKET_BASE_URL: &str = "https://metadata.packet.net";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP client settings
    pub http: HttpConfig,

    /// Packet provider settings
    pub packet: PacketConfig,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            connect_timeout_secs: 2,
        }
    }
}

/// Packet provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketConfig {
    /// Metadata service base URL; `/metadata` is appended
    pub base_url: String,
    /// Prefix for published attribute names
    pub attribute_prefix: String,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            base_url: PACKET_BASE_URL.to_string(),
            attribute_prefix: "PACKET".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
