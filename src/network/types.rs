//! Provider-agnostic network records and the network model built from them

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::HardwareAddress;

/// Subnet mask, stored in address form (`255.255.255.0`, `ffff:ffff::`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Netmask(IpAddr);

impl Netmask {
    /// Wrap a mask given in address form
    pub fn new(mask: IpAddr) -> Self {
        Self(mask)
    }

    /// Build a contiguous mask of `prefix` bits for an IPv4 or IPv6 address
    pub fn from_prefix(ipv4: bool, prefix: u8) -> Option<Self> {
        if ipv4 {
            let bits = match prefix {
                0 => 0,
                1..=32 => u32::MAX << (32 - prefix),
                _ => return None,
            };
            Some(Self(IpAddr::V4(Ipv4Addr::from(bits))))
        } else {
            let bits = match prefix {
                0 => 0,
                1..=128 => u128::MAX << (128 - prefix),
                _ => return None,
            };
            Some(Self(IpAddr::V6(Ipv6Addr::from(bits))))
        }
    }

    /// The all-zero mask for the given address length
    pub fn zero(ipv4: bool) -> Self {
        if ipv4 {
            Self(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        } else {
            Self(IpAddr::V6(Ipv6Addr::UNSPECIFIED))
        }
    }

    /// Prefix length, or `None` when the mask is not contiguous
    pub fn prefix_len(&self) -> Option<u8> {
        let (ones, total) = match self.0 {
            IpAddr::V4(m) => {
                let bits = u32::from(m);
                (bits.leading_ones(), bits.count_ones())
            }
            IpAddr::V6(m) => {
                let bits = u128::from(m);
                (bits.leading_ones(), bits.count_ones())
            }
        };
        (ones == total).then_some(ones as u8)
    }
}

impl fmt::Display for Netmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Netmask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Netmask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IpAddr::deserialize(deserializer).map(Self)
    }
}

/// An address together with its subnet mask
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpNetwork {
    pub address: IpAddr,
    pub netmask: Netmask,
}

impl IpNetwork {
    pub fn new(address: IpAddr, netmask: Netmask) -> Self {
        Self { address, netmask }
    }

    /// The zero-valued network (`0.0.0.0/0` or `::/0`)
    pub fn unspecified(ipv4: bool) -> Self {
        let address = if ipv4 {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        };
        Self::new(address, Netmask::zero(ipv4))
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.netmask.prefix_len() {
            Some(prefix) => write!(f, "{}/{}", self.address, prefix),
            None => write!(f, "{}/{}", self.address, self.netmask),
        }
    }
}

/// A route to `destination` via `gateway`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkRoute {
    pub destination: IpNetwork,
    pub gateway: Option<IpAddr>,
}

/// One interface in the translated network model
///
/// Interfaces derived from a hardware record carry only `hardware_address`;
/// addresses and routes live on the single aggregate interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkInterface {
    pub hardware_address: Option<HardwareAddress>,
    pub priority: u32,
    pub ip_addresses: Vec<IpNetwork>,
    pub routes: Vec<NetworkRoute>,
}

/// One address as reported by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// IP family as reported, normally 4 or 6
    pub family: u8,
    pub public: bool,
    pub address: IpAddr,
    pub netmask: Netmask,
    pub gateway: Option<IpAddr>,
}

impl AddressRecord {
    /// The address as IPv4, if it is one or is an IPv4-mapped IPv6 address
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.address {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped(),
        }
    }
}

/// One hardware interface as reported by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub mac: String,
}
