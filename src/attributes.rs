//! Address attributes
//!
//! Every reported address is published under a name built from the
//! provider prefix, its family/visibility class and its position within
//! that class, e.g. `PACKET_IPV4_PUBLIC_0`.

use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::network::AddressRecord;

/// Attribute name to value, ordered by name
pub type AttributeMap = BTreeMap<String, String>;

/// Family/visibility class of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressClass {
    PublicIpv4,
    PrivateIpv4,
    PublicIpv6,
    PrivateIpv6,
}

impl AddressClass {
    const ALL: [AddressClass; 4] = [
        AddressClass::PublicIpv4,
        AddressClass::PrivateIpv4,
        AddressClass::PublicIpv6,
        AddressClass::PrivateIpv6,
    ];

    /// Classify by reported family; families other than 4 and 6 have no class
    pub fn of(record: &AddressRecord) -> Option<Self> {
        match (record.family, record.public) {
            (4, true) => Some(Self::PublicIpv4),
            (4, false) => Some(Self::PrivateIpv4),
            (6, true) => Some(Self::PublicIpv6),
            (6, false) => Some(Self::PrivateIpv6),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PublicIpv4 => "IPV4_PUBLIC",
            Self::PrivateIpv4 => "IPV4_PRIVATE",
            Self::PublicIpv6 => "IPV6_PUBLIC",
            Self::PrivateIpv6 => "IPV6_PRIVATE",
        }
    }
}

/// Naming scheme for the attributes of one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeNaming {
    prefix: String,
}

impl AttributeNaming {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// `<PREFIX>_<CLASS>_<index>`
    pub fn address_key(&self, class: AddressClass, index: usize) -> String {
        format!("{}_{}_{}", self.prefix, class.label(), index)
    }

    /// `<PREFIX>_<name>`, for scalar attributes such as `HOSTNAME`
    pub fn key(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}

/// Name every address by class and position within that class
pub fn derive_address_attributes(
    naming: &AttributeNaming,
    addresses: &[AddressRecord],
) -> AttributeMap {
    let mut attrs = AttributeMap::new();

    for class in AddressClass::ALL {
        let members = addresses
            .iter()
            .filter(|addr| AddressClass::of(addr) == Some(class));
        for (index, addr) in members.enumerate() {
            attrs.insert(naming.address_key(class, index), canonical(addr.address));
        }
    }

    attrs
}

/// IPv4-mapped IPv6 addresses are written in dotted-quad form
fn canonical(address: IpAddr) -> String {
    address.to_canonical().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Netmask;

    fn record(family: u8, public: bool, address: &str) -> AddressRecord {
        let address: IpAddr = address.parse().unwrap();
        AddressRecord {
            family,
            public,
            address,
            netmask: Netmask::zero(address.is_ipv4()),
            gateway: None,
        }
    }

    #[test]
    fn test_index_per_class() {
        let naming = AttributeNaming::new("PACKET");
        let attrs = derive_address_attributes(
            &naming,
            &[
                record(4, true, "1.2.3.4"),
                record(4, false, "10.1.1.1"),
                record(4, true, "5.6.7.8"),
            ],
        );

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs["PACKET_IPV4_PUBLIC_0"], "1.2.3.4");
        assert_eq!(attrs["PACKET_IPV4_PRIVATE_0"], "10.1.1.1");
        assert_eq!(attrs["PACKET_IPV4_PUBLIC_1"], "5.6.7.8");
    }

    #[test]
    fn test_private_ipv6_is_named() {
        let naming = AttributeNaming::new("PACKET");
        let attrs = derive_address_attributes(
            &naming,
            &[record(6, true, "2604:1380::1"), record(6, false, "fd00::5")],
        );

        assert_eq!(attrs["PACKET_IPV6_PUBLIC_0"], "2604:1380::1");
        assert_eq!(attrs["PACKET_IPV6_PRIVATE_0"], "fd00::5");
    }

    #[test]
    fn test_unknown_family_is_excluded() {
        let naming = AttributeNaming::new("X");
        let attrs = derive_address_attributes(&naming, &[record(5, true, "1.2.3.4")]);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_no_addresses() {
        let attrs = derive_address_attributes(&AttributeNaming::new("PACKET"), &[]);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_prefix_is_configurable() {
        let naming = AttributeNaming::new("CUSTOM");
        let attrs = derive_address_attributes(&naming, &[record(4, true, "1.2.3.4")]);
        assert_eq!(attrs["CUSTOM_IPV4_PUBLIC_0"], "1.2.3.4");
        assert_eq!(naming.key("HOSTNAME"), "CUSTOM_HOSTNAME");
    }

    #[test]
    fn test_mapped_address_rendered_as_ipv4() {
        let naming = AttributeNaming::new("PACKET");
        let attrs = derive_address_attributes(&naming, &[record(4, true, "::ffff:1.2.3.4")]);
        assert_eq!(attrs["PACKET_IPV4_PUBLIC_0"], "1.2.3.4");
    }
}
