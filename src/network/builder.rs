//! Translation of provider records into the network model
//!
//! Providers report NICs (by MAC) and addresses separately, with no
//! record-for-record mapping between them. Each NIC becomes a bare
//! hardware interface; every address is collected onto one aggregate
//! interface, paired with a synthesized route.

use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

use super::{
    AddressRecord, HardwareAddress, InterfaceRecord, IpNetwork, Netmask, NetworkInterface,
    NetworkRoute,
};
use crate::MetadataError;

/// Priority given to the aggregate interface
pub const AGGREGATE_PRIORITY: u32 = 5;

/// Supernet that private IPv4 traffic is routed through
const PRIVATE_SUPERNET: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 0);
const PRIVATE_SUPERNET_MASK: Ipv4Addr = Ipv4Addr::new(255, 0, 0, 0);

/// Build the interface list: one per hardware record, then the aggregate
///
/// Fails without returning any interfaces if a MAC address does not parse.
pub fn build_interfaces(
    interfaces: &[InterfaceRecord],
    addresses: &[AddressRecord],
) -> Result<Vec<NetworkInterface>, MetadataError> {
    let mut result = interfaces
        .iter()
        .map(|iface| {
            let mac: HardwareAddress = iface
                .mac
                .parse()
                .map_err(|e| MetadataError::parse("interface.mac", e))?;
            Ok(NetworkInterface {
                hardware_address: Some(mac),
                ..Default::default()
            })
        })
        .collect::<Result<Vec<_>, MetadataError>>()?;

    result.push(aggregate_interface(addresses));

    debug!(
        "Built {} hardware interfaces and aggregate with {} addresses",
        interfaces.len(),
        result.last().map_or(0, |iface| iface.ip_addresses.len())
    );
    Ok(result)
}

fn aggregate_interface(addresses: &[AddressRecord]) -> NetworkInterface {
    let mut iface = NetworkInterface {
        priority: AGGREGATE_PRIORITY,
        ..Default::default()
    };

    for addr in addresses {
        let Some(destination) = route_destination(addr) else {
            // TODO: private IPv6 addresses are dropped here; decide whether they need a route
            debug!("Skipping private IPv6 address {}", addr.address);
            continue;
        };

        iface
            .ip_addresses
            .push(IpNetwork::new(addr.address, addr.netmask));
        iface.routes.push(NetworkRoute {
            destination,
            gateway: addr.gateway,
        });
    }

    iface
}

/// Route destination for an address, `None` for private IPv6
fn route_destination(addr: &AddressRecord) -> Option<IpNetwork> {
    let ipv4 = addr.ipv4().is_some();
    match (addr.public, ipv4) {
        (true, _) => Some(IpNetwork::unspecified(ipv4)),
        (false, true) => Some(IpNetwork::new(
            IpAddr::V4(PRIVATE_SUPERNET),
            Netmask::new(IpAddr::V4(PRIVATE_SUPERNET_MASK)),
        )),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        family: u8,
        public: bool,
        address: &str,
        mask: &str,
        gw: Option<&str>,
    ) -> AddressRecord {
        AddressRecord {
            family,
            public,
            address: address.parse().unwrap(),
            netmask: Netmask::new(mask.parse().unwrap()),
            gateway: gw.map(|g| g.parse().unwrap()),
        }
    }

    fn mac(s: &str) -> InterfaceRecord {
        InterfaceRecord { mac: s.to_string() }
    }

    #[test]
    fn test_empty_input_yields_empty_aggregate() {
        let ifaces = build_interfaces(&[], &[]).unwrap();
        assert_eq!(ifaces.len(), 1);
        assert_eq!(ifaces[0].priority, AGGREGATE_PRIORITY);
        assert!(ifaces[0].hardware_address.is_none());
        assert!(ifaces[0].ip_addresses.is_empty());
        assert!(ifaces[0].routes.is_empty());
    }

    #[test]
    fn test_hardware_interfaces_precede_aggregate() {
        let ifaces = build_interfaces(
            &[mac("0c:c4:7a:e5:43:10"), mac("0c:c4:7a:e5:43:11")],
            &[record(4, true, "147.75.1.2", "255.255.255.254", Some("147.75.1.1"))],
        )
        .unwrap();

        assert_eq!(ifaces.len(), 3);
        let expected = ["0c:c4:7a:e5:43:10", "0c:c4:7a:e5:43:11"];
        for (iface, mac) in ifaces.iter().zip(expected) {
            assert_eq!(iface.hardware_address.as_ref().unwrap().to_string(), mac);
            assert_eq!(iface.priority, 0);
            assert!(iface.ip_addresses.is_empty());
            assert!(iface.routes.is_empty());
        }
        assert_eq!(ifaces[2].ip_addresses.len(), 1);
    }

    #[test]
    fn test_public_ipv4_default_route() {
        let ifaces = build_interfaces(
            &[],
            &[record(4, true, "147.75.1.2", "255.255.255.254", Some("147.75.1.1"))],
        )
        .unwrap();
        let agg = &ifaces[0];

        assert_eq!(agg.ip_addresses[0].to_string(), "147.75.1.2/31");
        assert_eq!(agg.routes[0].destination, IpNetwork::unspecified(true));
        assert_eq!(agg.routes[0].gateway, Some("147.75.1.1".parse().unwrap()));
    }

    #[test]
    fn test_public_ipv6_default_route() {
        let ifaces = build_interfaces(
            &[],
            &[record(
                6,
                true,
                "2604:1380::1",
                "ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe",
                Some("2604:1380::"),
            )],
        )
        .unwrap();
        let route = &ifaces[0].routes[0];

        assert_eq!(route.destination, IpNetwork::unspecified(false));
        assert_eq!(route.destination.netmask.prefix_len(), Some(0));
    }

    #[test]
    fn test_private_ipv4_routes_via_supernet() {
        let ifaces = build_interfaces(
            &[],
            &[record(4, false, "10.99.1.3", "255.255.255.254", Some("10.99.1.2"))],
        )
        .unwrap();
        let agg = &ifaces[0];

        assert_eq!(agg.ip_addresses[0].netmask.to_string(), "255.255.255.254");
        assert_eq!(agg.routes[0].destination.to_string(), "10.0.0.0/8");
        assert_eq!(agg.routes[0].gateway, Some("10.99.1.2".parse().unwrap()));
    }

    #[test]
    fn test_private_ipv6_is_skipped() {
        let ifaces = build_interfaces(
            &[],
            &[
                record(6, false, "fd00::5", "ffff:ffff:ffff:ffff::", Some("fd00::1")),
                record(4, false, "10.99.1.3", "255.255.255.254", None),
            ],
        )
        .unwrap();
        let agg = &ifaces[0];

        assert_eq!(agg.ip_addresses.len(), 1);
        assert_eq!(agg.routes.len(), 1);
        assert_eq!(
            agg.ip_addresses[0].address,
            "10.99.1.3".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_ipv4_mapped_private_address_uses_supernet() {
        let ifaces = build_interfaces(
            &[],
            &[record(4, false, "::ffff:10.1.1.1", "255.255.255.0", None)],
        )
        .unwrap();
        assert_eq!(ifaces[0].routes[0].destination.to_string(), "10.0.0.0/8");
    }

    #[test]
    fn test_malformed_mac_fails_whole_build() {
        let err = build_interfaces(
            &[mac("0c:c4:7a:e5:43:10"), mac("not-a-mac")],
            &[record(4, true, "147.75.1.2", "255.255.255.254", None)],
        )
        .unwrap_err();

        match err {
            MetadataError::Parse { field, cause } => {
                assert_eq!(field, "interface.mac");
                assert!(cause.contains("not-a-mac"));
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
