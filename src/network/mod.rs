//! Network model
//!
//! Provider adapters decode their address and interface listings into
//! [`AddressRecord`] and [`InterfaceRecord`]; [`build_interfaces`] turns
//! those into the provider-agnostic [`NetworkInterface`] list.

mod builder;
mod mac;
mod types;

pub use builder::{AGGREGATE_PRIORITY, build_interfaces};
pub use mac::{HardwareAddress, MacParseError};
pub use types::{
    AddressRecord, InterfaceRecord, IpNetwork, Netmask, NetworkInterface, NetworkRoute,
};
