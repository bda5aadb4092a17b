//! Hardware (link-layer) addresses
//!
//! Accepts the textual forms metadata services use for NIC addresses:
//!
//! - `00:00:5e:00:53:01` / `00-00-5e-00-53-01` (two hex digits per group)
//! - `0000.5e00.5301` (four hex digits per group)
//!
//! for EUI-48, EUI-64 and 20-byte IP-over-InfiniBand addresses.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string is not a recognised hardware address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid MAC address {0:?}")]
pub struct MacParseError(String);

/// A parsed hardware address of 6, 8 or 20 bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HardwareAddress(Vec<u8>);

impl HardwareAddress {
    /// Get the raw address bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn valid_len(n: usize) -> bool {
        matches!(n, 6 | 8 | 20)
    }

    fn hex_group(s: &str) -> Option<Vec<u8>> {
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
            .collect()
    }
}

impl FromStr for HardwareAddress {
    type Err = MacParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MacParseError(s.to_string());

        if s.len() < 14 || !s.is_ascii() {
            return Err(invalid());
        }

        let raw = s.as_bytes();
        let (sep, group_len) = match (raw[2], raw[4]) {
            (b':' | b'-', _) => (raw[2] as char, 2),
            (_, b'.') => ('.', 4),
            _ => return Err(invalid()),
        };

        let groups: Vec<&str> = s.split(sep).collect();
        if groups.iter().any(|g| g.len() != group_len) {
            return Err(invalid());
        }

        let mut bytes = Vec::with_capacity(groups.len() * group_len / 2);
        for group in groups {
            bytes.extend(Self::hex_group(group).ok_or_else(invalid)?);
        }

        if !Self::valid_len(bytes.len()) {
            return Err(invalid());
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Serialize for HardwareAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
