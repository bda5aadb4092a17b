//! Kernel command line
//!
//! The OEM image records its provider as `coreos.oem.id=<name>`.

use std::path::Path;
use tokio::fs;

use crate::MetadataError;

/// Kernel command line location
pub const CMDLINE_PATH: &str = "/proc/cmdline";

const OEM_FLAG: &str = "coreos.oem.id";

/// Extract the OEM id; the last occurrence with a value wins
pub fn parse_oem_id(cmdline: &str) -> Option<String> {
    let mut oem = None;

    for arg in cmdline.split_whitespace() {
        if let Some((OEM_FLAG, value)) = arg.split_once('=') {
            oem = Some(value.to_string());
        }
    }

    oem.filter(|id| !id.is_empty())
}

/// Read the OEM id from a kernel command line file
pub async fn read_oem_id(path: impl AsRef<Path>) -> Result<Option<String>, MetadataError> {
    let cmdline = fs::read_to_string(path.as_ref()).await?;
    Ok(parse_oem_id(&cmdline))
}
