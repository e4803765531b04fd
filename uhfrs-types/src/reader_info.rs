//! Reader information structures

use std::fmt;

/// Reader identity as reported by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderInfo {
    /// Bus address the reader answers on
    pub address: u8,

    /// Firmware version as `major.minor`
    pub firmware_version: String,

    /// User-assigned identifier, space separated upper-case hex
    pub identifier: Option<String>,
}

impl ReaderInfo {
    pub fn new(address: u8, major: u8, minor: u8) -> Self {
        Self {
            address,
            firmware_version: format!("{}.{}", major, minor),
            identifier: None,
        }
    }

    /// Attach the raw identifier bytes
    pub fn with_identifier(mut self, id: &[u8]) -> Self {
        let hex = id
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        self.identifier = Some(hex);
        self
    }
}

impl fmt::Display for ReaderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reader[0x{:02X}, FW: {}",
            self.address, self.firmware_version
        )?;
        if let Some(id) = &self.identifier {
            write!(f, ", ID: {}", id)?;
        }
        write!(f, "]")
    }
}
