//! Single inventory read

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::{Error, Result};

/// Highest antenna number on an eight-port reader
pub const MAX_ANTENNA: u8 = 8;

/// One tag seen during inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Upper-case PC+EPC hex
    pub epc: String,

    /// EPC rendered in the configured format, if it decoded
    pub decoded: Option<String>,

    /// Upper-case TID hex, when the TID bank was read
    pub tid: Option<String>,

    /// One based antenna number
    pub antenna: u8,

    /// Signal strength in dBm
    pub rssi: i16,

    /// When the read was received
    pub seen_at: DateTime<Utc>,
}

impl TagRecord {
    /// Create a record stamped with the current time
    pub fn new(epc: impl Into<String>, antenna: u8, rssi: i16) -> Result<Self> {
        if antenna == 0 || antenna > MAX_ANTENNA {
            return Err(Error::InvalidAntenna(antenna));
        }

        let epc = epc.into().to_ascii_uppercase();
        if epc.is_empty() || hex::decode(&epc).is_err() {
            return Err(Error::Validation(format!("EPC is not hex: {:?}", epc)));
        }

        Ok(Self {
            epc,
            decoded: None,
            tid: None,
            antenna,
            rssi,
            seen_at: Utc::now(),
        })
    }

    pub fn with_decoded(mut self, decoded: Option<String>) -> Self {
        self.decoded = decoded;
        self
    }

    pub fn with_tid(mut self, tid: impl Into<String>) -> Self {
        self.tid = Some(tid.into().to_ascii_uppercase());
        self
    }

    pub fn with_seen_at(mut self, seen_at: DateTime<Utc>) -> Self {
        self.seen_at = seen_at;
        self
    }

    /// Decoded text if present, raw EPC otherwise
    pub fn label(&self) -> &str {
        self.decoded.as_deref().unwrap_or(&self.epc)
    }
}

impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [ant {}, {} dBm, {}]",
            self.label(),
            self.antenna,
            self.rssi,
            self.seen_at.format("%Y/%m/%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_normalises_epc() {
        let tag = TagRecord::new("3000e2001122", 1, -49).unwrap();
        assert_eq!(tag.epc, "3000E2001122");
        assert_eq!(tag.label(), "3000E2001122");
        assert!(tag.decoded.is_none());
        assert!(tag.tid.is_none());
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(matches!(
            TagRecord::new("3000", 0, -60),
            Err(Error::InvalidAntenna(0))
        ));
        assert!(matches!(
            TagRecord::new("3000", 9, -60),
            Err(Error::InvalidAntenna(9))
        ));
        assert!(matches!(
            TagRecord::new("30X0", 1, -60),
            Err(Error::Validation(_))
        ));
        assert!(TagRecord::new("", 1, -60).is_err());
    }

    #[test]
    fn test_display() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let tag = TagRecord::new("30004142", 3, -61)
            .unwrap()
            .with_decoded(Some("AB".to_string()))
            .with_tid("e2801160")
            .with_seen_at(at);

        assert_eq!(tag.tid.as_deref(), Some("E2801160"));
        assert_eq!(tag.to_string(), "AB [ant 3, -61 dBm, 2024/03/09 14:05:07]");
    }
}
