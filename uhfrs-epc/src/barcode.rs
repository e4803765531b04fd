//! Barcode text recovered from an encrypted EPC

use bitflags::bitflags;
use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;
use std::fmt;

/// Low byte shared by every barcode header code
pub const BARCODE_HEADER: u8 = 0x10;

bitflags! {
    /// Flag bits carried in the final byte of an encoded barcode
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BarcodeFlags: u8 {
        /// The final decoded byte is payload rather than padding
        const WITH_DATA = 0x80;
        /// The payload starts with a 2-byte clear-text header
        const WITH_HEADER = 0x40;
    }
}

/// Barcode category encoded in the 2-byte header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderType {
    #[default]
    None,
    Bundle,
    Machine,
    Employee,
}

impl HeaderType {
    /// Header code as stored on the tag (little-endian on the wire)
    pub const fn code(self) -> u16 {
        let category: u16 = match self {
            HeaderType::None => return 0,
            HeaderType::Bundle => 1,
            HeaderType::Machine => 2,
            HeaderType::Employee => 3,
        };
        (category << 8) | BARCODE_HEADER as u16
    }

    /// Look up a header code; unknown codes map to [`HeaderType::None`]
    pub fn from_code(code: u16) -> Self {
        match code {
            0x0110 => HeaderType::Bundle,
            0x0210 => HeaderType::Machine,
            0x0310 => HeaderType::Employee,
            _ => HeaderType::None,
        }
    }

    /// Get header name
    pub fn name(self) -> &'static str {
        match self {
            HeaderType::None => "none",
            HeaderType::Bundle => "bundle",
            HeaderType::Machine => "machine",
            HeaderType::Employee => "employee",
        }
    }
}

impl fmt::Display for HeaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decrypted barcode: header category plus raw payload bytes
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DecodedBarcode {
    header_type: HeaderType,
    payload: Bytes,
}

impl DecodedBarcode {
    /// Create a barcode, inferring the header from the payload when none is
    /// given
    ///
    /// With `HeaderType::None` and a payload longer than 2 bytes, the first
    /// two payload bytes are read as a little-endian header code. A known code
    /// replaces `None`.
    pub fn new(header_type: HeaderType, payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();

        let header_type = if header_type == HeaderType::None && payload.len() > 2 {
            HeaderType::from_code(LittleEndian::read_u16(&payload[..2]))
        } else {
            header_type
        };

        Self {
            header_type,
            payload,
        }
    }

    /// Barcode with no header and no payload
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn header_type(&self) -> HeaderType {
        self.header_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Printable text of the barcode
    ///
    /// Skips a 2-byte header when one is present (or when the payload starts
    /// with a zero header code). Returns an empty string if anything left is
    /// outside printable ASCII `32..=126`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uhfrs_epc::{DecodedBarcode, HeaderType};
    ///
    /// let barcode = DecodedBarcode::new(HeaderType::None, b"AB12".to_vec());
    /// assert_eq!(barcode.text(), "AB12");
    ///
    /// let barcode = DecodedBarcode::new(HeaderType::None, vec![0x10, 0x01, b'X']);
    /// assert_eq!(barcode.text(), "X");
    /// ```
    pub fn text(&self) -> String {
        let payload = &self.payload[..];

        let skip = match self.header_type {
            HeaderType::None if payload.len() >= 2 && LittleEndian::read_u16(payload) == 0 => 2,
            HeaderType::None => 0,
            _ => 2,
        };

        let body = payload.get(skip..).unwrap_or_default();
        if body.is_empty() || !body.iter().all(|b| (32..=126).contains(b)) {
            return String::new();
        }

        body.iter().map(|&b| b as char).collect()
    }
}

impl fmt::Debug for DecodedBarcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedBarcode")
            .field("header_type", &self.header_type)
            .field("payload", &hex::encode_upper(&self.payload))
            .finish()
    }
}

impl fmt::Display for DecodedBarcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
