//! SGTIN-96 parsing
//!
//! Layout (96 bits, MSB first):
//! ```text
//! | header 8 | filter 3 | partition 3 | company + item 44 | serial 38 |
//! ```
//! The partition selects how the 44 middle bits split between the company
//! prefix and the item reference.

use crate::bits::read_bits;
use crate::error::{Error, Result};
use std::fmt;

/// Hex characters in an SGTIN-96 EPC
pub const SGTIN96_HEX_LEN: usize = 24;

const PARTITION_OFFSET: usize = 11;
const COMPANY_OFFSET: usize = 14;
const SERIAL_OFFSET: usize = 58;
const SERIAL_BITS: usize = 38;

/// (company prefix bits, item reference bits) indexed by partition
const PARTITIONS: [(usize, usize); 7] = [
    (40, 4),
    (37, 7),
    (34, 10),
    (30, 14),
    (27, 17),
    (24, 20),
    (20, 24),
];

/// A parsed SGTIN-96
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sgtin96 {
    /// 14-digit GTIN including the check digit
    pub gtin14: String,
    /// Serial number
    pub serial: u64,
}

impl fmt::Display for Sgtin96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.gtin14, self.serial)
    }
}

/// GS1 check digit for a string of decimal digits
///
/// Weights run 3, 1, 3, ... starting from the rightmost digit. Returns
/// `None` if any character is not a digit.
pub fn check_digit(digits: &str) -> Option<u8> {
    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let d = c.to_digit(10)?;
        sum += if i % 2 == 0 { d * 3 } else { d };
    }
    Some(((10 - sum % 10) % 10) as u8)
}

/// Parse a 24-hex-character SGTIN-96 EPC
///
/// # Examples
///
/// ```
/// use uhfrs_epc::sgtin;
///
/// let tag = sgtin::parse("3074257BF7194E4000001A85").unwrap();
/// assert_eq!(tag.gtin14, "80614141123458");
/// assert_eq!(tag.serial, 6789);
/// ```
pub fn parse(hex: &str) -> Result<Sgtin96> {
    if hex.len() != SGTIN96_HEX_LEN {
        return Err(Error::WrongLength {
            expected: SGTIN96_HEX_LEN,
            actual: hex.len(),
        });
    }

    let bytes = hex::decode(hex).map_err(|_| Error::InvalidHex(hex.to_string()))?;
    let field = |start, len| read_bits(&bytes, start, len).unwrap_or_default();

    let partition = field(PARTITION_OFFSET, 3) as u8;
    let &(company_bits, item_bits) = PARTITIONS
        .get(partition as usize)
        .ok_or(Error::PartitionOutOfRange(partition))?;

    let company = field(COMPANY_OFFSET, company_bits);
    let item = field(COMPANY_OFFSET + company_bits, item_bits);

    let p = partition as usize;
    let company = format!("{:0width$}", company, width = 12 - p);
    let item = format!("{:0width$}", item, width = p + 1);

    // Indicator digit leads, then company prefix, then the rest of the item
    let (indicator, item_rest) = item.split_at(1);
    let gtin13 = format!("{}{}{}", indicator, company, item_rest);
    if gtin13.len() != 13 {
        return Err(Error::AssemblyError {
            digits: gtin13.len(),
        });
    }

    let check = check_digit(&gtin13).ok_or(Error::AssemblyError {
        digits: gtin13.len(),
    })?;

    Ok(Sgtin96 {
        gtin14: format!("{}{}", gtin13, check),
        serial: field(SERIAL_OFFSET, SERIAL_BITS) as u64,
    })
}
