//! Hex and bit-field helpers shared by the decoders

use crate::error::{Error, Result};

/// Convert a hex string to bytes
///
/// An odd-length string is left-padded with one `0` nibble, so `"ABC"`
/// becomes `[0x0A, 0xBC]`.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    let decoded = if hex.len() % 2 == 1 {
        hex::decode(format!("0{}", hex))
    } else {
        hex::decode(hex)
    };

    decoded.map_err(|_| Error::InvalidHex(hex.to_string()))
}

/// Read `len` bits starting at bit `start` (MSB first) as an unsigned integer
///
/// Returns `None` if the range runs past the end of `bytes` or is wider
/// than 128 bits.
pub fn read_bits(bytes: &[u8], start: usize, len: usize) -> Option<u128> {
    if len > 128 || start + len > bytes.len() * 8 {
        return None;
    }

    let value = (start..start + len).fold(0u128, |acc, bit| {
        let set = (bytes[bit / 8] >> (7 - bit % 8)) & 1;
        (acc << 1) | set as u128
    });

    Some(value)
}
