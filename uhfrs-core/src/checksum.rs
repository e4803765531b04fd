//! Reader frame checksum
//!
//! Every frame ends with a single byte that makes the whole frame sum to
//! zero modulo 256:
//! 1. Sum every byte from the head marker to the last payload byte
//! 2. Truncate the sum to 8 bits
//! 3. Take the two's complement

use tracing::trace;

/// Calculate the checksum byte for `bytes`
///
/// # Algorithm
///
/// ```text
/// checksum = (0 - sum(bytes)) & 0xFF
/// ```
///
/// # Examples
///
/// ```
/// use uhfrs_core::checksum;
///
/// // head, length, address, CMD_RESET
/// let checksum = checksum::calculate(&[0xA0, 0x03, 0x01, 0x70]);
/// assert_eq!(checksum, 0xEC);
/// ```
pub fn calculate(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    let checksum = sum.wrapping_neg();

    trace!(
        len = bytes.len(),
        checksum = format!("0x{:02X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify a complete frame whose last byte is the checksum
///
/// Returns `false` for an empty slice.
pub fn verify(frame: &[u8]) -> bool {
    match frame.split_last() {
        Some((&received, body)) => calculate(body) == received,
        None => false,
    }
}
