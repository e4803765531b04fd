//! Keyed stream cipher protecting barcode payloads stored in the EPC bank
//!
//! Each coded buffer ends with a seed byte. The seed and the key are folded
//! through a CRC-16 (polynomial `0xA001`) to produce a 16-bit running state,
//! which then drives a byte-wise XOR and a 7-bit rotation.
//!
//! The first `header_len` bytes of a buffer pass through unencrypted. Every
//! other output byte is masked to 7 bits.

use tracing::trace;

/// Key used for indexing when the caller supplies an empty key
pub const DEFAULT_KEY: [u8; 2] = [0xFF, 0xFF];

const CRC_PRESET: u16 = 0xFFFF;
const CRC_POLYNOMIAL: u16 = 0xA001;
const OUTPUT_MASK: u32 = 0x7F;

/// Derive the initial running state from the seed byte and the key
///
/// The derivation always runs over the supplied key, even when it is empty.
pub fn seed_state(seed: u8, key: &[u8]) -> u16 {
    key.iter().fold(seed as u16 ^ CRC_PRESET, |state, &k| {
        let state = state ^ k as u16;
        if state & 1 != 0 {
            (state >> 1) ^ CRC_POLYNOMIAL
        } else {
            state >> 1
        }
    })
}

/// Rotate the low 8 bits of `data` left by `r` and keep 7 bits
fn rotate7(data: u8, r: u32) -> u8 {
    let d = data as u32;
    (((d >> (8 - r)) & OUTPUT_MASK) | ((d << r) & OUTPUT_MASK)) as u8
}

/// Decrypt a coded buffer
///
/// The last byte of `coded` is the seed. Output is one byte shorter than the
/// input; an empty input yields an empty output.
///
/// # Examples
///
/// ```
/// use uhfrs_epc::cipher;
///
/// assert_eq!(cipher::decode(&[0xFF], 0, &[0x00, 0x00]), vec![0x7F]);
/// ```
pub fn decode(key: &[u8], header_len: usize, coded: &[u8]) -> Vec<u8> {
    let Some((&seed, body)) = coded.split_last() else {
        return Vec::new();
    };

    let mut state = seed_state(seed, key);
    let key = if key.is_empty() { &DEFAULT_KEY[..] } else { key };

    let mut rnd = state as u8;
    let mut rotation = 0u32;
    let mut out = Vec::with_capacity(body.len());

    for (i, &byte) in body.iter().enumerate() {
        let mut data = rnd;
        rnd = byte;

        let key_byte = key[(state as usize ^ i) % key.len()];
        if header_len == 0 {
            rotation = (state & 7) as u32;
        }
        state ^= key_byte as u16 ^ i as u16;

        if i < header_len {
            out.push(rnd);
            rnd = data ^ state as u8;
        } else {
            data ^= rnd ^ state as u8;
            if header_len > 0 {
                rotation = (state & 7) as u32;
            }
            out.push(rotate7(data, rotation));
        }

        state = state.rotate_left(1);
    }

    trace!("Decoded {} bytes with seed 0x{:02X}", out.len(), seed);
    out
}

/// Encrypt `plain` so that [`decode`] with the same key and header length
/// returns it
///
/// Bytes past the header must be 7-bit; the high bit is discarded. The
/// returned buffer ends with `seed`, which is also where the barcode flag
/// bits live.
pub fn encode(key: &[u8], header_len: usize, plain: &[u8], seed: u8) -> Vec<u8> {
    let mut state = seed_state(seed, key);
    let key = if key.is_empty() { &DEFAULT_KEY[..] } else { key };

    let mut rnd = state as u8;
    let mut rotation = 0u32;
    let mut coded = Vec::with_capacity(plain.len() + 1);

    for (i, &byte) in plain.iter().enumerate() {
        let key_byte = key[(state as usize ^ i) % key.len()];
        if header_len == 0 {
            rotation = (state & 7) as u32;
        }
        state ^= key_byte as u16 ^ i as u16;

        if i < header_len {
            coded.push(byte);
            rnd ^= state as u8;
        } else {
            if header_len > 0 {
                rotation = (state & 7) as u32;
            }
            let c = (byte & 0x7F).rotate_right(rotation) ^ rnd ^ state as u8;
            coded.push(c);
            rnd = c;
        }

        state = state.rotate_left(1);
    }

    coded.push(seed);
    coded
}
