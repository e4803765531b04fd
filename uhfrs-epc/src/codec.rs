//! EPC decoders keyed by the reader's custom and application codes

use crate::barcode::{BarcodeFlags, DecodedBarcode, HeaderType};
use crate::bits::{hex_to_bytes, read_bits};
use crate::cipher;
use crate::error::Result;
use crate::format::EpcFormat;
use crate::sgtin::{self, Sgtin96};
use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;
use std::fmt::{self, Write};
use tracing::{debug, trace};

/// Default custom code seed
pub const DEFAULT_CUSTOM_CODE: &str = "0000000003171327";

/// Default application code seed
pub const DEFAULT_APPLICATION_CODE: &str = "01327A01";

/// [`DEFAULT_CUSTOM_CODE`] followed by [`DEFAULT_APPLICATION_CODE`]
const DEFAULT_KEY: [u8; 12] = [
    0x00, 0x00, 0x00, 0x00, 0x03, 0x17, 0x13, 0x27, 0x01, 0x32, 0x7A, 0x01,
];

/// Repeating XOR key for UDC payloads (`"3A5B6C7D9E"`)
const UDC_KEY: [u8; 10] = [0x33, 0x41, 0x35, 0x42, 0x36, 0x43, 0x37, 0x44, 0x39, 0x45];

/// UDC EPCs start with this byte
const UDC_MARKER: &str = "BA";

/// Hex characters of the PC word in front of an EPC
const PC_HEX_LEN: usize = 4;

/// Bits of the item name in a TITAS code (15 groups of 6)
const TITAS_ITEM_BITS: usize = 90;

/// Cipher key: custom code bytes followed by application code bytes
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey(Bytes);

impl CipherKey {
    /// Build a key from two hex seeds
    ///
    /// Odd-length seeds are left-padded with a `0` nibble.
    pub fn from_seeds(custom_code: &str, application_code: &str) -> Result<Self> {
        let mut key = hex_to_bytes(custom_code)?;
        key.extend(hex_to_bytes(application_code)?);
        Ok(Self(Bytes::from(key)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for CipherKey {
    fn default() -> Self {
        Self(Bytes::from_static(&DEFAULT_KEY))
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherKey({})", hex::encode_upper(&self.0))
    }
}

/// Item name and serial recovered from a TITAS code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TitasCode {
    pub item_name: String,
    pub serial: u128,
}

impl fmt::Display for TitasCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.item_name, self.serial)
    }
}

/// Decoder for the EPC encodings the reader supports
///
/// The key is fixed at construction.
///
/// # Examples
///
/// ```
/// use uhfrs_epc::{EpcCodec, EpcFormat};
///
/// let codec = EpcCodec::default();
/// assert_eq!(codec.to_ascii("30004142"), "AB");
/// assert_eq!(
///     codec.decode(EpcFormat::Ean, "3074257BF7194E4000001A85").as_deref(),
///     Some("80614141123458-6789")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EpcCodec {
    key: CipherKey,
}

impl EpcCodec {
    /// Create a codec from hex custom and application codes
    pub fn new(custom_code: &str, application_code: &str) -> Result<Self> {
        Ok(Self::with_key(CipherKey::from_seeds(custom_code, application_code)?))
    }

    pub fn with_key(key: CipherKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &CipherKey {
        &self.key
    }

    /// Decrypt barcode text from a PC+EPC hex string
    ///
    /// Failures yield an empty barcode.
    pub fn to_barcode(&self, epc: &str) -> DecodedBarcode {
        self.try_barcode(epc).unwrap_or_else(|| {
            debug!("No barcode in EPC {}", epc);
            DecodedBarcode::empty()
        })
    }

    fn try_barcode(&self, epc: &str) -> Option<DecodedBarcode> {
        let bytes = hex_to_bytes(epc).ok()?;

        // The PC word declares the EPC length in 16-bit words
        let mut len = bytes.len();
        if len % 2 == 0 && len > 2 {
            let declared = ((bytes[0] & 0xF8) >> 2) as usize + 2;
            len = if len < declared { 0 } else { declared };
        }

        let flags = BarcodeFlags::from_bits_retain(*bytes.get(len.checked_sub(1)?)?);

        let (header_type, header_len) = if flags.contains(BarcodeFlags::WITH_HEADER) {
            let header = bytes
                .get(2..4)
                .map(|b| HeaderType::from_code(LittleEndian::read_u16(b)))
                .unwrap_or_default();
            (header, 2)
        } else {
            (HeaderType::None, 0)
        };

        let body = bytes.get(2..len).filter(|b| !b.is_empty())?;
        let mut payload = cipher::decode(self.key.as_bytes(), header_len, body);
        if !flags.contains(BarcodeFlags::WITH_DATA) {
            payload.pop();
        }

        trace!("Barcode {:?} from {} coded bytes", flags, body.len());
        Some(DecodedBarcode::new(header_type, payload))
    }

    /// Printable ASCII characters of the EPC, skipping the PC word
    ///
    /// Hex pairs outside `32..=126` or that fail to parse are skipped.
    pub fn to_ascii(&self, epc: &str) -> String {
        (PC_HEX_LEN..epc.len())
            .step_by(2)
            .filter_map(|i| epc.get(i..(i + 2).min(epc.len())))
            .filter_map(|pair| u8::from_str_radix(pair, 16).ok())
            .filter(|b| (32..=126).contains(b))
            .map(char::from)
            .collect()
    }

    /// Decode a UDC EPC
    ///
    /// The EPC starts with `BA`. The next byte holds the character count,
    /// with bit 7 selecting ASCII mode; otherwise data is BCD. Failures yield
    /// an empty string.
    pub fn to_udc(&self, epc: &str) -> String {
        udc(epc).unwrap_or_else(|| {
            debug!("EPC {} is not UDC coded", epc);
            String::new()
        })
    }

    /// Parse an SGTIN-96 EPC (24 hex characters, no PC word)
    pub fn parse_sgtin96(&self, epc: &str) -> Result<Sgtin96> {
        sgtin::parse(epc)
    }

    /// Decode a TITAS code from a PC+EPC hex string
    ///
    /// After the PC word, 90 bits hold fifteen 6-bit item characters and the
    /// remaining bits hold the serial.
    pub fn to_titas_code(&self, epc: &str) -> Option<TitasCode> {
        let bytes = hex::decode(epc.get(PC_HEX_LEN..)?).ok()?;

        let total_bits = bytes.len() * 8;
        let serial_bits = total_bits.checked_sub(TITAS_ITEM_BITS)?;
        if serial_bits == 0 || serial_bits > 128 {
            return None;
        }

        let item_name = (0..TITAS_ITEM_BITS / 6)
            .filter_map(|group| read_bits(&bytes, group * 6, 6))
            .filter_map(|v| match v as u8 {
                v @ 0..=26 => Some(char::from(64 + v)),
                v @ 48..=57 => Some(char::from(v)),
                _ => None,
            })
            .collect();

        Some(TitasCode {
            item_name,
            serial: read_bits(&bytes, TITAS_ITEM_BITS, serial_bits)?,
        })
    }

    /// Decode SPEC2000 6-bit text
    ///
    /// Each group whose leading bit is 0 gets `1 << width` added, so `0x01`
    /// becomes `A`. The final group may be narrower than 6 bits.
    pub fn to_spec2000(&self, epc: &str) -> Option<String> {
        let bytes = hex::decode(epc).ok()?;
        let total_bits = bytes.len() * 8;

        let mut text = String::with_capacity(total_bits / 6 + 1);
        for start in (0..total_bits).step_by(6) {
            let width = (total_bits - start).min(6);
            let value = read_bits(&bytes, start, width)? as u8;
            let ch = if value >> (width - 1) == 0 {
                (1 << width) | value
            } else {
                value
            };
            text.push(char::from(ch));
        }

        Some(text)
    }

    /// Render a PC+EPC hex string in the given format
    ///
    /// [`EpcFormat::Ean`] expects the EPC without its PC word. Failed or
    /// empty decodes yield `None`.
    pub fn decode(&self, format: EpcFormat, epc: &str) -> Option<String> {
        let text = match format {
            EpcFormat::Epc => epc.to_string(),
            EpcFormat::Ascii => self.to_ascii(epc),
            EpcFormat::Udc => self.to_udc(epc),
            EpcFormat::Ean => self.parse_sgtin96(epc).ok()?.to_string(),
            EpcFormat::Titas => self.to_barcode(epc).text(),
            EpcFormat::TitasXiyuan => self.to_titas_code(epc)?.to_string(),
        };

        (!text.is_empty()).then_some(text)
    }
}

/// Words the PC length field can describe
const MAX_EPC_WORDS: usize = 31;

/// PC word plus ASCII bytes for writing `text` to the EPC bank
///
/// Text is padded with `0x00` to a whole word. Returns `None` for
/// characters outside printable ASCII or text longer than 62 characters.
///
/// # Examples
///
/// ```
/// use uhfrs_epc::codec::ascii_epc;
///
/// assert_eq!(ascii_epc("ABC"), Some(vec![0x10, 0x00, 0x41, 0x42, 0x43, 0x00]));
/// ```
pub fn ascii_epc(text: &str) -> Option<Vec<u8>> {
    if !text.bytes().all(|b| (32..=126).contains(&b)) {
        return None;
    }

    let words = text.len().div_ceil(2);
    if words > MAX_EPC_WORDS {
        return None;
    }

    let mut epc = Vec::with_capacity(2 + words * 2);
    epc.extend_from_slice(&[(words << 3) as u8, 0x00]);
    epc.extend_from_slice(text.as_bytes());
    epc.resize(2 + words * 2, 0x00);
    Some(epc)
}

fn udc(epc: &str) -> Option<String> {
    if !epc.get(..2)?.eq_ignore_ascii_case(UDC_MARKER) {
        return None;
    }

    let bytes = hex_to_bytes(epc).ok()?;
    let declared = *bytes.get(1)?;
    let ascii = declared & 0x80 != 0;
    let count = if ascii {
        (declared & 0x7F) as usize
    } else {
        (declared as usize).div_ceil(2)
    };

    let data = bytes.get(2..2 + count)?;
    let mut text = String::with_capacity(count * 2);
    for (i, &b) in data.iter().enumerate() {
        let x = b ^ UDC_KEY[i % UDC_KEY.len()];
        if ascii {
            if x < 0x10 || !x.is_ascii() {
                return None;
            }
            text.push(char::from(x));
        } else {
            write!(text, "{:02x}", x).ok()?;
        }
    }

    Some(text.chars().take(declared as usize).collect())
}
