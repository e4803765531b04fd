//! # uhfrs-epc
//!
//! Decoders for the EPC encodings found on UHF tags.
//!
//! - Keyed stream cipher for barcode payloads
//! - Barcode text with header categories
//! - ASCII, UDC, SGTIN-96, TITAS and SPEC2000 renderings
//! - [`EpcFormat`] dispatch for display

pub mod barcode;
pub mod bits;
pub mod cipher;
pub mod codec;
pub mod error;
pub mod format;
pub mod sgtin;

pub use barcode::{BarcodeFlags, DecodedBarcode, HeaderType};
pub use codec::{ascii_epc, CipherKey, EpcCodec, TitasCode, DEFAULT_APPLICATION_CODE, DEFAULT_CUSTOM_CODE};
pub use error::{Error, Result};
pub use format::EpcFormat;
pub use sgtin::Sgtin96;
