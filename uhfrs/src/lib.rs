//! # uhfrs
//!
//! Rust implementation of the UHF RFID reader serial protocol.
//!
//! ## Features
//!
//! - Frame encoding and stream reassembly with checksum verification
//! - Async/await API using Tokio, over TCP or RS-232
//! - EPC decoding: encrypted barcodes, ASCII, UDC, SGTIN-96 and TITAS codes
//!
//! ## Quick Start
//!
//! ```no_run
//! use uhfrs::{EpcFormat, Reader, ReaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> uhfrs::Result<()> {
//!     let config = ReaderConfig::tcp("192.168.0.178", 4001).with_epc_format(EpcFormat::Ascii);
//!     let mut reader = Reader::new(config)?;
//!     reader.connect().await?;
//!
//!     for tag in reader.inventory(1).await? {
//!         println!("{}", tag);
//!     }
//!
//!     reader.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod reader;

// Re-exports
pub use config::{Connection, ReaderConfig};
pub use error::{Error, Result};
pub use reader::Reader;

// Re-export types
pub use uhfrs_core::{Command, CommandEncoder, DecodedMessage, FrameReassembler, Response, ReturnCode};
pub use uhfrs_epc::{DecodedBarcode, EpcCodec, EpcFormat};
pub use uhfrs_types::{ReaderInfo, TagRecord, TagTable};
