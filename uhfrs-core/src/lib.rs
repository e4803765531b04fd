//! # uhfrs-core
//!
//! Core protocol implementation for UHF RFID readers.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - Checksum calculation
//! - Command definitions and request builders
//! - Reassembly of frames split across reads
//! - Reply classification and status codes

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod reassembler;
pub mod request;
pub mod response;
pub mod status;

pub use command::Command;
pub use error::{Error, Result};
pub use frame::{CommandEncoder, DecodedMessage, Frame};
pub use reassembler::FrameReassembler;
pub use response::{InventoryTag, InventoryTotal, Response, TagAccess};
pub use status::ReturnCode;

/// Protocol version information
pub const PROTOCOL_VERSION: &str = "1.0";

/// Maximum frame size on the wire
pub const MAX_FRAME_SIZE: usize = 0xFF + 2;
