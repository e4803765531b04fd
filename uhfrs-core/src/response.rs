//! Reader reply classification
//!
//! Turns a [`DecodedMessage`] into a typed reply. Layouts of the tag
//! carrying replies:
//!
//! ```text
//! inventory tag:   FreqAnt | PC(2) EPC(n) | RSSI
//! inventory total: AntId | ReadRate(2, BE) | TagCount(4, BE)
//! read tag:        TagCount(2) | DataLen | PC(2) EPC(n) CRC(2) Data(m) | ReadLen | AntId | ReadCount
//! write tag:       TagCount(2) | DataLen | PC(2) EPC(n) CRC(2) | ErrCode | AntId | WriteCount
//! ```
//!
//! The high bit of the last byte selects antennas 5..8 on eight-port
//! readers.

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::{
    command::Command,
    error::{Error, Result},
    frame::DecodedMessage,
    status::ReturnCode,
};

/// Offset between the raw RSSI byte and dBm
const RSSI_OFFSET: i16 = 129;

/// Typed reader reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The frame failed its checksum
    ChecksumFailure,

    /// Single status byte acknowledging `command`
    Status { command: u8, code: ReturnCode },

    Firmware { major: u8, minor: u8 },

    /// Zero based working antenna
    WorkingAntenna(u8),

    /// One value for all antennas or one per antenna, in dBm
    OutputPower(Bytes),

    ReaderIdentifier(Bytes),

    InventoryTag(InventoryTag),

    InventoryTotal(InventoryTotal),

    ReadTag(TagAccess),

    WriteTag(TagAccess),

    /// Anything not modelled above
    Other(DecodedMessage),
}

/// One tag seen during an inventory round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryTag {
    /// One based antenna number
    pub antenna: u8,

    /// Protocol control word followed by the EPC
    pub pc_epc: Bytes,

    /// Received signal strength in dBm
    pub rssi: i16,
}

/// Summary closing an inventory round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryTotal {
    pub antenna: u8,
    pub read_rate: u16,
    pub tag_count: u32,
}

/// Result of a read or write on one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAccess {
    pub tag_count: u16,

    /// Protocol control word followed by the EPC
    pub pc_epc: Bytes,

    /// Memory read from the tag (empty for writes)
    pub data: Bytes,

    /// Per-tag status (writes only)
    pub status: Option<ReturnCode>,

    /// One based antenna number
    pub antenna: u8,

    /// How many times the operation hit this tag
    pub count: u8,
}

impl InventoryTag {
    /// Upper-case hex of PC + EPC, as handed to the EPC decoders
    pub fn pc_epc_hex(&self) -> String {
        hex::encode_upper(&self.pc_epc)
    }

    /// Upper-case hex of the EPC without its PC word
    pub fn epc_hex(&self) -> String {
        hex::encode_upper(self.pc_epc.get(2..).unwrap_or_default())
    }
}

impl TagAccess {
    pub fn pc_epc_hex(&self) -> String {
        hex::encode_upper(&self.pc_epc)
    }

    pub fn epc_hex(&self) -> String {
        hex::encode_upper(self.pc_epc.get(2..).unwrap_or_default())
    }
}

impl Response {
    /// Classify a decoded message
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] when a known reply is too
    /// short for its layout.
    pub fn parse(message: &DecodedMessage) -> Result<Self> {
        if message.is_checksum_failure() {
            return Ok(Self::ChecksumFailure);
        }

        let Ok(command) = message.command() else {
            return Ok(Self::Other(message.clone()));
        };

        let payload = &message.payload;
        let code = message.command;

        match command {
            Command::GetFirmwareVersion => match payload.len() {
                2 => Ok(Self::Firmware {
                    major: payload[0],
                    minor: payload[1],
                }),
                1 => Ok(Self::status(code, payload[0])),
                _ => Err(Error::malformed(code, format!("firmware reply of {} bytes", payload.len()))),
            },
            Command::GetWorkingAntenna if payload.len() == 1 => Ok(Self::WorkingAntenna(payload[0])),
            Command::GetOutputPower if !payload.is_empty() => Ok(Self::OutputPower(payload.clone())),
            Command::GetReaderIdentifier if payload.len() > 1 => {
                Ok(Self::ReaderIdentifier(payload.clone()))
            }
            Command::RealtimeInventory | Command::CustomizedSessionTargetInventory => {
                match payload.len() {
                    1 => Ok(Self::status(code, payload[0])),
                    7 => Ok(Self::InventoryTotal(InventoryTotal {
                        antenna: payload[0],
                        read_rate: BigEndian::read_u16(&payload[1..3]),
                        tag_count: BigEndian::read_u32(&payload[3..7]),
                    })),
                    _ => parse_inventory_tag(code, payload).map(Self::InventoryTag),
                }
            }
            Command::ReadTag => match payload.len() {
                1 => Ok(Self::status(code, payload[0])),
                _ => parse_tag_access(code, payload, true).map(Self::ReadTag),
            },
            Command::WriteTag => match payload.len() {
                1 => Ok(Self::status(code, payload[0])),
                _ => parse_tag_access(code, payload, false).map(Self::WriteTag),
            },
            _ if payload.len() == 1 => Ok(Self::status(code, payload[0])),
            _ => Ok(Self::Other(message.clone())),
        }
    }

    fn status(command: u8, raw: u8) -> Self {
        Self::Status {
            command,
            code: ReturnCode::from(raw),
        }
    }
}

fn antenna(port: u8, flags: u8) -> u8 {
    let base = if flags & 0x80 == 0 { 1 } else { 5 };
    (port & 0x03) + base
}

fn parse_inventory_tag(command: u8, payload: &Bytes) -> Result<InventoryTag> {
    let len = payload.len();
    if len < 4 {
        return Err(Error::malformed(command, format!("inventory tag of {} bytes", len)));
    }

    let rssi_raw = payload[len - 1];

    Ok(InventoryTag {
        antenna: antenna(payload[0], rssi_raw),
        pc_epc: payload.slice(1..len - 1),
        rssi: (rssi_raw & 0x7F) as i16 - RSSI_OFFSET,
    })
}

fn parse_tag_access(command: u8, payload: &Bytes, with_data: bool) -> Result<TagAccess> {
    let len = payload.len();
    if len < 8 {
        return Err(Error::malformed(command, format!("tag access reply of {} bytes", len)));
    }

    let data_len = payload[2] as usize;
    let read_len = if with_data { payload[len - 3] as usize } else { 0 };
    let epc_len = data_len
        .checked_sub(read_len + 4)
        .ok_or_else(|| Error::malformed(command, "data length shorter than PC and CRC"))?;

    let epc_end = 5 + epc_len;
    let data_start = epc_end + 2;
    let data_end = data_start + read_len;
    if data_end > len - 3 {
        return Err(Error::malformed(
            command,
            format!("declared {} bytes of tag data, reply has {}", data_len, len - 6),
        ));
    }

    let flags = payload[len - 1];

    Ok(TagAccess {
        tag_count: BigEndian::read_u16(&payload[0..2]),
        pc_epc: payload.slice(3..epc_end),
        data: payload.slice(data_start..data_end),
        status: (!with_data).then(|| ReturnCode::from(payload[len - 3])),
        antenna: antenna(payload[len - 2], flags),
        count: flags & 0x7F,
    })
}
