//! Reader frame structure and encoding/decoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    command::Command,
    constants::{DEFAULT_ADDRESS, HEAD},
    error::{Error, Result},
};

/// Reader protocol frame
///
/// # Frame Structure
///
/// ```text
/// ┌────────┬────────┬─────────┬─────────┬───────────┬──────────┐
/// │  Head  │ Length │ Address │ Command │  Payload  │ Checksum │
/// │  0xA0  │ N + 3  │ 1 byte  │ 1 byte  │  N bytes  │  1 byte  │
/// └────────┴────────┴─────────┴─────────┴───────────┴──────────┘
/// ```
///
/// The length byte counts address, command, payload and checksum, so a
/// complete frame on the wire is `length + 2` bytes long.
///
/// # Examples
///
/// ```
/// use uhfrs_core::{Command, Frame};
///
/// let frame = Frame::new(0x01, Command::Reset);
/// let encoded = frame.encode();
/// assert_eq!(&encoded[..], &[0xA0, 0x03, 0x01, 0x70, 0xEC]);
///
/// let decoded = Frame::decode(&encoded).unwrap();
/// assert_eq!(decoded, frame);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Reader address
    pub address: u8,

    /// Command code
    pub command: u8,

    /// Command-specific data
    pub payload: Bytes,
}

impl Frame {
    /// Head, length, address, command and checksum
    pub const OVERHEAD: usize = 5;

    /// Largest payload the reader accepts
    pub const MAX_PAYLOAD_SIZE: usize = 249;

    /// Create a frame with empty payload
    pub fn new(address: u8, command: impl Into<u8>) -> Self {
        Self {
            address,
            command: command.into(),
            payload: Bytes::new(),
        }
    }

    /// Create a frame with payload
    pub fn with_payload(address: u8, command: impl Into<u8>, payload: impl Into<Bytes>) -> Self {
        Self {
            address,
            command: command.into(),
            payload: payload.into(),
        }
    }

    /// Value of the length byte: payload length + 3
    pub fn length_byte(&self) -> u8 {
        (self.payload.len() + 3) as u8
    }

    /// Encode frame to bytes, appending the checksum
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::OVERHEAD + self.payload.len());

        buf.put_u8(HEAD);
        buf.put_u8(self.length_byte());
        buf.put_u8(self.address);
        buf.put_u8(self.command);
        buf.put_slice(&self.payload);

        let checksum = checksum::calculate(&buf);
        buf.put_u8(checksum);

        buf
    }

    /// Decode exactly one complete frame
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Buffer is shorter than the 5-byte minimum
    /// - First byte is not the head marker
    /// - Length byte disagrees with the buffer length
    /// - Checksum verification fails
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::OVERHEAD {
            return Err(Error::FrameTooShort {
                expected: Self::OVERHEAD,
                actual: buf.len(),
            });
        }

        if buf[0] != HEAD {
            return Err(Error::InvalidHead(buf[0]));
        }

        let declared = buf[1] as usize + 2;
        if declared != buf.len() {
            return Err(Error::LengthMismatch {
                declared,
                actual: buf.len(),
            });
        }

        let (body, tail) = buf.split_at(buf.len() - 1);
        let received = tail[0];
        let expected = checksum::calculate(body);
        if expected != received {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        Ok(Self {
            address: buf[2],
            command: buf[3],
            payload: Bytes::copy_from_slice(&body[4..]),
        })
    }

    /// Typed command, if the code is known
    pub fn command(&self) -> Result<Command> {
        Command::try_from(self.command)
    }

    /// Get total frame size on the wire
    pub fn size(&self) -> usize {
        Self::OVERHEAD + self.payload.len()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("address", &format!("0x{:02X}", self.address))
            .field("command", &format!("0x{:02X}", self.command))
            .field("payload", &hex::encode_upper(&self.payload))
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.command() {
            Ok(cmd) => write!(f, "Frame[{}](addr={}, len={})", cmd, self.address, self.payload.len()),
            Err(_) => write!(
                f,
                "Frame[0x{:02X}](addr={}, len={})",
                self.command,
                self.address,
                self.payload.len()
            ),
        }
    }
}

/// Builds outbound command frames for one reader address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEncoder {
    address: u8,
}

impl CommandEncoder {
    pub fn new(address: u8) -> Self {
        Self { address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// `[0xA0, 0x03, address, cmd, checksum]`
    ///
    /// # Examples
    ///
    /// ```
    /// use uhfrs_core::CommandEncoder;
    ///
    /// let bytes = CommandEncoder::new(0x01).build_simple(0x70);
    /// assert_eq!(&bytes[..], &[0xA0, 0x03, 0x01, 0x70, 0xEC]);
    /// ```
    pub fn build_simple(&self, command: impl Into<u8>) -> BytesMut {
        Frame::new(self.address, command).encode()
    }

    /// `[0xA0, len + 3, address, cmd, ...payload, checksum]`
    ///
    /// The caller keeps `payload` within [`Frame::MAX_PAYLOAD_SIZE`].
    pub fn build_with_payload(&self, command: impl Into<u8>, payload: &[u8]) -> BytesMut {
        debug_assert!(payload.len() <= Frame::MAX_PAYLOAD_SIZE);
        Frame::with_payload(self.address, command, Bytes::copy_from_slice(payload)).encode()
    }
}

impl Default for CommandEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

/// Inbound message produced by the frame reassembler
///
/// `{command: 0, payload: []}` marks a frame whose checksum did not match.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub command: u8,
    pub payload: Bytes,
}

impl DecodedMessage {
    pub fn new(command: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            command,
            payload: payload.into(),
        }
    }

    /// Sentinel emitted for a frame that failed its checksum
    pub fn checksum_failure() -> Self {
        Self {
            command: 0,
            payload: Bytes::new(),
        }
    }

    pub fn is_checksum_failure(&self) -> bool {
        self.command == 0 && self.payload.is_empty()
    }

    /// Typed command, if the code is known
    pub fn command(&self) -> Result<Command> {
        Command::try_from(self.command)
    }
}

impl fmt::Debug for DecodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedMessage")
            .field("command", &format!("0x{:02X}", self.command))
            .field("payload", &hex::encode_upper(&self.payload))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_simple_reset() {
        let encoder = CommandEncoder::new(0x01);
        assert_eq!(&encoder.build_simple(0x70)[..], &[0xA0, 0x03, 0x01, 0x70, 0xEC]);
        assert_eq!(&encoder.build_simple(Command::Reset)[..], &[0xA0, 0x03, 0x01, 0x70, 0xEC]);
    }

    #[test]
    fn test_build_with_payload() {
        let encoder = CommandEncoder::new(0x01);
        let bytes = encoder.build_with_payload(Command::SetWorkingAntenna, &[0x02]);

        assert_eq!(bytes.len(), 6);
        assert_eq!(bytes[0], HEAD);
        assert_eq!(bytes[1], 0x04);
        assert_eq!(bytes[2], 0x01);
        assert_eq!(bytes[3], 0x74);
        assert_eq!(bytes[4], 0x02);
        assert!(checksum::verify(&bytes));
    }

    #[test]
    fn test_build_with_empty_payload_matches_simple() {
        let encoder = CommandEncoder::default();
        assert_eq!(
            encoder.build_with_payload(0x72, &[]),
            encoder.build_simple(0x72)
        );
    }

    #[test]
    fn test_frame_encode_decode() {
        let original = Frame::with_payload(0x05, Command::ReadTag, vec![0x01, 0x00, 0x06]);

        let encoded = original.encode();
        let decoded = Frame::decode(&encoded).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.size(), encoded.len());
    }

    #[test]
    fn test_frame_checksum_verification() {
        let mut encoded = Frame::new(0x01, Command::GetFirmwareVersion).encode();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let result = Frame::decode(&encoded);
        if let Err(Error::ChecksumMismatch { expected, received }) = result {
            assert_ne!(expected, received);
        } else {
            panic!("Expected ChecksumMismatch error");
        }
    }

    #[test]
    fn test_frame_too_short() {
        let result = Frame::decode(&[0xA0, 0x03, 0x01]);
        assert!(matches!(result, Err(Error::FrameTooShort { .. })));
    }

    #[test]
    fn test_frame_invalid_head() {
        let result = Frame::decode(&[0xA1, 0x03, 0x01, 0x70, 0xEB]);
        assert!(matches!(result, Err(Error::InvalidHead(0xA1))));
    }

    #[test]
    fn test_frame_length_mismatch() {
        let mut encoded = Frame::new(0x01, Command::Reset).encode().to_vec();
        encoded.push(0x00);

        let result = Frame::decode(&encoded);
        assert!(matches!(
            result,
            Err(Error::LengthMismatch { declared: 5, actual: 6 })
        ));
    }

    #[test]
    fn test_sentinel() {
        let sentinel = DecodedMessage::checksum_failure();
        assert!(sentinel.is_checksum_failure());
        assert!(!DecodedMessage::new(0x72, vec![0x01]).is_checksum_failure());
    }
}
