//! Error types for uhfrs-core

/// Result type alias for uhfrs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame is too short to be valid
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort {
        expected: usize,
        actual: usize,
    },

    /// First byte is not the head marker
    #[error("Invalid frame head: expected 0xA0, got 0x{0:02X}")]
    InvalidHead(u8),

    /// Length byte disagrees with the number of bytes present
    #[error("Frame length mismatch: header declares {declared} bytes, got {actual} bytes")]
    LengthMismatch {
        declared: usize,
        actual: usize,
    },

    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    ChecksumMismatch {
        expected: u8,
        received: u8,
    },

    /// Unknown command code
    #[error("Unknown command code: 0x{0:02X}")]
    UnknownCommand(u8),

    /// Payload too large
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Response payload does not match the layout of its command
    #[error("Malformed response to 0x{command:02X}: {reason}")]
    MalformedResponse {
        command: u8,
        reason: String,
    },
}

impl Error {
    /// Check if error is recoverable (retry might succeed)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. } | Self::LengthMismatch { .. }
        )
    }

    pub(crate) fn malformed(command: u8, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            command,
            reason: reason.into(),
        }
    }
}
