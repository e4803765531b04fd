//! High-level error types

use uhfrs_core::ReturnCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] uhfrs_core::Error),

    #[error("EPC error: {0}")]
    Epc(#[from] uhfrs_epc::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] uhfrs_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] uhfrs_types::Error),

    #[error("Reader not connected")]
    NotConnected,

    #[error("No reply from reader within {0:?}")]
    Timeout(std::time::Duration),

    #[error("Reader reported: {0}")]
    Device(ReturnCode),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response from reader: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The session can continue after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Timeout(_) | Error::Device(_) | Error::InvalidResponse(_) => true,
            Error::Core(e) => e.is_recoverable(),
            Error::Transport(e) => !e.requires_reconnect(),
            _ => false,
        }
    }

    /// The transport must be reopened before the next command
    pub fn requires_reconnect(&self) -> bool {
        match self {
            Error::NotConnected => true,
            Error::Transport(e) => e.requires_reconnect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let timeout = Error::Timeout(std::time::Duration::from_secs(1));
        assert!(timeout.is_recoverable());
        assert!(!timeout.requires_reconnect());

        let device = Error::Device(ReturnCode::from(0x11));
        assert!(device.is_recoverable());

        let closed = Error::from(uhfrs_transport::Error::ConnectionClosed);
        assert!(closed.requires_reconnect());
        assert!(!closed.is_recoverable());

        assert!(Error::NotConnected.requires_reconnect());
        assert!(!Error::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_device_message() {
        let err = Error::Device(ReturnCode::from(0x10));
        assert!(err.to_string().starts_with("Reader reported: "));
    }
}
