//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Already connected")]
    AlreadyConnected,

    #[error("Connection timeout")]
    ConnectionTimeout,

    #[error("Read timeout")]
    ReadTimeout,

    #[error("Connection closed by remote")]
    ConnectionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Serial port error: {0}")]
    Serial(String),
}

impl Error {
    /// A read timeout leaves the link usable
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::ReadTimeout)
    }

    /// Check if the link must be reopened
    pub fn requires_reconnect(&self) -> bool {
        matches!(
            self,
            Error::NotConnected | Error::ConnectionClosed | Error::Io(_) | Error::Serial(_)
        )
    }
}

impl From<tokio_serial::Error> for Error {
    fn from(e: tokio_serial::Error) -> Self {
        Error::Serial(e.to_string())
    }
}
