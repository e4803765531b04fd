//! Transport layer for UHF readers
//!
//! Provides TCP and serial (RS-232) links. Transports move raw bytes only;
//! frame boundaries are recovered by `uhfrs_core::FrameReassembler`.

pub mod error;
pub mod serial;
pub mod tcp;

pub use error::{Error, Result};
pub use serial::SerialTransport;
pub use tcp::TcpTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;
use tracing::trace;

/// Read buffer size for a single receive
pub const READ_BUFFER_SIZE: usize = 4096;

/// Byte link to a reader
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the link
    async fn connect(&mut self) -> Result<()>;

    /// Close the link
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Write all bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Wait up to `wait` for the next chunk of bytes
    ///
    /// A chunk may hold a partial frame or several frames.
    async fn receive(&mut self, wait: Duration) -> Result<Bytes>;

    /// Human-readable peer (`host:port` or device path)
    fn peer(&self) -> String;
}

/// Read one chunk from `stream`, failing on timeout or end of stream
pub(crate) async fn read_chunk<S>(stream: &mut S, wait: Duration) -> Result<Bytes>
where
    S: AsyncRead + Unpin + ?Sized,
{
    let mut buf = BytesMut::with_capacity(READ_BUFFER_SIZE);

    let n = timeout(wait, stream.read_buf(&mut buf))
        .await
        .map_err(|_| Error::ReadTimeout)??;

    if n == 0 {
        return Err(Error::ConnectionClosed);
    }

    trace!("Received {} bytes: {:02X?}", n, &buf[..n.min(16)]);

    Ok(buf.freeze())
}
