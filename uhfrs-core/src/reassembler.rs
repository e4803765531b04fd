//! Frame reassembly for the inbound byte stream
//!
//! The transport hands over whatever the last read returned: half a frame,
//! several frames, or nothing. The reassembler keeps the unfinished tail of
//! one read and prepends it to the next, so the messages it emits do not
//! depend on where the stream was cut.
//!
//! One reassembler belongs to one connection and must be fed by a single
//! owner; it holds no lock.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::{checksum, constants::HEAD, frame::DecodedMessage, frame::Frame};

/// Stateful byte-stream to message transform
///
/// # Examples
///
/// ```
/// use uhfrs_core::FrameReassembler;
///
/// let mut reassembler = FrameReassembler::new();
///
/// // First read ends in the middle of a frame
/// assert!(reassembler.feed(&[0xA0, 0x04, 0x01, 0x74]).is_empty());
/// assert_eq!(reassembler.pending(), &[0xA0, 0x04, 0x01, 0x74]);
///
/// // Second read completes it
/// let messages = reassembler.feed(&[0x10, 0xD7]);
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].command, 0x74);
/// assert_eq!(&messages[0].payload[..], &[0x10]);
/// ```
#[derive(Debug, Default)]
pub struct FrameReassembler {
    pending: BytesMut,
}

impl FrameReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of an incomplete trailing frame carried to the next feed
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Drop any carried bytes (used when the connection is re-established)
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Feed one chunk from the transport and collect every finished frame
    ///
    /// Frames are returned in stream order. A frame whose checksum fails
    /// is reported as [`DecodedMessage::checksum_failure`]. Bytes in front
    /// of a head marker that never form a frame are dropped.
    pub fn feed(&mut self, data: &[u8]) -> Vec<DecodedMessage> {
        self.pending.extend_from_slice(data);
        let buf = std::mem::take(&mut self.pending).freeze();

        trace!(
            len = buf.len(),
            "Reassembling {:02X?}",
            &buf[..buf.len().min(32)]
        );

        let (frames, cut) = scan(&buf);

        if let Some(start) = cut {
            self.pending.extend_from_slice(&buf[start..]);
            trace!(pending = self.pending.len(), "Holding incomplete frame");
        }

        if frames.is_empty() && cut.is_none() {
            return fallback(&buf).into_iter().collect();
        }

        frames
            .into_iter()
            .map(|(start, end)| to_message(buf.slice(start..end)))
            .collect()
    }
}

/// Walk the buffer from head marker to head marker
///
/// Returns the `(start, end)` bounds of every complete frame and, if the
/// walk ran past the end of the buffer, the index of the unfinished
/// frame's head marker.
fn scan(buf: &[u8]) -> (Vec<(usize, usize)>, Option<usize>) {
    let mut frames = Vec::new();
    let mut i = 0;

    while i < buf.len() {
        if buf[i] != HEAD {
            i += 1;
            continue;
        }

        let Some(&length) = buf.get(i + 1) else {
            return (frames, Some(i));
        };

        let end = i + length as usize + 2;
        if end > buf.len() {
            return (frames, Some(i));
        }

        frames.push((i, end));
        i = end;
    }

    (frames, None)
}

fn to_message(chunk: Bytes) -> DecodedMessage {
    if chunk.len() < Frame::OVERHEAD || !checksum::verify(&chunk) {
        debug!(
            len = chunk.len(),
            "Checksum mismatch, dropping frame {:02X?}",
            &chunk[..chunk.len().min(32)]
        );
        return DecodedMessage::checksum_failure();
    }

    DecodedMessage {
        command: chunk[3],
        payload: chunk.slice(4..chunk.len() - 1),
    }
}

/// A read without any head marker is tried as one headless frame
///
/// Only a chunk long enough to be a frame whose checksum holds produces a
/// message; anything else is stray bytes and is discarded.
fn fallback(buf: &Bytes) -> Option<DecodedMessage> {
    if buf.is_empty() {
        return None;
    }

    if buf.len() >= Frame::OVERHEAD && checksum::verify(buf) {
        debug!(len = buf.len(), "Accepted frame without head marker");
        return Some(DecodedMessage {
            command: buf[3],
            payload: buf.slice(4..buf.len() - 1),
        });
    }

    debug!(len = buf.len(), "Dropping {} stray bytes", buf.len());
    None
}
