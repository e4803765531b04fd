//! High-level reader interface

use std::collections::VecDeque;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use uhfrs_core::constants::{FrequencyRegion, MemoryBank};
use uhfrs_core::{
    Command, CommandEncoder, DecodedMessage, Frame, FrameReassembler, InventoryTag, Response,
    TagAccess,
};
use uhfrs_epc::{EpcCodec, EpcFormat, ascii_epc};
use uhfrs_transport::Transport;
use uhfrs_types::{ReaderInfo, TagRecord};

use crate::config::ReaderConfig;
use crate::error::{Error, Result};

/// Access password of a factory-fresh tag
pub const DEFAULT_PASSWORD: [u8; 4] = [0x00; 4];

/// Offset of the command byte in an encoded frame
const COMMAND_OFFSET: usize = 3;

/// Password, bank, word address and word count in front of WriteTag data
const WRITE_TAG_HEADER_LEN: usize = 7;

/// UHF RFID reader
///
/// Owns one transport, one frame reassembler and one EPC codec. Replies are
/// matched to requests by command code; frames that fail their checksum are
/// skipped.
///
/// # Examples
///
/// ```no_run
/// use uhfrs::{Reader, ReaderConfig};
///
/// #[tokio::main]
/// async fn main() -> uhfrs::Result<()> {
///     let mut reader = Reader::new(ReaderConfig::tcp("192.168.0.178", 4001))?;
///
///     reader.connect().await?;
///     println!("{}", reader.reader_info().await?);
///
///     for tag in reader.inventory(1).await? {
///         println!("{}", tag);
///     }
///
///     reader.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Reader {
    transport: Box<dyn Transport>,
    encoder: CommandEncoder,
    reassembler: FrameReassembler,
    backlog: VecDeque<DecodedMessage>,
    codec: EpcCodec,
    epc_format: EpcFormat,
    timeout: Duration,
}

impl Reader {
    /// Create a reader on the transport described by `config`
    pub fn new(config: ReaderConfig) -> Result<Self> {
        let transport = config.connection.transport();
        Self::with_transport(transport, config)
    }

    /// Create a reader on a caller-supplied transport
    pub fn with_transport(transport: Box<dyn Transport>, config: ReaderConfig) -> Result<Self> {
        Ok(Self {
            transport,
            encoder: CommandEncoder::new(config.address),
            reassembler: FrameReassembler::new(),
            backlog: VecDeque::new(),
            codec: config.codec()?,
            epc_format: config.epc_format,
            timeout: config.timeout,
        })
    }

    pub fn encoder(&self) -> &CommandEncoder {
        &self.encoder
    }

    pub fn codec(&self) -> &EpcCodec {
        &self.codec
    }

    pub fn epc_format(&self) -> EpcFormat {
        self.epc_format
    }

    pub fn set_epc_format(&mut self, format: EpcFormat) {
        self.epc_format = format;
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Open the transport and start from an empty reassembly buffer
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting to {}...", self.transport.peer());

        self.transport.connect().await?;
        self.reassembler = FrameReassembler::new();
        self.backlog.clear();

        info!("Connected to {}", self.transport.peer());
        Ok(())
    }

    /// Close the transport
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        info!("Disconnecting from {}...", self.transport.peer());
        self.transport.disconnect().await?;
        info!("Disconnected");

        Ok(())
    }

    /// Write an encoded frame
    pub async fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.ensure_connected()?;

        trace!("Sending: {:02X?}", frame);
        self.transport.send(frame).await?;

        Ok(())
    }

    /// Read one chunk and return every message it completes
    ///
    /// Messages left over from an earlier exchange are returned first,
    /// without reading.
    pub async fn poll(&mut self) -> Result<Vec<DecodedMessage>> {
        self.ensure_connected()?;

        if !self.backlog.is_empty() {
            return Ok(self.backlog.drain(..).collect());
        }

        let chunk = self.receive(self.timeout).await?;
        Ok(self.reassembler.feed(&chunk))
    }

    /// Send `frame` and wait for the reply to the same command
    ///
    /// Replies to other commands are dropped.
    pub async fn execute(&mut self, frame: &[u8]) -> Result<DecodedMessage> {
        let command = *frame
            .get(COMMAND_OFFSET)
            .ok_or_else(|| Error::InvalidRequest(format!("frame of {} bytes", frame.len())))?;

        self.send(frame).await?;

        let deadline = Instant::now() + self.timeout;
        loop {
            let message = self.next_message(deadline).await?;
            if message.is_checksum_failure() {
                debug!("Skipping frame with bad checksum");
                continue;
            }
            if message.command == command {
                return Ok(message);
            }
            debug!(
                "Ignoring reply to 0x{:02X} while waiting for 0x{:02X}",
                message.command, command
            );
        }
    }

    /// Restart the reader
    ///
    /// The reader does not answer a reset, so no reply is awaited.
    pub async fn reset(&mut self) -> Result<()> {
        warn!("Resetting reader...");

        let frame = self.encoder.reset();
        self.send(&frame).await?;
        self.reassembler.reset();
        self.backlog.clear();

        Ok(())
    }

    /// Firmware version as `(major, minor)`
    pub async fn firmware_version(&mut self) -> Result<(u8, u8)> {
        let frame = self.encoder.get_firmware_version();
        match self.request(&frame).await? {
            Response::Firmware { major, minor } => Ok((major, minor)),
            Response::Status { code, .. } => Err(Error::Device(code)),
            other => Err(unexpected(other)),
        }
    }

    pub async fn reader_identifier(&mut self) -> Result<Bytes> {
        let frame = self.encoder.get_reader_identifier();
        match self.request(&frame).await? {
            Response::ReaderIdentifier(id) => Ok(id),
            Response::Status { code, .. } => Err(Error::Device(code)),
            other => Err(unexpected(other)),
        }
    }

    pub async fn set_reader_identifier(&mut self, identifier: &[u8]) -> Result<()> {
        let frame = self.encoder.set_reader_identifier(identifier);
        self.expect_success(&frame).await
    }

    /// Firmware version plus identifier, when the reader has one
    pub async fn reader_info(&mut self) -> Result<ReaderInfo> {
        let (major, minor) = self.firmware_version().await?;
        let info = ReaderInfo::new(self.encoder.address(), major, minor);

        match self.reader_identifier().await {
            Ok(id) => Ok(info.with_identifier(&id)),
            Err(Error::Device(code)) => {
                debug!("Reader has no identifier: {}", code);
                Ok(info)
            }
            Err(e) => Err(e),
        }
    }

    /// Zero based working antenna
    pub async fn working_antenna(&mut self) -> Result<u8> {
        let frame = self.encoder.get_working_antenna();
        match self.request(&frame).await? {
            Response::WorkingAntenna(antenna) => Ok(antenna),
            other => Err(unexpected(other)),
        }
    }

    /// Select the working antenna (zero based)
    pub async fn set_working_antenna(&mut self, antenna: u8) -> Result<()> {
        let frame = self.encoder.set_working_antenna(antenna);
        self.expect_success(&frame).await
    }

    /// Output power in dBm, one value or one per antenna
    pub async fn output_power(&mut self) -> Result<Bytes> {
        let frame = self.encoder.get_output_power();
        match self.request(&frame).await? {
            Response::OutputPower(power) => Ok(power),
            Response::Status { code, .. } => Err(Error::Device(code)),
            other => Err(unexpected(other)),
        }
    }

    /// Set output power, saved to flash
    pub async fn set_output_power(&mut self, power: &[u8]) -> Result<()> {
        let frame = self.encoder.set_output_power(power);
        self.expect_success(&frame).await
    }

    /// Set output power until the next reset
    pub async fn set_temporary_output_power(&mut self, power: u8) -> Result<()> {
        let frame = self.encoder.set_temporary_output_power(power);
        self.expect_success(&frame).await
    }

    pub async fn set_frequency_region(
        &mut self,
        region: FrequencyRegion,
        start: u8,
        end: u8,
    ) -> Result<()> {
        let frame = self.encoder.set_frequency_region(region, start, end);
        self.expect_success(&frame).await
    }

    pub async fn reset_inventory_buffer(&mut self) -> Result<()> {
        let frame = self.encoder.reset_inventory_buffer();
        self.expect_success(&frame).await
    }

    /// Run a real-time inventory and collect every tag until the round total
    ///
    /// The timeout applies between replies, not to the whole round.
    pub async fn inventory(&mut self, repeat: u8) -> Result<Vec<TagRecord>> {
        let command = u8::from(Command::RealtimeInventory);
        let frame = self.encoder.realtime_inventory(repeat);
        self.send(&frame).await?;

        let mut tags = Vec::new();
        loop {
            let message = self.next_message(Instant::now() + self.timeout).await?;
            if message.command != command {
                debug!("Skipping 0x{:02X} during inventory", message.command);
                continue;
            }

            match Response::parse(&message) {
                Ok(Response::InventoryTag(tag)) => tags.push(self.tag_record(&tag)?),
                Ok(Response::InventoryTotal(total)) => {
                    debug!(
                        "Inventory round done: {} reads at {} tags/s on antenna {}",
                        total.tag_count,
                        total.read_rate,
                        total.antenna + 1
                    );
                    return Ok(tags);
                }
                Ok(Response::Status { code, .. }) => return Err(Error::Device(code)),
                Ok(other) => return Err(unexpected(other)),
                Err(e) => warn!("Dropping inventory reply: {}", e),
            }
        }
    }

    /// Read `word_count` words from `bank` of every tag in the field
    pub async fn read_tag(
        &mut self,
        bank: MemoryBank,
        word_address: u8,
        word_count: u8,
    ) -> Result<Vec<TagAccess>> {
        let frame = self.encoder.read_tag(bank, word_address, word_count);
        self.collect_access(&frame, Command::ReadTag).await
    }

    /// Write whole words of `data` to `bank` starting at `word_address`
    pub async fn write_tag(
        &mut self,
        password: &[u8; 4],
        bank: MemoryBank,
        word_address: u8,
        data: &[u8],
    ) -> Result<Vec<TagAccess>> {
        if data.len() % 2 != 0 {
            return Err(Error::InvalidRequest(format!(
                "{} bytes is not a whole number of words",
                data.len()
            )));
        }

        let size = data.len() + WRITE_TAG_HEADER_LEN;
        if size > Frame::MAX_PAYLOAD_SIZE {
            return Err(uhfrs_core::Error::PayloadTooLarge {
                size,
                max: Frame::MAX_PAYLOAD_SIZE,
            }
            .into());
        }

        let word_count = (data.len() / 2) as u8;
        let frame = self
            .encoder
            .write_tag(password, bank, word_address, word_count, data);
        let written = self.collect_access(&frame, Command::WriteTag).await?;

        if let Some(code) = written
            .iter()
            .filter_map(|tag| tag.status)
            .find(|code| !code.is_success())
        {
            return Err(Error::Device(code));
        }

        Ok(written)
    }

    /// Write `text` as the EPC of every tag in the field
    ///
    /// The PC word is rewritten with the new length.
    pub async fn write_ascii_epc(&mut self, text: &str) -> Result<Vec<TagAccess>> {
        let epc = ascii_epc(text)
            .ok_or_else(|| Error::InvalidRequest(format!("{:?} cannot be an ASCII EPC", text)))?;

        // Word 0 of the EPC bank is the CRC; the PC word follows
        self.write_tag(&DEFAULT_PASSWORD, MemoryBank::Epc, 1, &epc)
            .await
    }

    /// Render a tag's EPC in the configured format
    ///
    /// SGTIN-96 decoding sees the EPC without its PC word; every other
    /// format sees PC + EPC.
    pub fn decode_epc(&self, tag: &InventoryTag) -> Option<String> {
        let epc = match self.epc_format {
            EpcFormat::Ean => tag.epc_hex(),
            _ => tag.pc_epc_hex(),
        };
        self.codec.decode(self.epc_format, &epc)
    }

    // Helper methods

    fn ensure_connected(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }

    fn tag_record(&self, tag: &InventoryTag) -> Result<TagRecord> {
        Ok(TagRecord::new(tag.pc_epc_hex(), tag.antenna, tag.rssi)?
            .with_decoded(self.decode_epc(tag)))
    }

    async fn receive(&mut self, wait: Duration) -> Result<Bytes> {
        match self.transport.receive(wait).await {
            Ok(chunk) => Ok(chunk),
            Err(e) if e.is_timeout() => Err(Error::Timeout(self.timeout)),
            Err(e) => Err(e.into()),
        }
    }

    async fn next_message(&mut self, deadline: Instant) -> Result<DecodedMessage> {
        loop {
            if let Some(message) = self.backlog.pop_front() {
                return Ok(message);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(Error::Timeout(self.timeout));
            }

            let chunk = self.receive(remaining).await?;
            let messages = self.reassembler.feed(&chunk);
            self.backlog.extend(messages);
        }
    }

    async fn request(&mut self, frame: &[u8]) -> Result<Response> {
        let message = self.execute(frame).await?;
        Ok(Response::parse(&message)?)
    }

    async fn expect_success(&mut self, frame: &[u8]) -> Result<()> {
        match self.request(frame).await? {
            Response::Status { code, .. } if code.is_success() => Ok(()),
            Response::Status { code, .. } => Err(Error::Device(code)),
            other => Err(unexpected(other)),
        }
    }

    async fn collect_access(&mut self, frame: &[u8], command: Command) -> Result<Vec<TagAccess>> {
        let code = u8::from(command);
        self.send(frame).await?;

        let mut results = Vec::new();
        loop {
            let message = self.next_message(Instant::now() + self.timeout).await?;
            if message.command != code {
                debug!("Skipping 0x{:02X} while waiting for {}", message.command, command);
                continue;
            }

            let access = match Response::parse(&message)? {
                Response::ReadTag(access) | Response::WriteTag(access) => access,
                Response::Status { code, .. } => return Err(Error::Device(code)),
                other => return Err(unexpected(other)),
            };

            let expected = access.tag_count as usize;
            results.push(access);
            if results.len() >= expected {
                return Ok(results);
            }
        }
    }
}

fn unexpected(response: Response) -> Error {
    Error::InvalidResponse(format!("unexpected reply {:?}", response))
}
