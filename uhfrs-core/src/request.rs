//! Typed request builders
//!
//! Thin wrappers over [`CommandEncoder::build_with_payload`] that lay out
//! each command's payload.

use bytes::BytesMut;

use crate::{
    command::Command,
    constants::{FrequencyRegion, MemoryBank},
    frame::CommandEncoder,
};

impl CommandEncoder {
    pub fn reset(&self) -> BytesMut {
        self.build_simple(Command::Reset)
    }

    /// `selector` is one of [`crate::constants::baudrate`]
    pub fn set_uart_baudrate(&self, selector: u8) -> BytesMut {
        self.build_with_payload(Command::SetUartBaudrate, &[selector])
    }

    pub fn get_firmware_version(&self) -> BytesMut {
        self.build_simple(Command::GetFirmwareVersion)
    }

    pub fn set_reader_address(&self, address: u8) -> BytesMut {
        self.build_with_payload(Command::SetReaderAddress, &[address])
    }

    /// `antenna` is zero based, see [`crate::constants::antenna`]
    pub fn set_working_antenna(&self, antenna: u8) -> BytesMut {
        self.build_with_payload(Command::SetWorkingAntenna, &[antenna])
    }

    pub fn get_working_antenna(&self) -> BytesMut {
        self.build_simple(Command::GetWorkingAntenna)
    }

    /// One dBm value per antenna (0..=33)
    pub fn set_output_power(&self, power: &[u8]) -> BytesMut {
        self.build_with_payload(Command::SetOutputPower, power)
    }

    /// Same power on every antenna, not persisted by the reader
    pub fn set_temporary_output_power(&self, power: u8) -> BytesMut {
        self.build_with_payload(Command::SetTemporaryOutputPower, &[power])
    }

    pub fn get_output_power(&self) -> BytesMut {
        self.build_simple(Command::GetOutputPower)
    }

    pub fn set_frequency_region(&self, region: FrequencyRegion, start: u8, end: u8) -> BytesMut {
        self.build_with_payload(Command::SetFrequencyRegion, &[region as u8, start, end])
    }

    pub fn get_frequency_region(&self) -> BytesMut {
        self.build_simple(Command::GetFrequencyRegion)
    }

    pub fn get_reader_temperature(&self) -> BytesMut {
        self.build_simple(Command::GetReaderTemperature)
    }

    /// `identifier` is the 12-byte reader identifier
    pub fn set_reader_identifier(&self, identifier: &[u8]) -> BytesMut {
        self.build_with_payload(Command::SetReaderIdentifier, identifier)
    }

    pub fn get_reader_identifier(&self) -> BytesMut {
        self.build_simple(Command::GetReaderIdentifier)
    }

    pub fn realtime_inventory(&self, repeat: u8) -> BytesMut {
        self.build_with_payload(Command::RealtimeInventory, &[repeat])
    }

    pub fn customized_session_target_inventory(&self, session: u8, target: u8, repeat: u8) -> BytesMut {
        self.build_with_payload(
            Command::CustomizedSessionTargetInventory,
            &[session, target, repeat],
        )
    }

    pub fn read_tag(&self, bank: MemoryBank, word_address: u8, word_count: u8) -> BytesMut {
        self.build_with_payload(Command::ReadTag, &[bank as u8, word_address, word_count])
    }

    /// `password` is the 4-byte access password
    pub fn write_tag(
        &self,
        password: &[u8; 4],
        bank: MemoryBank,
        word_address: u8,
        word_count: u8,
        data: &[u8],
    ) -> BytesMut {
        let mut payload = Vec::with_capacity(7 + data.len());
        payload.extend_from_slice(password);
        payload.extend_from_slice(&[bank as u8, word_address, word_count]);
        payload.extend_from_slice(data);
        self.build_with_payload(Command::WriteTag, &payload)
    }

    /// Mask `mask` against `bank` starting at bit `start_address`
    ///
    /// The mask length on the wire is given in bits.
    pub fn tag_select(
        &self,
        mask_no: u8,
        target: u8,
        action: u8,
        bank: MemoryBank,
        start_address: u8,
        mask: &[u8],
    ) -> BytesMut {
        let mut payload = Vec::with_capacity(7 + mask.len());
        payload.extend_from_slice(&[
            mask_no,
            target,
            action,
            bank as u8,
            start_address,
            (mask.len() * 8) as u8,
        ]);
        payload.extend_from_slice(mask);
        payload.push(0x00);
        self.build_with_payload(Command::TagSelect, &payload)
    }

    pub fn tag_select_clear(&self, mask_no: u8) -> BytesMut {
        self.build_with_payload(Command::TagSelect, &[mask_no])
    }

    pub fn tag_select_query(&self) -> BytesMut {
        self.build_with_payload(Command::TagSelect, &[0x20])
    }

    pub fn reset_inventory_buffer(&self) -> BytesMut {
        self.build_simple(Command::ResetInventoryBuffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{checksum, frame::Frame};
    use pretty_assertions::assert_eq;

    fn decode(bytes: BytesMut) -> Frame {
        Frame::decode(&bytes).unwrap()
    }

    #[test]
    fn test_reset() {
        let encoder = CommandEncoder::new(0x01);
        assert_eq!(&encoder.reset()[..], &[0xA0, 0x03, 0x01, 0x70, 0xEC]);
    }

    #[test]
    fn test_read_tag_layout() {
        let frame = decode(CommandEncoder::new(0x01).read_tag(MemoryBank::Tid, 0x00, 0x06));
        assert_eq!(frame.command, 0x81);
        assert_eq!(&frame.payload[..], &[0x02, 0x00, 0x06]);
    }

    #[test]
    fn test_write_tag_layout() {
        let bytes = CommandEncoder::new(0x01).write_tag(
            &[0, 0, 0, 0],
            MemoryBank::Epc,
            0x02,
            0x01,
            &[0xAB, 0xCD],
        );
        assert!(checksum::verify(&bytes));

        let frame = decode(bytes);
        assert_eq!(&frame.payload[..], &[0, 0, 0, 0, 0x01, 0x02, 0x01, 0xAB, 0xCD]);
    }

    #[test]
    fn test_frequency_region_layout() {
        let frame = decode(
            CommandEncoder::new(0x01).set_frequency_region(FrequencyRegion::Fcc, 0x29, 0x30),
        );
        assert_eq!(frame.command, 0x78);
        assert_eq!(&frame.payload[..], &[0x01, 0x29, 0x30]);
    }

    #[test]
    fn test_tag_select_layout() {
        let frame = decode(CommandEncoder::new(0x01).tag_select(
            0x01,
            0x04,
            0x00,
            MemoryBank::Epc,
            0x20,
            &[0xE2, 0x00],
        ));
        assert_eq!(
            &frame.payload[..],
            &[0x01, 0x04, 0x00, 0x01, 0x20, 0x10, 0xE2, 0x00, 0x00]
        );
    }

    #[test]
    fn test_tag_select_query() {
        let frame = decode(CommandEncoder::new(0x01).tag_select_query());
        assert_eq!(frame.command, 0x98);
        assert_eq!(&frame.payload[..], &[0x20]);
    }

    #[test]
    fn test_address_is_used() {
        let frame = decode(CommandEncoder::new(0xFF).realtime_inventory(0xFF));
        assert_eq!(frame.address, 0xFF);
        assert_eq!(&frame.payload[..], &[0xFF]);
    }
}
