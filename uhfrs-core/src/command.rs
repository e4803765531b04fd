//! Reader command definitions

use std::fmt;

use crate::error::{Error, Result};

/// Reader command codes
///
/// The same code is used in the request frame and in the reader's reply.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    // GPIO and antenna detection
    ReadGpioValue = 0x60,
    WriteGpioValue = 0x61,
    SetAntennaConnectionDetector = 0x62,
    GetAntennaConnectionDetector = 0x63,

    // Reader identity and RF profile
    SetTemporaryOutputPower = 0x66,
    SetReaderIdentifier = 0x67,
    GetReaderIdentifier = 0x68,
    SetRfLinkProfile = 0x69,
    GetRfLinkProfile = 0x6A,

    // Reader configuration
    Reset = 0x70,
    SetUartBaudrate = 0x71,
    GetFirmwareVersion = 0x72,
    SetReaderAddress = 0x73,
    SetWorkingAntenna = 0x74,
    GetWorkingAntenna = 0x75,
    SetOutputPower = 0x76,
    GetOutputPower = 0x77,
    SetFrequencyRegion = 0x78,
    GetFrequencyRegion = 0x79,
    SetBeeperMode = 0x7A,
    GetReaderTemperature = 0x7B,
    GetRfPortReturnLoss = 0x7E,

    // Tag operations
    ReadTag = 0x81,
    WriteTag = 0x82,
    RealtimeInventory = 0x89,
    CustomizedSessionTargetInventory = 0x8B,
    ResetInventoryBuffer = 0x93,
    TagSelect = 0x98,
}

impl Command {
    /// Check if replies to this command carry tag data
    pub fn is_tag_operation(self) -> bool {
        matches!(
            self,
            Self::ReadTag
                | Self::WriteTag
                | Self::RealtimeInventory
                | Self::CustomizedSessionTargetInventory
        )
    }

    /// Check if this is an inventory command
    pub fn is_inventory(self) -> bool {
        matches!(
            self,
            Self::RealtimeInventory | Self::CustomizedSessionTargetInventory
        )
    }

    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::ReadGpioValue => "cmd_read_gpio_value",
            Self::WriteGpioValue => "cmd_write_gpio_value",
            Self::SetAntennaConnectionDetector => "cmd_set_ant_connection_detector",
            Self::GetAntennaConnectionDetector => "cmd_get_ant_connection_detector",
            Self::SetTemporaryOutputPower => "cmd_set_temporary_output_power",
            Self::SetReaderIdentifier => "cmd_set_reader_identifier",
            Self::GetReaderIdentifier => "cmd_get_reader_identifier",
            Self::SetRfLinkProfile => "cmd_set_rf_link_profile",
            Self::GetRfLinkProfile => "cmd_get_rf_link_profile",
            Self::Reset => "cmd_reset",
            Self::SetUartBaudrate => "cmd_set_uart_baudrate",
            Self::GetFirmwareVersion => "cmd_get_firmware_version",
            Self::SetReaderAddress => "cmd_set_reader_address",
            Self::SetWorkingAntenna => "cmd_set_work_antenna",
            Self::GetWorkingAntenna => "cmd_get_work_antenna",
            Self::SetOutputPower => "cmd_set_output_power",
            Self::GetOutputPower => "cmd_get_output_power",
            Self::SetFrequencyRegion => "cmd_set_frequency_region",
            Self::GetFrequencyRegion => "cmd_get_frequency_region",
            Self::SetBeeperMode => "cmd_set_beeper_mode",
            Self::GetReaderTemperature => "cmd_get_reader_temperature",
            Self::GetRfPortReturnLoss => "cmd_get_rf_port_return_loss",
            Self::ReadTag => "cmd_read",
            Self::WriteTag => "cmd_write",
            Self::RealtimeInventory => "cmd_real_time_inventory",
            Self::CustomizedSessionTargetInventory => "cmd_customized_session_target_inventory",
            Self::ResetInventoryBuffer => "cmd_reset_inventory_buffer",
            Self::TagSelect => "cmd_tag_select",
        }
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x60 => Ok(Self::ReadGpioValue),
            0x61 => Ok(Self::WriteGpioValue),
            0x62 => Ok(Self::SetAntennaConnectionDetector),
            0x63 => Ok(Self::GetAntennaConnectionDetector),
            0x66 => Ok(Self::SetTemporaryOutputPower),
            0x67 => Ok(Self::SetReaderIdentifier),
            0x68 => Ok(Self::GetReaderIdentifier),
            0x69 => Ok(Self::SetRfLinkProfile),
            0x6A => Ok(Self::GetRfLinkProfile),
            0x70 => Ok(Self::Reset),
            0x71 => Ok(Self::SetUartBaudrate),
            0x72 => Ok(Self::GetFirmwareVersion),
            0x73 => Ok(Self::SetReaderAddress),
            0x74 => Ok(Self::SetWorkingAntenna),
            0x75 => Ok(Self::GetWorkingAntenna),
            0x76 => Ok(Self::SetOutputPower),
            0x77 => Ok(Self::GetOutputPower),
            0x78 => Ok(Self::SetFrequencyRegion),
            0x79 => Ok(Self::GetFrequencyRegion),
            0x7A => Ok(Self::SetBeeperMode),
            0x7B => Ok(Self::GetReaderTemperature),
            0x7E => Ok(Self::GetRfPortReturnLoss),
            0x81 => Ok(Self::ReadTag),
            0x82 => Ok(Self::WriteTag),
            0x89 => Ok(Self::RealtimeInventory),
            0x8B => Ok(Self::CustomizedSessionTargetInventory),
            0x93 => Ok(Self::ResetInventoryBuffer),
            0x98 => Ok(Self::TagSelect),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}
