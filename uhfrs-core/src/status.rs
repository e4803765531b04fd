//! Reader status (return) codes
//!
//! Commands that only acknowledge are answered with a single status byte.

use std::fmt;

/// Status byte returned by the reader
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReturnCode {
    Success,
    CommandFail,
    McuResetError,
    CwOnError,
    AntennaMissingError,
    WriteFlashError,
    ReadFlashError,
    SetOutputPowerError,
    TagInventoryError,
    TagReadError,
    TagWriteError,
    TagLockError,
    TagKillError,
    NoTagError,
    InventoryOkButAccessFail,
    BufferIsEmptyError,
    AccessOrPasswordError,
    ParameterInvalid,
    WordCountTooLong,
    MemoryBankOutOfRange,
    LockRegionOutOfRange,
    LockActionOutOfRange,
    ReaderAddressInvalid,
    AntennaIdOutOfRange,
    OutputPowerOutOfRange,
    FrequencyRegionOutOfRange,
    BaudrateOutOfRange,
    BeeperModeOutOfRange,
    EpcMatchLenTooLong,
    EpcMatchLenError,
    InvalidEpcMatchMode,
    InvalidFrequencyRange,
    FailToGetRn16FromTag,
    InvalidDrmMode,
    PllLockFail,
    RfChipFailToResponse,
    FailToAchieveDesiredOutputPower,
    CopyrightAuthenticationFail,
    SpectrumRegulationError,
    OutputPowerTooLow,
    Unknown(u8),
}

impl ReturnCode {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Raw status byte
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0x10,
            Self::CommandFail => 0x11,
            Self::McuResetError => 0x20,
            Self::CwOnError => 0x21,
            Self::AntennaMissingError => 0x22,
            Self::WriteFlashError => 0x23,
            Self::ReadFlashError => 0x24,
            Self::SetOutputPowerError => 0x25,
            Self::TagInventoryError => 0x31,
            Self::TagReadError => 0x32,
            Self::TagWriteError => 0x33,
            Self::TagLockError => 0x34,
            Self::TagKillError => 0x35,
            Self::NoTagError => 0x36,
            Self::InventoryOkButAccessFail => 0x37,
            Self::BufferIsEmptyError => 0x38,
            Self::AccessOrPasswordError => 0x40,
            Self::ParameterInvalid => 0x41,
            Self::WordCountTooLong => 0x42,
            Self::MemoryBankOutOfRange => 0x43,
            Self::LockRegionOutOfRange => 0x44,
            Self::LockActionOutOfRange => 0x45,
            Self::ReaderAddressInvalid => 0x46,
            Self::AntennaIdOutOfRange => 0x47,
            Self::OutputPowerOutOfRange => 0x48,
            Self::FrequencyRegionOutOfRange => 0x49,
            Self::BaudrateOutOfRange => 0x4A,
            Self::BeeperModeOutOfRange => 0x4B,
            Self::EpcMatchLenTooLong => 0x4C,
            Self::EpcMatchLenError => 0x4D,
            Self::InvalidEpcMatchMode => 0x4E,
            Self::InvalidFrequencyRange => 0x4F,
            Self::FailToGetRn16FromTag => 0x50,
            Self::InvalidDrmMode => 0x51,
            Self::PllLockFail => 0x52,
            Self::RfChipFailToResponse => 0x53,
            Self::FailToAchieveDesiredOutputPower => 0x54,
            Self::CopyrightAuthenticationFail => 0x55,
            Self::SpectrumRegulationError => 0x56,
            Self::OutputPowerTooLow => 0x57,
            Self::Unknown(code) => code,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::CommandFail => "Command fail",
            Self::McuResetError => "MCU reset error",
            Self::CwOnError => "CW on error",
            Self::AntennaMissingError => "Antenna missing error",
            Self::WriteFlashError => "Write flash error",
            Self::ReadFlashError => "Read flash error",
            Self::SetOutputPowerError => "Set output power error",
            Self::TagInventoryError => "Tag inventory error",
            Self::TagReadError => "Tag read error",
            Self::TagWriteError => "Tag write error",
            Self::TagLockError => "Tag lock error",
            Self::TagKillError => "Tag kill error",
            Self::NoTagError => "No tag error",
            Self::InventoryOkButAccessFail => "Inventory ok but access fail",
            Self::BufferIsEmptyError => "Buffer is empty error",
            Self::AccessOrPasswordError => "Access or password error",
            Self::ParameterInvalid => "Parameter invalid",
            Self::WordCountTooLong => "Parameter invalid: word count too long",
            Self::MemoryBankOutOfRange => "Parameter invalid: memory bank out of range",
            Self::LockRegionOutOfRange => "Parameter invalid: lock region out of range",
            Self::LockActionOutOfRange => "Parameter invalid: lock action out of range",
            Self::ReaderAddressInvalid => "Parameter invalid: reader address",
            Self::AntennaIdOutOfRange => "Parameter invalid: antenna id out of range",
            Self::OutputPowerOutOfRange => "Parameter invalid: output power out of range",
            Self::FrequencyRegionOutOfRange => "Parameter invalid: frequency region out of range",
            Self::BaudrateOutOfRange => "Parameter invalid: baudrate out of range",
            Self::BeeperModeOutOfRange => "Parameter invalid: beeper mode out of range",
            Self::EpcMatchLenTooLong => "EPC match length too long",
            Self::EpcMatchLenError => "EPC match length error",
            Self::InvalidEpcMatchMode => "Invalid EPC match mode",
            Self::InvalidFrequencyRange => "Invalid frequency range",
            Self::FailToGetRn16FromTag => "Fail to get RN16 from tag",
            Self::InvalidDrmMode => "Invalid DRM mode",
            Self::PllLockFail => "PLL lock fail",
            Self::RfChipFailToResponse => "RF chip fail to response",
            Self::FailToAchieveDesiredOutputPower => "Fail to achieve desired output power",
            Self::CopyrightAuthenticationFail => "Copyright authentication fail",
            Self::SpectrumRegulationError => "Spectrum regulation error",
            Self::OutputPowerTooLow => "Output power too low",
            Self::Unknown(_) => "Unknown status",
        }
    }
}

impl From<u8> for ReturnCode {
    fn from(value: u8) -> Self {
        match value {
            0x10 => Self::Success,
            0x11 => Self::CommandFail,
            0x20 => Self::McuResetError,
            0x21 => Self::CwOnError,
            0x22 => Self::AntennaMissingError,
            0x23 => Self::WriteFlashError,
            0x24 => Self::ReadFlashError,
            0x25 => Self::SetOutputPowerError,
            0x31 => Self::TagInventoryError,
            0x32 => Self::TagReadError,
            0x33 => Self::TagWriteError,
            0x34 => Self::TagLockError,
            0x35 => Self::TagKillError,
            0x36 => Self::NoTagError,
            0x37 => Self::InventoryOkButAccessFail,
            0x38 => Self::BufferIsEmptyError,
            0x40 => Self::AccessOrPasswordError,
            0x41 => Self::ParameterInvalid,
            0x42 => Self::WordCountTooLong,
            0x43 => Self::MemoryBankOutOfRange,
            0x44 => Self::LockRegionOutOfRange,
            0x45 => Self::LockActionOutOfRange,
            0x46 => Self::ReaderAddressInvalid,
            0x47 => Self::AntennaIdOutOfRange,
            0x48 => Self::OutputPowerOutOfRange,
            0x49 => Self::FrequencyRegionOutOfRange,
            0x4A => Self::BaudrateOutOfRange,
            0x4B => Self::BeeperModeOutOfRange,
            0x4C => Self::EpcMatchLenTooLong,
            0x4D => Self::EpcMatchLenError,
            0x4E => Self::InvalidEpcMatchMode,
            0x4F => Self::InvalidFrequencyRange,
            0x50 => Self::FailToGetRn16FromTag,
            0x51 => Self::InvalidDrmMode,
            0x52 => Self::PllLockFail,
            0x53 => Self::RfChipFailToResponse,
            0x54 => Self::FailToAchieveDesiredOutputPower,
            0x55 => Self::CopyrightAuthenticationFail,
            0x56 => Self::SpectrumRegulationError,
            0x57 => Self::OutputPowerTooLow,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.description(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        assert!(ReturnCode::from(0x10).is_success());
        assert!(!ReturnCode::from(0x11).is_success());
    }

    #[test]
    fn test_code_round_trip() {
        for raw in 0u8..=0xFF {
            assert_eq!(ReturnCode::from(raw).code(), raw);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ReturnCode::from(0x99), ReturnCode::Unknown(0x99));
        assert_eq!(ReturnCode::Unknown(0x99).to_string(), "Unknown status (0x99)");
    }
}
