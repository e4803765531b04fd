//! Protocol constants

/// Head marker that opens every frame
pub const HEAD: u8 = 0xA0;

/// Default reader address (broadcast for a single reader on the link)
pub const DEFAULT_ADDRESS: u8 = 0x01;

/// Default TCP port of the reader's network module
pub const DEFAULT_PORT: u16 = 4001;

/// Default serial line speed
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default read timeout (seconds)
pub const DEFAULT_READ_TIMEOUT: u64 = 5;

/// Repeat value asking the reader to inventory until stopped
pub const INVENTORY_REPEAT_FOREVER: u8 = 0xFF;

/// UART baud rate selectors for `SetUartBaudrate`
pub mod baudrate {
    pub const BAUD_38400: u8 = 0x03;
    pub const BAUD_115200: u8 = 0x04;
}

/// Working antenna selectors (zero based on the wire)
pub mod antenna {
    pub const ANTENNA_1: u8 = 0x00;
    pub const ANTENNA_2: u8 = 0x01;
    pub const ANTENNA_3: u8 = 0x02;
    pub const ANTENNA_4: u8 = 0x03;
}

/// Tag memory banks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MemoryBank {
    Reserved = 0x00,
    Epc = 0x01,
    Tid = 0x02,
    User = 0x03,
}

/// Frequency regions for `SetFrequencyRegion`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrequencyRegion {
    Fcc = 0x01,
    Etsi = 0x02,
    Chn = 0x03,
}
