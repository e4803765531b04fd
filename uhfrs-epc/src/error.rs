//! Error types for uhfrs-epc

pub type Result<T> = std::result::Result<T, Error>;

/// EPC decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input is not a hex string
    #[error("Invalid hex string: {0:?}")]
    InvalidHex(String),

    /// EPC has the wrong number of hex characters for the scheme
    #[error("Wrong EPC length: expected {expected} hex characters, got {actual}")]
    WrongLength {
        expected: usize,
        actual: usize,
    },

    /// SGTIN partition value has no entry in the partition table
    #[error("SGTIN partition out of range: {0}")]
    PartitionOutOfRange(u8),

    /// Company prefix and item reference did not form 13 digits
    #[error("GTIN assembly produced {digits} digits, expected 13")]
    AssemblyError {
        digits: usize,
    },

    /// Name does not match any EPC format
    #[error("Unknown EPC format: {0}")]
    UnknownFormat(String),
}
