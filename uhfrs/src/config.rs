//! Reader configuration
//!
//! Values come from builder calls or from the environment:
//!
//! - `UHFRS_HOST`: reader host for TCP (default: `192.168.0.178`)
//! - `UHFRS_PORT`: TCP port (default: 4001)
//! - `UHFRS_SERIAL`: serial device path; selects the serial link when set
//! - `UHFRS_BAUD_RATE`: serial line speed (default: 115200)
//! - `UHFRS_ADDRESS`: reader address, decimal or `0x` hex (default: `0x01`)
//! - `UHFRS_CUSTOM_CODE`: cipher custom code seed, hex
//! - `UHFRS_APPLICATION_CODE`: cipher application code seed, hex
//! - `UHFRS_EPC_FORMAT`: `EPC`, `ASCII`, `UDC`, `EAN`, `TITAS` or `TITAS_XIYUAN`
//! - `UHFRS_TIMEOUT_MS`: reply timeout in milliseconds (default: 5000)

use std::time::Duration;

use uhfrs_core::constants::{DEFAULT_ADDRESS, DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_READ_TIMEOUT};
use uhfrs_epc::{DEFAULT_APPLICATION_CODE, DEFAULT_CUSTOM_CODE, EpcCodec, EpcFormat};
use uhfrs_transport::{SerialTransport, TcpTransport, Transport};

use crate::error::{Error, Result};

pub const ENV_HOST: &str = "UHFRS_HOST";
pub const ENV_PORT: &str = "UHFRS_PORT";
pub const ENV_SERIAL: &str = "UHFRS_SERIAL";
pub const ENV_BAUD_RATE: &str = "UHFRS_BAUD_RATE";
pub const ENV_ADDRESS: &str = "UHFRS_ADDRESS";
pub const ENV_CUSTOM_CODE: &str = "UHFRS_CUSTOM_CODE";
pub const ENV_APPLICATION_CODE: &str = "UHFRS_APPLICATION_CODE";
pub const ENV_EPC_FORMAT: &str = "UHFRS_EPC_FORMAT";
pub const ENV_TIMEOUT_MS: &str = "UHFRS_TIMEOUT_MS";

/// Default reader host of the network module
pub const DEFAULT_HOST: &str = "192.168.0.178";

/// How to reach the reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    Tcp { host: String, port: u16 },
    Serial { path: String, baud_rate: u32 },
}

impl Connection {
    /// Build the transport for this link
    pub fn transport(&self) -> Box<dyn Transport> {
        match self {
            Connection::Tcp { host, port } => Box::new(TcpTransport::new(host.clone(), *port)),
            Connection::Serial { path, baud_rate } => {
                Box::new(SerialTransport::new(path.clone()).with_baud_rate(*baud_rate))
            }
        }
    }
}

/// Settings for a [`Reader`](crate::Reader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    pub connection: Connection,
    pub address: u8,
    pub custom_code: String,
    pub application_code: String,
    pub epc_format: EpcFormat,
    pub timeout: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::tcp(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ReaderConfig {
    /// Reader behind a network module
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::with_connection(Connection::Tcp {
            host: host.into(),
            port,
        })
    }

    /// Reader on a serial port at the default baud rate
    pub fn serial(path: impl Into<String>) -> Self {
        Self::with_connection(Connection::Serial {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
        })
    }

    fn with_connection(connection: Connection) -> Self {
        Self {
            connection,
            address: DEFAULT_ADDRESS,
            custom_code: DEFAULT_CUSTOM_CODE.to_string(),
            application_code: DEFAULT_APPLICATION_CODE.to_string(),
            epc_format: EpcFormat::default(),
            timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT),
        }
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the hex seeds the barcode cipher key is built from
    pub fn with_cipher_seeds(
        mut self,
        custom_code: impl Into<String>,
        application_code: impl Into<String>,
    ) -> Self {
        self.custom_code = custom_code.into();
        self.application_code = application_code.into();
        self
    }

    pub fn with_epc_format(mut self, format: EpcFormat) -> Self {
        self.epc_format = format;
        self
    }

    /// Set how long to wait for a reply
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set serial line speed; no effect on TCP links
    pub fn with_baud_rate(mut self, rate: u32) -> Self {
        if let Connection::Serial { baud_rate, .. } = &mut self.connection {
            *baud_rate = rate;
        }
        self
    }

    /// Codec keyed by the configured seeds
    pub fn codec(&self) -> Result<EpcCodec> {
        Ok(EpcCodec::new(&self.custom_code, &self.application_code)?)
    }

    /// Read configuration from `UHFRS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_SERIAL) {
            Some(path) => {
                let baud_rate = match lookup(ENV_BAUD_RATE) {
                    Some(v) => parse_number(ENV_BAUD_RATE, &v)?,
                    None => DEFAULT_BAUD_RATE,
                };
                Self::serial(path).with_baud_rate(baud_rate)
            }
            None => {
                let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = match lookup(ENV_PORT) {
                    Some(v) => parse_number(ENV_PORT, &v)?,
                    None => DEFAULT_PORT,
                };
                Self::tcp(host, port)
            }
        };

        if let Some(v) = lookup(ENV_ADDRESS) {
            config.address = parse_address(&v)?;
        }
        if let Some(v) = lookup(ENV_CUSTOM_CODE) {
            config.custom_code = v;
        }
        if let Some(v) = lookup(ENV_APPLICATION_CODE) {
            config.application_code = v;
        }
        if let Some(v) = lookup(ENV_EPC_FORMAT) {
            config.epc_format = v.parse()?;
        }
        if let Some(v) = lookup(ENV_TIMEOUT_MS) {
            config.timeout = Duration::from_millis(parse_number(ENV_TIMEOUT_MS, &v)?);
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{}={:?} is not a valid number", key, value)))
}

fn parse_address(value: &str) -> Result<u8> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| Error::Config(format!("{}={:?} is not a valid address", ENV_ADDRESS, value)))
}
