//! Display formats for tag EPCs

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// How an inventoried EPC is rendered for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EpcFormat {
    /// Raw hex, unchanged
    #[default]
    Epc,
    /// Printable ASCII bytes after the PC word
    Ascii,
    /// UDC coded text
    Udc,
    /// SGTIN-96 as `GTIN-serial`
    Ean,
    /// Encrypted barcode text
    Titas,
    /// 6-bit item name plus serial, as `item-serial`
    TitasXiyuan,
}

impl EpcFormat {
    /// All formats, in menu order
    pub const ALL: [EpcFormat; 6] = [
        EpcFormat::Epc,
        EpcFormat::Ascii,
        EpcFormat::Udc,
        EpcFormat::Ean,
        EpcFormat::Titas,
        EpcFormat::TitasXiyuan,
    ];

    /// Get format name
    pub fn name(self) -> &'static str {
        match self {
            EpcFormat::Epc => "EPC",
            EpcFormat::Ascii => "ASCII",
            EpcFormat::Udc => "UDC",
            EpcFormat::Ean => "EAN",
            EpcFormat::Titas => "TITAS",
            EpcFormat::TitasXiyuan => "TITAS_XIYUAN",
        }
    }
}

impl fmt::Display for EpcFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for EpcFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        EpcFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_names() {
        assert_eq!("EPC".parse::<EpcFormat>().unwrap(), EpcFormat::Epc);
        assert_eq!("ascii".parse::<EpcFormat>().unwrap(), EpcFormat::Ascii);
        assert_eq!(" UDC ".parse::<EpcFormat>().unwrap(), EpcFormat::Udc);
        assert_eq!("Ean".parse::<EpcFormat>().unwrap(), EpcFormat::Ean);
        assert_eq!("TITAS".parse::<EpcFormat>().unwrap(), EpcFormat::Titas);
        assert_eq!(
            "titas_xiyuan".parse::<EpcFormat>().unwrap(),
            EpcFormat::TitasXiyuan
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "GID".parse::<EpcFormat>(),
            Err(Error::UnknownFormat("GID".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for format in EpcFormat::ALL {
            assert_eq!(format.to_string().parse::<EpcFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(EpcFormat::default(), EpcFormat::Epc);
    }
}
