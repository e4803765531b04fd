//! Type definitions for uhfrs

pub mod error;
pub mod reader_info;
pub mod table;
pub mod tag;

pub use error::{Error, Result};
pub use reader_info::ReaderInfo;
pub use table::{TagRow, TagTable};
pub use tag::TagRecord;
