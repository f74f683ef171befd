#![forbid(unsafe_code)]

mod error;
mod reader;
mod writer;
mod tlv;
mod facade;

pub use self::error::{BigSizeViolation, WireError};
pub use self::reader::Reader;
pub use self::writer::Writer;
pub use self::tlv::{TlvRecord, TlvStream};
pub use self::facade::{BinarySD, Decode, Encode};

pub use dependencies::byteorder::{BigEndian, LittleEndian};
