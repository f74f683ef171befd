#![forbid(unsafe_code)]

mod message;
pub mod feature;

pub use self::message::*;
pub use self::message::types::*;
pub use self::message::setup::{Init, Error};
pub use self::message::control::{Ping, Pong};
pub use self::message::channel::*;

pub use binformat::{BinarySD, TlvStream, WireError};
