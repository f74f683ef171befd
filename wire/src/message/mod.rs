pub mod types;
pub mod setup;
pub mod channel;
pub mod control;
mod gossip_timestamp_range;

pub use self::gossip_timestamp_range::GossipTimestampFilter;

use self::setup::Init;
use self::setup::Error;
use self::control::Ping;
use self::control::Pong;
use self::channel::*;

use binformat::{Decode, Encode, Reader, TlvStream, WireError, Writer};
use dependencies::byteorder::BigEndian;

pub type MessageSize = u16;

/// Reads the TLV stream that closes a message. Unknown even records fail
/// the decode, unknown odd ones stay in the stream.
pub(crate) fn decode_extension(r: &mut Reader<'_>, known: &[u64]) -> Result<TlvStream, WireError> {
    let stream = TlvStream::decode(r)?;
    stream.ensure_known(known)?;
    Ok(stream)
}

macro_rules! message {
    (pub enum $name:ident { $($variant:ident($rtt:literal)),* }) => {
        /// Tagged union, the variant name equals to the type name witch the variant contains
        #[derive(Eq, PartialEq, Debug, Clone)]
        pub enum $name {
            $($variant($variant),)*
        }

        impl $name {
            pub const SIZE_LIMIT: usize = u16::MAX as usize;

            /// 16-bit runtime type information of the message.
            pub fn type_tag(&self) -> u16 {
                match self {
                    $(
                        $name::$variant(_) => $rtt,
                    )*
                }
            }

            pub fn type_name(&self) -> &'static str {
                match self {
                    $(
                        $name::$variant(_) => stringify!($variant),
                    )*
                }
            }
        }

        impl Encode for $name {
            fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
                let start = w.len();
                w.write_u16::<BigEndian>(self.type_tag());
                match self {
                    $(
                        $name::$variant(payload) => payload.encode(w)?,
                    )*
                }
                let length = w.len() - start;
                if length > Self::SIZE_LIMIT {
                    return Err(WireError::LengthOverflow { length, limit: Self::SIZE_LIMIT });
                }
                Ok(())
            }
        }

        impl Decode for $name {
            // bytes after the payload of a message without extension are ignored
            fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
                r.atomically(|r| {
                    let runtime_type = r.read_u16::<BigEndian>()?;
                    match runtime_type {
                        $(
                            $rtt => $variant::decode(r).map($name::$variant),
                        )*
                        t => Err(WireError::UnknownMessageType(t)),
                    }
                })
            }
        }
    }
}

// Main data structure of the crate.
// The enumeration contains all messages the establishment engine exchanges.
message! {
    pub enum Message {
        Init(16u16),
        Error(17u16),
        Ping(18u16),
        Pong(19u16),
        OpenChannel(32u16),
        AcceptChannel(33u16),
        FundingCreated(34u16),
        FundingSigned(35u16),
        ChannelReady(36u16),
        Shutdown(38u16),
        ClosingSigned(39u16),
        ChannelReestablish(136u16),
        GossipTimestampFilter(265u16)
    }
}
