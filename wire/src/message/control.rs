use binformat::{Decode, Encode, Reader, WireError, Writer};

use super::MessageSize;

/// Keep alive message. Two purposes:
/// allow for the existence of long-lived TCP connections,
/// obfuscate traffic pattern.
/// `pong_length` should be less than 2 ^ 16 - 4,
/// in order to the response message fit in the size limit.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ping {
    pub pong_length: MessageSize,
    pub data: Vec<u8>,
}

impl Ping {
    /// Pongs at or above this length are never sent.
    pub const PONG_LENGTH_LIMIT: MessageSize = 65532;

    pub fn new(pong_length: MessageSize, padding: MessageSize) -> Self {
        Ping {
            pong_length,
            data: vec![0; usize::from(padding)],
        }
    }

    pub fn validate(&self) -> Result<(), WireError> {
        if self.pong_length >= Self::PONG_LENGTH_LIMIT {
            return Err(WireError::LengthOverflow {
                length: usize::from(self.pong_length),
                limit: usize::from(Self::PONG_LENGTH_LIMIT) - 1,
            });
        }
        Ok(())
    }

    pub fn length(&self) -> MessageSize {
        self.data.len() as _
    }

    /// The response, filled with zeros.
    pub fn pong(&self) -> Pong {
        Pong {
            data: vec![0; usize::from(self.pong_length)],
        }
    }
}

/// The response for the `Ping` message,
/// the length of the data should correspond to received `Ping`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Pong {
    pub data: Vec<u8>,
}

impl Pong {
    pub fn length(&self) -> MessageSize {
        self.data.len() as _
    }
}

impl Encode for Ping {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.pong_length.encode(w)?;
        w.write_u16_bytes(&self.data)
    }
}

impl Decode for Ping {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(Ping {
                pong_length: MessageSize::decode(r)?,
                data: r.read_u16_bytes()?.to_vec(),
            })
        })
    }
}

impl Encode for Pong {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        w.write_u16_bytes(&self.data)
    }
}

impl Decode for Pong {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_u16_bytes().map(|data| Pong { data: data.to_vec() })
    }
}
