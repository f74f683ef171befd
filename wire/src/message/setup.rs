use super::types::RawFeatureVector;
use super::channel::ChannelId;
use super::decode_extension;

use binformat::{Decode, Encode, Reader, TlvStream, WireError, Writer};

/// The first message reveals the features supported or required by this node,
/// even if this is a reconnection
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Init {
    pub global_features: RawFeatureVector,
    pub local_features: RawFeatureVector,
    pub extra: TlvStream,
}

impl Init {
    pub fn new(global_features: RawFeatureVector, local_features: RawFeatureVector) -> Self {
        Init {
            global_features,
            local_features,
            extra: TlvStream::new(),
        }
    }

    /// Both vectors are combined, old nodes still put some bits in the global one.
    pub fn features(&self) -> RawFeatureVector {
        let mut features = self.local_features.clone();
        for bit in self.global_features.bits() {
            features.insert(bit.into());
        }
        features
    }
}

/// The channel is referred to by `channel_id`,
/// unless `channel_id` is 0 (i.e. all bytes are 0), in which case it refers to all channels.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Error {
    pub channel_id: ChannelId,
    pub data: Vec<u8>,
}

impl Error {
    pub fn new(channel_id: ChannelId, message: &str) -> Self {
        Error {
            channel_id,
            data: message.as_bytes().to_vec(),
        }
    }

    pub fn message(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

impl Encode for Init {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.global_features.encode(w)?;
        self.local_features.encode(w)?;
        self.extra.encode(w)
    }
}

impl Decode for Init {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(Init {
                global_features: RawFeatureVector::decode(r)?,
                local_features: RawFeatureVector::decode(r)?,
                // networks (1) and remote_addr (3) are odd, kept opaque
                extra: decode_extension(r, &[])?,
            })
        })
    }
}

impl Encode for Error {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.channel_id.encode(w)?;
        w.write_u16_bytes(&self.data)
    }
}

impl Decode for Error {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(Error {
                channel_id: ChannelId::decode(r)?,
                data: r.read_u16_bytes()?.to_vec(),
            })
        })
    }
}
