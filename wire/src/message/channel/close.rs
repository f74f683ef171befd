use super::ChannelId;
use super::Satoshi;
use super::decode_extension;
use super::super::types::RawSignature;

use binformat::{Decode, Encode, Reader, TlvStream, WireError, Writer};

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Shutdown {
    pub channel_id: ChannelId,
    pub script: Vec<u8>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClosingSigned {
    pub channel_id: ChannelId,
    pub fee: Satoshi,
    pub signature: RawSignature,
    pub extra: TlvStream,
}

impl Encode for Shutdown {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.channel_id.encode(w)?;
        w.write_u16_bytes(&self.script)
    }
}

impl Decode for Shutdown {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(Shutdown {
                channel_id: ChannelId::decode(r)?,
                script: r.read_u16_bytes()?.to_vec(),
            })
        })
    }
}

impl Encode for ClosingSigned {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.channel_id.encode(w)?;
        self.fee.encode(w)?;
        self.signature.encode(w)?;
        self.extra.encode(w)
    }
}

impl Decode for ClosingSigned {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(ClosingSigned {
                channel_id: ChannelId::decode(r)?,
                fee: Satoshi::decode(r)?,
                signature: RawSignature::decode(r)?,
                // fee_range (type 1) is odd and kept opaque
                extra: decode_extension(r, &[])?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binformat::BinarySD;
    use dependencies::hex;

    #[test]
    fn shutdown_script_is_u16_prefixed() {
        let msg = Shutdown {
            channel_id: ChannelId::all(),
            script: hex::decode("0014ccf1af2f2aabee14bb40fa3851ab2301de843110").unwrap(),
        };
        let bytes = BinarySD::serialize(&msg).unwrap();
        assert_eq!(&bytes[32..34], &[0x00, 0x16]);
        assert_eq!(BinarySD::deserialize::<Shutdown>(&bytes).unwrap(), msg);
    }

    #[test]
    fn closing_signed_keeps_fee_range() {
        let mut extra = TlvStream::new();
        extra.insert(1, vec![0; 16]);
        let msg = ClosingSigned {
            channel_id: ChannelId::from([9; 32]),
            fee: Satoshi::from(7240),
            signature: RawSignature::from_bytes([1; 64]),
            extra,
        };
        let bytes = BinarySD::serialize(&msg).unwrap();
        assert_eq!(bytes.len(), 32 + 8 + 64 + 2 + 16);
        assert_eq!(BinarySD::deserialize::<ClosingSigned>(&bytes).unwrap(), msg);
    }
}
