use super::ChannelId;
use super::decode_extension;
use super::super::types::RawPublicKey;

use binformat::{Decode, Encode, Reader, TlvStream, WireError, Writer};

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChannelReestablish {
    pub channel_id: ChannelId,
    pub next_commitment_number: u64,
    pub next_revocation_number: u64,
    pub your_last_per_commitment_secret: [u8; 32],
    pub my_current_per_commitment_point: RawPublicKey,
    pub extra: TlvStream,
}

impl Encode for ChannelReestablish {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.channel_id.encode(w)?;
        self.next_commitment_number.encode(w)?;
        self.next_revocation_number.encode(w)?;
        self.your_last_per_commitment_secret.encode(w)?;
        self.my_current_per_commitment_point.encode(w)?;
        self.extra.encode(w)
    }
}

impl Decode for ChannelReestablish {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(ChannelReestablish {
                channel_id: ChannelId::decode(r)?,
                next_commitment_number: u64::decode(r)?,
                next_revocation_number: u64::decode(r)?,
                your_last_per_commitment_secret: r.read_fixed::<32>()?,
                my_current_per_commitment_point: RawPublicKey::decode(r)?,
                extra: decode_extension(r, &[])?,
            })
        })
    }
}
