use binformat::{Decode, Encode, Reader, WireError, Writer};

use super::super::types::RawPublicKey;

/// The six points every side announces in `open_channel` / `accept_channel`.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ChannelKeys {
    pub funding: RawPublicKey,
    pub revocation: RawPublicKey,
    pub payment: RawPublicKey,
    pub delayed_payment: RawPublicKey,
    pub htlc: RawPublicKey,
    pub first_per_commitment: RawPublicKey,
}

impl Encode for ChannelKeys {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.funding.encode(w)?;
        self.revocation.encode(w)?;
        self.payment.encode(w)?;
        self.delayed_payment.encode(w)?;
        self.htlc.encode(w)?;
        self.first_per_commitment.encode(w)
    }
}

impl Decode for ChannelKeys {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(ChannelKeys {
                funding: RawPublicKey::decode(r)?,
                revocation: RawPublicKey::decode(r)?,
                payment: RawPublicKey::decode(r)?,
                delayed_payment: RawPublicKey::decode(r)?,
                htlc: RawPublicKey::decode(r)?,
                first_per_commitment: RawPublicKey::decode(r)?,
            })
        })
    }
}
