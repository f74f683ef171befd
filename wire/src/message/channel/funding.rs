use super::ChannelId;
use super::decode_extension;
use super::super::types::{RawSignature, RawPublicKey};

use binformat::{Decode, Encode, Reader, TlvStream, WireError, Writer};
use dependencies::hex;

use std::fmt;

/// Txid in the byte order of the serialized transaction, not the reversed
/// order explorers display.
#[derive(Default, Eq, PartialEq, Copy, Clone, Hash)]
pub struct FundingTxid {
    data: [u8; 32],
}

impl From<FundingTxid> for [u8; 32] {
    fn from(tx_id: FundingTxid) -> Self {
        tx_id.data
    }
}

impl From<[u8; 32]> for FundingTxid {
    fn from(data: [u8; 32]) -> Self {
        FundingTxid { data }
    }
}

impl FundingTxid {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.data
    }
}

impl fmt::Debug for FundingTxid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FundingTxid({})", hex::encode(&self.data[..]))
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FundingCreated {
    pub temporary_channel_id: ChannelId,
    pub funding_txid: FundingTxid,
    pub output_index: u16,
    pub signature: RawSignature,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FundingSigned {
    pub channel_id: ChannelId,
    pub signature: RawSignature,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChannelReady {
    pub channel_id: ChannelId,
    pub next_per_commitment_point: RawPublicKey,
    pub extra: TlvStream,
}

impl Encode for FundingTxid {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.data.encode(w)
    }
}

impl Decode for FundingTxid {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_fixed::<32>().map(FundingTxid::from)
    }
}

impl Encode for FundingCreated {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.temporary_channel_id.encode(w)?;
        self.funding_txid.encode(w)?;
        self.output_index.encode(w)?;
        self.signature.encode(w)
    }
}

impl Decode for FundingCreated {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(FundingCreated {
                temporary_channel_id: ChannelId::decode(r)?,
                funding_txid: FundingTxid::decode(r)?,
                output_index: u16::decode(r)?,
                signature: RawSignature::decode(r)?,
            })
        })
    }
}

impl Encode for FundingSigned {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.channel_id.encode(w)?;
        self.signature.encode(w)
    }
}

impl Decode for FundingSigned {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(FundingSigned {
                channel_id: ChannelId::decode(r)?,
                signature: RawSignature::decode(r)?,
            })
        })
    }
}

impl Encode for ChannelReady {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.channel_id.encode(w)?;
        self.next_per_commitment_point.encode(w)?;
        self.extra.encode(w)
    }
}

impl Decode for ChannelReady {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(ChannelReady {
                channel_id: ChannelId::decode(r)?,
                next_per_commitment_point: RawPublicKey::decode(r)?,
                extra: decode_extension(r, &[])?,
            })
        })
    }
}
