use super::types::*;
use super::decode_extension;

mod funding;
pub use self::funding::*;

mod close;
pub use self::close::*;

mod open;
pub use self::open::*;

mod keys;
pub use self::keys::*;

mod reestablish;
pub use self::reestablish::*;

use binformat::{Decode, Encode, Reader, WireError, Writer};
use dependencies::bitflags::bitflags;
use dependencies::hex;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChannelFlags: u8 {
        /// Indicates whether the initiator of the funding flow wishes to advertise
        /// this channel publicly to the network, as detailed within BOLT #7.
        const FF_ANNOUNCE_CHANNEL = 0b00000001;
    }
}

impl Encode for ChannelFlags {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        w.write_u8(self.bits());
        Ok(())
    }
}

impl Decode for ChannelFlags {
    // unknown bits are kept so the message re-encodes to the same bytes
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_u8().map(ChannelFlags::from_bits_retain)
    }
}

/// The unique identifier of the channel. It's derived from the funding transaction
/// by combining the funding_txid and the funding_output_index, using big-endian exclusive-OR
/// (i.e. funding_output_index alters the last 2 bytes).
#[derive(Default, Eq, PartialEq, Copy, Clone, Hash, Ord, PartialOrd)]
pub struct ChannelId {
    pub data: [u8; 32],
}

impl ChannelId {
    /// The all-zero id, which refers to every channel of the peer.
    pub fn all() -> Self {
        ChannelId {
            data: [0; 32],
        }
    }

    pub fn is_all(&self) -> bool {
        self.data.iter().all(|b| *b == 0)
    }

    /// `funding_txid` is in the byte order of the serialized transaction.
    pub fn from_funding_outpoint(funding_txid: &[u8; 32], output_index: u16) -> Self {
        let mut data = *funding_txid;
        let index = output_index.to_be_bytes();
        data[30] ^= index[0];
        data[31] ^= index[1];
        ChannelId { data }
    }

    pub fn from_hex(s: &str) -> Result<Self, WireError> {
        let bytes = hex::decode(s.as_bytes())
            .map_err(|err| WireError::invalid("channel id", err))?;
        if bytes.len() != 32 {
            return Err(WireError::invalid(
                "channel id",
                format!("incorrect byte length of ChannelId, got {}, want {}", bytes.len(), 32),
            ));
        }
        let mut data = [0; 32];
        data.copy_from_slice(&bytes);
        Ok(ChannelId { data })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.data[..])
    }
}

impl std::fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ChannelId({})", hex::encode(&self.data[..]))
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 32]> for ChannelId {
    fn from(x: [u8; 32]) -> Self {
        ChannelId {
            data: x,
        }
    }
}

impl Encode for ChannelId {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.data.encode(w)
    }
}

impl Decode for ChannelId {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_fixed::<32>().map(ChannelId::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binformat::BinarySD;

    #[test]
    fn channel_id_alters_last_two_bytes() {
        let mut txid = [0u8; 32];
        txid[0] = 0xab;
        txid[30] = 0x01;
        txid[31] = 0x02;
        let id = ChannelId::from_funding_outpoint(&txid, 0x0103);
        assert_eq!(id.data[0], 0xab);
        assert_eq!(id.data[30], 0x00);
        assert_eq!(id.data[31], 0x01);
        assert_eq!(ChannelId::from_funding_outpoint(&txid, 0).data, txid);
    }

    #[test]
    fn all_zero_id() {
        assert!(ChannelId::all().is_all());
        assert!(!ChannelId::from([1; 32]).is_all());
    }

    #[test]
    fn flags_keep_unknown_bits() {
        let flags: ChannelFlags = BinarySD::deserialize(&[0x81]).unwrap();
        assert!(flags.contains(ChannelFlags::FF_ANNOUNCE_CHANNEL));
        assert_eq!(BinarySD::serialize(&flags).unwrap(), vec![0x81]);
    }

    #[test]
    fn channel_id_hex() {
        let id = ChannelId::from_hex("000a000000000000000000000000000000000000000000000000000000000000").unwrap();
        assert_eq!(id.data[1], 0x0a);
        assert!(ChannelId::from_hex("000a").is_err());
    }
}
