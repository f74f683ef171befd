use binformat::{Decode, Encode, Reader, WireError, Writer};
use dependencies::hex;
use dependencies::hex_literal;

use std::fmt;

/// 32 bytes in the order they travel on the wire. For a chain hash this is
/// the genesis block hash in internal (reversed display) order.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Hash256 {
    data: [u8; 32],
}

impl Hash256 {
    pub const BITCOIN_CHAIN_HASH: Self = Hash256 {
        data: hex_literal::hex!("6fe28c0ab6f1b372c1a6a246ae63f74f931e8365e15a089c68d6190000000000"),
    };

    pub const TESTNET_CHAIN_HASH: Self = Hash256 {
        data: hex_literal::hex!("43497fd7f826957108f4a30fd9cec3aeba79972084e90ead01ea330900000000"),
    };

    pub const REGTEST_CHAIN_HASH: Self = Hash256 {
        data: hex_literal::hex!("06226e46111a0b59caaf126043eb5bbf28c34f3a5e332a1fc7b2b73cf188910f"),
    };

    pub fn from_hex(s: &str) -> Result<Self, WireError> {
        let bytes = hex::decode(s).map_err(|e| WireError::invalid("hash", e))?;
        if bytes.len() != 32 {
            return Err(WireError::invalid("hash", format!("expected 32 bytes, got {}", bytes.len())));
        }
        let mut data = [0; 32];
        data.copy_from_slice(&bytes);
        Ok(Hash256 { data })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.data[..])
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.data
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(data: [u8; 32]) -> Self {
        Hash256 { data }
    }
}

impl From<Hash256> for [u8; 32] {
    fn from(h: Hash256) -> Self {
        h.data
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl Encode for Hash256 {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.data.encode(w)
    }
}

impl Decode for Hash256 {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_fixed::<32>().map(Hash256::from)
    }
}

// hex string in human readable formats, the configuration carries the chain hash
mod serde_m {
    use super::Hash256;

    use serde::Serialize;
    use serde::Serializer;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::de::Visitor;
    use serde::de::Error;
    use std::fmt;

    impl Serialize for Hash256 {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Hash256 {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
            struct V;

            impl<'de> Visitor<'de> for V {
                type Value = Hash256;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    write!(formatter, "64 hex characters")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> where E: Error {
                    Hash256::from_hex(v).map_err(E::custom)
                }
            }

            deserializer.deserialize_str(V)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Hash256;

    #[test]
    fn hex_round_trip() {
        let h = Hash256::from_hex(&Hash256::REGTEST_CHAIN_HASH.to_hex()).unwrap();
        assert_eq!(h, Hash256::REGTEST_CHAIN_HASH);
        assert!(Hash256::from_hex("00").is_err());
        assert!(Hash256::from_hex("zz").is_err());
    }

    #[test]
    fn json_is_a_hex_string() {
        let json = serde_json::to_string(&Hash256::BITCOIN_CHAIN_HASH).unwrap();
        assert_eq!(json, "\"6fe28c0ab6f1b372c1a6a246ae63f74f931e8365e15a089c68d6190000000000\"");
        let restored: Hash256 = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, Hash256::BITCOIN_CHAIN_HASH);
    }
}
