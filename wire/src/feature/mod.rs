use binformat::{Decode, Encode, Reader, WireError, Writer};
use dependencies::hex;
use thiserror::Error;

use std::collections::HashSet;
use std::fmt;

mod feature_bit;
pub use self::feature_bit::{Feature, FeatureBit};

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FeatureError {
    #[error("unknown required feature bit {bit}")]
    UnknownRequired { bit: u16 },
    #[error("feature {feature:?} is set without {requires:?}")]
    MissingDependency { feature: Feature, requires: Feature },
    #[error("feature {0:?} is required locally but the peer does not support it")]
    NotSupported(Feature),
}

/// Set of feature bits. On the wire bit 0 is the least significant bit of the
/// last byte.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct RawFeatureVector {
    set: HashSet<FeatureBit>,
}

impl RawFeatureVector {
    pub const BITS: u16 = 8;

    pub fn new() -> Self {
        RawFeatureVector::default()
    }

    pub fn set_bit(mut self, bit: FeatureBit) -> Self {
        self.set.insert(bit);
        self
    }

    pub fn insert(&mut self, bit: FeatureBit) {
        self.set.insert(bit);
    }

    pub fn remove(&mut self, bit: FeatureBit) -> bool {
        self.set.remove(&bit)
    }

    pub fn contains(&self, bit: FeatureBit) -> bool {
        self.set.contains(&bit)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Bit numbers in ascending order.
    pub fn bits(&self) -> Vec<u16> {
        let mut bits = self.set.iter().map(|b| u16::from(*b)).collect::<Vec<_>>();
        bits.sort();
        bits
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.contains(FeatureBit::from(feature.optional_bit())) || self.requires(feature)
    }

    pub fn requires(&self, feature: Feature) -> bool {
        feature
            .required_bit()
            .map(|bit| self.contains(FeatureBit::from(bit)))
            .unwrap_or(false)
    }

    /// Even bits this implementation does not know, "it's ok to be odd".
    pub fn unknown_required_bits(&self) -> Vec<u16> {
        self.bits()
            .into_iter()
            .filter(|bit| bit % 2 == 0 && !FeatureBit::from(*bit).is_known())
            .collect()
    }

    pub fn validate_dependencies(&self) -> Result<(), FeatureError> {
        for feature in Feature::ALL.iter().filter(|f| self.supports(**f)) {
            for requires in feature.dependencies() {
                if !self.supports(*requires) {
                    return Err(FeatureError::MissingDependency { feature: *feature, requires: *requires });
                }
            }
        }
        Ok(())
    }

    /// Minimal encoding: the first byte holds the highest set bit. Leading
    /// zero bytes of a decoded vector are not kept, so `00 01` comes back as `01`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let bits = self.bits();
        let length = match bits.last() {
            Some(max) => usize::from(*max / Self::BITS) + 1,
            None => return Vec::new(),
        };
        let mut bytes = vec![0u8; length];
        for bit in bits {
            let byte_index = length - 1 - usize::from(bit / Self::BITS);
            bytes[byte_index] |= 1 << (bit % Self::BITS);
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let mut fv = RawFeatureVector::new();
        for (byte_index, byte) in bytes.iter().enumerate() {
            let offset = (bytes.len() - 1 - byte_index) * usize::from(Self::BITS);
            for bit_index in 0..Self::BITS {
                if byte & (1 << bit_index) == 0 {
                    continue;
                }
                let bit = offset + usize::from(bit_index);
                if bit > usize::from(u16::MAX) {
                    return Err(WireError::invalid("features", format!("bit {} is out of range", bit)));
                }
                fv.insert(FeatureBit::from(bit as u16));
            }
        }
        Ok(fv)
    }

    pub fn from_hex(s: &str) -> Result<Self, WireError> {
        let bytes = hex::decode(s).map_err(|e| WireError::invalid("features", e))?;
        RawFeatureVector::from_bytes(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Debug for RawFeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut bits = self.set.iter().cloned().collect::<Vec<_>>();
        bits.sort_by_key(|b| u16::from(*b));
        f.debug_set().entries(bits).finish()
    }
}

impl From<Vec<FeatureBit>> for RawFeatureVector {
    fn from(bits: Vec<FeatureBit>) -> Self {
        RawFeatureVector {
            set: bits.into_iter().collect(),
        }
    }
}

impl Encode for RawFeatureVector {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        w.write_u16_bytes(&self.to_bytes())
    }
}

impl Decode for RawFeatureVector {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            let bytes = r.read_u16_bytes()?;
            RawFeatureVector::from_bytes(bytes)
        })
    }
}

/// Checks the remote vector against the local one before anything else is
/// negotiated with the peer.
pub fn validate_compatible(local: &RawFeatureVector, remote: &RawFeatureVector) -> Result<(), FeatureError> {
    if let Some(bit) = remote.unknown_required_bits().first() {
        return Err(FeatureError::UnknownRequired { bit: *bit });
    }
    remote.validate_dependencies()?;
    for feature in Feature::ALL.iter() {
        if local.requires(*feature) && !remote.supports(*feature) {
            return Err(FeatureError::NotSupported(*feature));
        }
    }
    Ok(())
}

pub fn negotiated(local: &RawFeatureVector, remote: &RawFeatureVector, feature: Feature) -> bool {
    local.supports(feature) && remote.supports(feature)
}
