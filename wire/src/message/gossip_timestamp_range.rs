use super::types::Hash256;

use binformat::{Decode, Encode, Reader, WireError, Writer};

use std::ops::Range;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GossipTimestampFilter {
    pub chain_hash: Hash256,
    pub first_timestamp: u32,
    pub timestamp_range: u32,
}

impl GossipTimestampFilter {
    pub fn range(&self) -> Range<u32> {
        // `less than first_timestamp plus timestamp_range`, the end is excluded
        let end = self.first_timestamp.saturating_add(self.timestamp_range);
        self.first_timestamp..end
    }
}

impl Encode for GossipTimestampFilter {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.chain_hash.encode(w)?;
        self.first_timestamp.encode(w)?;
        self.timestamp_range.encode(w)
    }
}

impl Decode for GossipTimestampFilter {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            Ok(GossipTimestampFilter {
                chain_hash: Hash256::decode(r)?,
                first_timestamp: u32::decode(r)?,
                timestamp_range: u32::decode(r)?,
            })
        })
    }
}
