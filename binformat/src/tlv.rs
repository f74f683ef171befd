use std::convert::TryFrom;

use super::{Decode, Encode, Reader, WireError, Writer};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TlvRecord {
    pub tlv_type: u64,
    pub value: Vec<u8>,
}

/// Ordered set of type-length-value records, the extension area at the end of
/// a BOLT message. Types are kept strictly increasing.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TlvStream {
    records: Vec<TlvRecord>,
}

impl TlvStream {
    pub fn new() -> Self {
        TlvStream::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TlvRecord] {
        self.records.as_slice()
    }

    pub fn get(&self, tlv_type: u64) -> Option<&[u8]> {
        self.records
            .binary_search_by_key(&tlv_type, |r| r.tlv_type)
            .ok()
            .map(|i| self.records[i].value.as_slice())
    }

    /// Inserts the record or replaces the value of an existing one.
    pub fn insert(&mut self, tlv_type: u64, value: Vec<u8>) {
        match self.records.binary_search_by_key(&tlv_type, |r| r.tlv_type) {
            Ok(i) => self.records[i].value = value,
            Err(i) => self.records.insert(i, TlvRecord { tlv_type, value }),
        }
    }

    pub fn remove(&mut self, tlv_type: u64) -> Option<Vec<u8>> {
        self.records
            .binary_search_by_key(&tlv_type, |r| r.tlv_type)
            .ok()
            .map(|i| self.records.remove(i).value)
    }

    /// It's ok to be odd: unknown odd records are ignored, unknown even ones
    /// make the whole message invalid.
    pub fn ensure_known(&self, known: &[u64]) -> Result<(), WireError> {
        match self
            .records
            .iter()
            .find(|r| r.tlv_type % 2 == 0 && !known.contains(&r.tlv_type))
        {
            Some(r) => Err(WireError::UnknownEvenTlv(r.tlv_type)),
            None => Ok(()),
        }
    }
}

impl Encode for TlvStream {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        for record in &self.records {
            w.write_big_size(record.tlv_type);
            w.write_big_size(record.value.len() as u64);
            w.write_bytes(&record.value);
        }
        Ok(())
    }
}

impl Decode for TlvStream {
    /// Consumes the rest of the input.
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.atomically(|r| {
            let mut records: Vec<TlvRecord> = Vec::new();
            while !r.is_empty() {
                let tlv_type = r.read_big_size()?;
                if let Some(previous) = records.last() {
                    if previous.tlv_type >= tlv_type {
                        return Err(WireError::TlvOrder { previous: previous.tlv_type, current: tlv_type });
                    }
                }
                let length = r.read_big_size()?;
                let remaining = r.remaining();
                let length = usize::try_from(length)
                    .map_err(|_| WireError::Underflow { needed: usize::MAX, remaining })?;
                let value = r.read_slice(length)?.to_vec();
                records.push(TlvRecord { tlv_type, value });
            }
            Ok(TlvStream { records })
        })
    }
}
