use crate::element::{Element, Index, MAX_HEIGHT, START_INDEX};
use crate::error::ShachainError;
use crate::utils;

// RevocationStore keeps the secrets received from the counterparty. It is
// able to store N derived shachain elements in a space efficient manner
// with a space complexity of O(log N), see
// https://github.com/lightningnetwork/lightning-rfc/blob/master/03-transactions.md#efficient-per-commitment-secret-storage
#[derive(Clone, Debug)]
pub struct RevocationStore {
    // len_buckets stores the number of currently active buckets.
    len_buckets: u8,

    // buckets is an array of elements from which we may derive all
    // previous elements, each bucket corresponds to the element with the
    // particular number of trailing zeros.
    buckets: [Element; MAX_HEIGHT as usize + 1],

    // index is an available index which will be assigned to the new
    // element, None once the last index was used.
    index: Option<Index>,
}

impl Default for RevocationStore {
    fn default() -> Self {
        RevocationStore::new()
    }
}

impl RevocationStore {
    pub fn new() -> Self {
        RevocationStore {
            len_buckets: 0,
            buckets: [Element::default(); MAX_HEIGHT as usize + 1],
            index: Some(START_INDEX),
        }
    }

    /// Commitment number the next secret must belong to.
    pub fn next_commitment_number(&self) -> Option<u64> {
        self.index.map(Index::commitment_number)
    }

    // look_up restores a previous secret by its commitment number. If the
    // secret was not placed in the store yet it cannot be derived.
    pub fn look_up(&self, commitment_number: u64) -> Result<[u8; 32], ShachainError> {
        let index = Index::from_commitment_number(commitment_number)?;

        // Trying to derive the index from one of the existing buckets elements.
        self.buckets[..self.len_buckets as usize]
            .iter()
            .find_map(|bucket| bucket.derive(index).ok())
            .map(|element| element.hash)
            .ok_or(ShachainError::UnknownIndex(commitment_number))
    }

    // add_next_entry stores the given secret. The secrets MUST be inserted
    // in the order they're produced, a secret which doesn't derive the
    // ones stored before is rejected and the store is left unchanged.
    pub fn add_next_entry(&mut self, hash: [u8; 32]) -> Result<(), ShachainError> {
        let index = self.index.ok_or(ShachainError::Exhausted)?;
        let new_element = Element { index, hash };

        let bucket = utils::count_trailing_zeros(index);

        for i in 0..bucket as usize {
            let e = new_element.derive(self.buckets[i].index)?;

            if e != self.buckets[i] {
                return Err(ShachainError::HashMismatch {
                    commitment_number: index.commitment_number(),
                });
            }
        }

        self.buckets[bucket as usize] = new_element;
        if bucket + 1 > self.len_buckets {
            self.len_buckets = bucket + 1
        }

        self.index = index.0.checked_sub(1).map(Index);
        Ok(())
    }
}
