use dependencies::secp256k1::{PublicKey, Secp256k1, SecretKey, Signing};

use crate::element::{Element, Index, ROOT_INDEX};
use crate::error::ShachainError;

/// The BOLT 3 `generate_from_seed` function. `index` is the raw 48-bit index,
/// not the commitment number.
pub fn generate_from_seed(seed: &[u8; 32], index: u64) -> Result<[u8; 32], ShachainError> {
    let root = Element {
        index: ROOT_INDEX,
        hash: *seed,
    };
    root.derive(Index(index)).map(|e| e.hash)
}

// RevocationProducer generates per-commitment secrets with the shachain PRF
// construct. Starting with a single 32-byte seed it is able to efficiently
// generate 2^48 secrets while keeping constant storage. See
// https://github.com/lightningnetwork/lightning-rfc/blob/master/03-transactions.md#per-commitment-secret-requirements
#[derive(Clone)]
pub struct RevocationProducer {
    // root is the element from which we may generate all hashes which
    // corresponds to the index domain [281474976710655,0].
    root: Element,
}

impl RevocationProducer {
    pub fn new(seed: [u8; 32]) -> Self {
        RevocationProducer {
            root: Element {
                index: ROOT_INDEX,
                hash: seed,
            },
        }
    }

    /// Secret of the given commitment, commitment 0 is the first one.
    pub fn at_index(&self, commitment_number: u64) -> Result<[u8; 32], ShachainError> {
        let index = Index::from_commitment_number(commitment_number)?;
        let element = self.root.derive(index)?;
        Ok(element.hash)
    }

    pub fn secret_key_at_index(&self, commitment_number: u64) -> Result<SecretKey, ShachainError> {
        let secret = self.at_index(commitment_number)?;
        SecretKey::from_slice(&secret).map_err(ShachainError::from)
    }

    /// The per-commitment point, `secret * G`.
    pub fn point_at_index<C: Signing>(&self, secp: &Secp256k1<C>, commitment_number: u64) -> Result<PublicKey, ShachainError> {
        let secret = self.secret_key_at_index(commitment_number)?;
        Ok(PublicKey::from_secret_key(secp, &secret))
    }
}
