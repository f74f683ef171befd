use dependencies::secp256k1;
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ShachainError {
    #[error("prefixes are different, index {to:#x} isn't derivable from {from:#x}")]
    NotDerivable { from: u64, to: u64 },
    #[error("hash for commitment #{commitment_number} isn't derivable from previous ones")]
    HashMismatch { commitment_number: u64 },
    #[error("unable to derive hash for commitment #{0}")]
    UnknownIndex(u64),
    #[error("commitment #{0} is out of the 48-bit index range")]
    IndexOutOfRange(u64),
    #[error("the store is full")]
    Exhausted,
    #[error("per-commitment secret is not a valid key: {0}")]
    InvalidSecret(#[from] secp256k1::Error),
}
