use dependencies::secp256k1;
use shachain::ShachainError;
use thiserror::Error;

/// Failure of a key or script derivation step.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum KeyError {
    #[error("secp256k1: {0}")]
    Secp(#[from] secp256k1::Error),
    #[error("tweak is not below the curve order")]
    TweakOutOfRange,
    #[error("hkdf output length is invalid")]
    Expand,
    #[error("per-commitment secret: {0}")]
    Shachain(#[from] ShachainError),
}

impl From<secp256k1::scalar::OutOfRangeError> for KeyError {
    fn from(_: secp256k1::scalar::OutOfRangeError) -> Self {
        KeyError::TweakOutOfRange
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TxError {
    /// Amounts are in millisatoshi.
    #[error("insufficient funds: {required} msat required, {available} msat available")]
    InsufficientFunds { required: u64, available: u64 },
    #[error("the key does not appear in the redeem script")]
    KeyMismatch,
    #[error("htlc #{0} has no output in the commitment")]
    InvalidHtlcIndex(usize),
    #[error("transaction has no input #{0}")]
    InvalidInputIndex(usize),
    #[error("signature does not match")]
    InvalidSignature,
    #[error("amount overflow")]
    Overflow,
    #[error("{0}")]
    Key(#[from] KeyError),
}
