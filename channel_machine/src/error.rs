use binformat::WireError;
use channel::{KeyError, TxError};
use dependencies::secp256k1::PublicKey;
use wire::{ChannelId, FeatureError};

use thiserror::Error;

/// Terms of `open_channel` or `accept_channel` we refuse.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("the channel is proposed on another chain")]
    ChainHashMismatch,
    #[error("funding {funding} sat is below the minimum {minimum} sat")]
    FundingTooSmall { funding: u64, minimum: u64 },
    #[error("funding {funding} sat needs large channels")]
    FundingTooLarge { funding: u64 },
    #[error("push {push} msat exceeds the funding")]
    PushExceedsFunding { push: u64 },
    #[error("channel reserve {reserve} sat is below the dust limit {dust_limit} sat")]
    ReserveBelowDust { reserve: u64, dust_limit: u64 },
    #[error("dust limit {dust_limit} sat is above the channel reserve {reserve} sat")]
    DustAboveReserve { dust_limit: u64, reserve: u64 },
    #[error("to_self_delay {delay} is above the maximum {max}")]
    ToSelfDelayTooLarge { delay: u16, max: u16 },
    #[error("minimum depth {depth} is above the maximum {max}")]
    MinimumDepthTooLarge { depth: u32, max: u32 },
    #[error("max_accepted_htlcs {0} is out of range 1..=483")]
    MaxAcceptedHtlcs(u16),
    #[error("feerate {feerate} sat/kw is out of range {min}..={max}")]
    FeerateOutOfRange { feerate: u32, min: u32, max: u32 },
    #[error("the funder cannot pay the fee and the reserve: {required} msat required, {available} msat available")]
    FunderCannotAfford { required: u64, available: u64 },
    #[error("channel type is not supported")]
    UnsupportedChannelType,
    #[error("features: {0}")]
    Features(#[from] FeatureError),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum StoreError {
    #[error("channel {0} is already stored")]
    Duplicate(ChannelId),
    #[error("channel {0} is not stored")]
    NotFound(ChannelId),
    #[error("storage backend: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EstablishmentError {
    #[error("serialization: {0}")]
    Serialization(#[from] WireError),
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("unknown channel {id}")]
    UnknownChannel { peer: PublicKey, id: ChannelId },
    #[error("unknown peer {0}")]
    UnknownPeer(PublicKey),
    #[error("key: {0}")]
    Key(#[from] KeyError),
    #[error("transaction: {0}")]
    Transaction(#[from] TxError),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("no free temporary channel id after {attempts} attempts")]
    TemporaryIdExhausted { attempts: u32 },
}

impl EstablishmentError {
    pub(crate) fn protocol<S: Into<String>>(reason: S) -> Self {
        EstablishmentError::ProtocolViolation(reason.into())
    }

    /// The candidate of a failed step is dropped for these kinds, the others
    /// leave it as it was. Established channels are never dropped.
    pub fn discards_candidate(&self) -> bool {
        match self {
            EstablishmentError::ProtocolViolation(_)
            | EstablishmentError::Validation(_)
            | EstablishmentError::Key(_)
            | EstablishmentError::Transaction(_) => true,
            _ => false,
        }
    }
}
