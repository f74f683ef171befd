#![forbid(unsafe_code)]

//! Channel establishment: the handshake from `open_channel` to
//! `funding_signed`, the stores it persists candidates in and the sources of
//! keys and randomness it draws from.

mod candidate;
mod config;
mod engine;
mod error;
mod peer;
mod random;
mod secrets;
mod store;

pub use self::candidate::{
    CandidateKey, CandidateState, ChannelCandidate, ChannelType, PartnerConfig, PartnerInfo, PeerId, Role,
    INITIAL_COMMITMENT_NUMBER,
};
pub use self::config::{ConfigError, EstablishmentConfig};
pub use self::engine::{EstablishmentEngine, OpenChannelRequest, PeerMessage, ProcessingOutput};
pub use self::error::{EstablishmentError, StoreError, ValidationError};
pub use self::peer::{InMemoryPeerDirectory, Peer, PeerDirectory};
pub use self::random::{RandomSource, ThreadRandom};
pub use self::secrets::{ChannelSecretSource, SeedSecretSource};
pub use self::store::{CandidateGuard, ChannelCandidateStore, InMemoryCandidateStore};
