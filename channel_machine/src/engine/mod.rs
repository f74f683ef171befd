//! The establishment engine drives a channel from `open_channel` to the
//! exchange of the first commitment signatures.
//!
//! Initiator and responder run the same engine:
//!
//! ```text
//! Initiator --- OpenChannel    --->  Responder
//! Initiator <-- AcceptChannel  ---   Responder
//! Initiator --- FundingCreated --->  Responder
//! Initiator <-- FundingSigned  ---   Responder
//! ```
//!
//! Every step runs under the store lock of its candidate and ends with a
//! single write, so a failed or dropped step leaves the stored candidate as
//! it was.

mod control;
mod funding;
mod open;


use dependencies::bitcoin::{TxIn, TxOut};
use dependencies::secp256k1::{All, Secp256k1};
use dependencies::tracing::{debug, warn};
use wire::{FeatureBit, Message, MilliSatoshi, RawFeatureVector, Satoshi, SatoshiPerKiloWeight};

use std::sync::Arc;

use super::candidate::{CandidateKey, PeerId};
use super::config::EstablishmentConfig;
use super::error::EstablishmentError;
use super::peer::PeerDirectory;
use super::random::{RandomSource, ThreadRandom};
use super::secrets::ChannelSecretSource;
use super::store::ChannelCandidateStore;

/// What the wallet provides to open a channel with `peer`.
#[derive(Debug, Clone)]
pub struct OpenChannelRequest {
    pub peer: PeerId,
    pub funding: Satoshi,
    pub push: MilliSatoshi,
    pub feerate: SatoshiPerKiloWeight,
    pub announce: bool,
    /// Inputs of the funding transaction, signed by the wallet later.
    pub funding_inputs: Vec<TxIn>,
    pub change: Option<TxOut>,
}

/// A decoded message and the node it came from.
#[derive(Debug, Clone)]
pub struct PeerMessage {
    pub peer: PeerId,
    pub message: Message,
}

impl PeerMessage {
    pub fn new(peer: PeerId, message: Message) -> Self {
        PeerMessage { peer, message }
    }
}

/// Messages to send back to the peer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProcessingOutput {
    pub success: bool,
    pub responses: Vec<Message>,
}

impl ProcessingOutput {
    pub fn success(responses: Vec<Message>) -> Self {
        ProcessingOutput {
            success: true,
            responses,
        }
    }

    pub fn failure(responses: Vec<Message>) -> Self {
        ProcessingOutput {
            success: false,
            responses,
        }
    }
}

pub struct EstablishmentEngine {
    config: EstablishmentConfig,
    local_features: RawFeatureVector,
    store: Arc<dyn ChannelCandidateStore>,
    peers: Arc<dyn PeerDirectory>,
    secrets: Arc<dyn ChannelSecretSource>,
    random: Arc<dyn RandomSource>,
    secp: Secp256k1<All>,
}

impl EstablishmentEngine {
    /// Features announced in `init` unless replaced with `with_features`.
    pub fn default_features() -> RawFeatureVector {
        RawFeatureVector::new()
            .set_bit(FeatureBit::StaticRemoteKeyOptional)
            .set_bit(FeatureBit::AnchorOutputsOptional)
            .set_bit(FeatureBit::LargeChannelsOptional)
            .set_bit(FeatureBit::ChannelTypeOptional)
    }

    pub fn new(
        config: EstablishmentConfig,
        store: Arc<dyn ChannelCandidateStore>,
        peers: Arc<dyn PeerDirectory>,
        secrets: Arc<dyn ChannelSecretSource>,
    ) -> Self {
        EstablishmentEngine {
            config,
            local_features: Self::default_features(),
            store,
            peers,
            secrets,
            random: Arc::new(ThreadRandom),
            secp: Secp256k1::new(),
        }
    }

    pub fn with_features(self, local_features: RawFeatureVector) -> Self {
        EstablishmentEngine { local_features, ..self }
    }

    pub fn with_random(self, random: Arc<dyn RandomSource>) -> Self {
        EstablishmentEngine { random, ..self }
    }

    pub fn config(&self) -> &EstablishmentConfig {
        &self.config
    }

    pub fn local_features(&self) -> &RawFeatureVector {
        &self.local_features
    }

    /// Handles one message of the peer. `Err` is returned only when the
    /// store fails, every other failure is reported to the peer.
    pub async fn process_message(&self, msg: PeerMessage) -> Result<ProcessingOutput, EstablishmentError> {
        let PeerMessage { peer, message } = msg;
        debug!(peer = %peer, kind = message.type_name(), "processing message");

        match message {
            Message::OpenChannel(msg) => {
                let key = CandidateKey::new(peer, msg.temporary_channel_id);
                let _guard = self.store.lock(key).await;
                let result = self.open_channel(peer, &msg).await;
                self.conclude(key, result).await
            },
            Message::AcceptChannel(msg) => {
                let key = CandidateKey::new(peer, msg.temporary_channel_id);
                let _guard = self.store.lock(key).await;
                let result = self.accept_channel(key, &msg).await;
                self.conclude(key, result).await
            },
            Message::FundingCreated(msg) => {
                let key = CandidateKey::new(peer, msg.temporary_channel_id);
                let _guard = self.store.lock(key).await;
                let result = self.funding_created(key, &msg).await;
                self.conclude(key, result).await
            },
            Message::FundingSigned(msg) => {
                let key = CandidateKey::new(peer, msg.channel_id);
                let _guard = self.store.lock(key).await;
                let result = self.funding_signed(key, &msg).await;
                self.conclude(key, result).await
            },
            Message::Error(msg) => self.peer_error(peer, &msg).await,
            Message::Ping(msg) => Ok(self.ping(peer, &msg)),
            Message::Init(msg) => self.init(peer, &msg).await,
            other => {
                debug!(peer = %peer, kind = other.type_name(), "message is not part of channel establishment");
                Ok(ProcessingOutput::failure(Vec::new()))
            },
        }
    }

    // Called with the lock of `key` held.
    async fn conclude(
        &self,
        key: CandidateKey,
        result: Result<Vec<Message>, EstablishmentError>,
    ) -> Result<ProcessingOutput, EstablishmentError> {
        match result {
            Ok(responses) => Ok(ProcessingOutput::success(responses)),
            Err(EstablishmentError::Store(err)) => Err(EstablishmentError::Store(err)),
            Err(err) => {
                if err.discards_candidate() && self.discard(&key).await? {
                    warn!(peer = %key.peer, channel_id = %key.id, error = %err, "candidate discarded");
                } else {
                    warn!(peer = %key.peer, channel_id = %key.id, error = %err, "message rejected");
                }
                let response = wire::Error::new(key.id, &err.to_string());
                Ok(ProcessingOutput::failure(vec![Message::Error(response)]))
            },
        }
    }

    // Removes the candidate under `key` unless it is established.
    async fn discard(&self, key: &CandidateKey) -> Result<bool, EstablishmentError> {
        match self.store.get(key).await? {
            Some(ref candidate) if !candidate.is_established() => {
                self.store.remove(key).await?;
                Ok(true)
            },
            _ => Ok(false),
        }
    }

    async fn peer_features(&self, peer: &PeerId) -> Result<RawFeatureVector, EstablishmentError> {
        self.peers
            .get_peer(peer)
            .await?
            .map(|p| p.features)
            .ok_or(EstablishmentError::UnknownPeer(*peer))
    }
}
