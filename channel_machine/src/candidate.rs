use channel::{obscuring_factor, Basepoints, ChannelSecrets, CommitTx, CommitmentKeys, KeyError, Side, TxError};
use dependencies::bitcoin::{OutPoint, Transaction, TxIn, TxOut};
use dependencies::secp256k1::{PublicKey, Secp256k1, Signing, Verification};
use wire::{
    AcceptChannel, ChannelFlags, ChannelId, ChannelKeys, CsvDelay, FeatureBit, Hash256, MilliSatoshi, OpenChannel,
    RawFeatureVector, RawPublicKey, Satoshi, SatoshiPerKiloWeight,
};

use super::error::EstablishmentError;

/// Node id of the peer.
pub type PeerId = PublicKey;

/// Commitment number of the first commitment of every channel.
pub const INITIAL_COMMITMENT_NUMBER: u64 = 0;

/// Where a candidate lives in the store: the temporary id until the funding
/// outpoint is known, the channel id afterwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct CandidateKey {
    pub peer: PeerId,
    pub id: ChannelId,
}

impl CandidateKey {
    pub fn new(peer: PeerId, id: ChannelId) -> Self {
        CandidateKey { peer, id }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Role {
    Initiator,
    Responder,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CandidateState {
    AwaitingAccept,
    AwaitingFundingCreated,
    AwaitingFundingSigned,
    Established,
    /// Never stored, the candidate is removed instead.
    Failed,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ChannelType {
    Legacy,
    StaticRemoteKey,
    Anchors,
}

impl ChannelType {
    pub fn static_remote_key(self) -> bool {
        self != ChannelType::Legacy
    }

    pub fn anchors(self) -> bool {
        self == ChannelType::Anchors
    }

    /// Value of the `channel_type` record.
    pub fn features(self) -> RawFeatureVector {
        match self {
            ChannelType::Legacy => RawFeatureVector::new(),
            ChannelType::StaticRemoteKey => RawFeatureVector::new().set_bit(FeatureBit::StaticRemoteKeyRequired),
            ChannelType::Anchors => RawFeatureVector::new()
                .set_bit(FeatureBit::StaticRemoteKeyRequired)
                .set_bit(FeatureBit::AnchorOutputsRequired),
        }
    }

    /// Only the exact sets of required bits are channel types.
    pub fn from_features(features: &RawFeatureVector) -> Option<Self> {
        [ChannelType::Legacy, ChannelType::StaticRemoteKey, ChannelType::Anchors]
            .iter()
            .cloned()
            .find(|channel_type| &channel_type.features() == features)
    }

    /// The best type both vectors support.
    pub fn negotiate(local: &RawFeatureVector, remote: &RawFeatureVector) -> Self {
        use wire::Feature::{AnchorOutputs, StaticRemoteKey};

        let both = |feature| local.supports(feature) && remote.supports(feature);
        if both(AnchorOutputs) && both(StaticRemoteKey) {
            ChannelType::Anchors
        } else if both(StaticRemoteKey) {
            ChannelType::StaticRemoteKey
        } else {
            ChannelType::Legacy
        }
    }
}

/// Limits one side announced. The limits apply to the other side, e.g.
/// `csv_delay` is the delay of the counterparty's to_local output.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PartnerConfig {
    pub dust_limit: Satoshi,
    pub max_in_flight: MilliSatoshi,
    pub channel_reserve: Satoshi,
    pub htlc_minimum: MilliSatoshi,
    pub csv_delay: CsvDelay,
    pub max_accepted_htlc_number: u16,
}

impl PartnerConfig {
    pub fn from_open_channel(msg: &OpenChannel) -> Self {
        PartnerConfig {
            dust_limit: msg.dust_limit,
            max_in_flight: msg.max_in_flight,
            channel_reserve: msg.channel_reserve,
            htlc_minimum: msg.htlc_minimum,
            csv_delay: msg.csv_delay,
            max_accepted_htlc_number: msg.max_accepted_htlc_number,
        }
    }

    pub fn from_accept_channel(msg: &AcceptChannel) -> Self {
        PartnerConfig {
            dust_limit: msg.dust_limit,
            max_in_flight: msg.max_in_flight,
            channel_reserve: msg.channel_reserve,
            htlc_minimum: msg.htlc_minimum,
            csv_delay: msg.csv_delay,
            max_accepted_htlc_number: msg.max_accepted_htlc_number,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PartnerInfo {
    pub config: PartnerConfig,
    pub basepoints: Basepoints,
    pub first_per_commitment_point: PublicKey,
}

impl PartnerInfo {
    pub fn local<C: Signing>(secp: &Secp256k1<C>, secrets: &ChannelSecrets, config: PartnerConfig) -> Result<Self, KeyError> {
        Ok(PartnerInfo {
            config,
            basepoints: secrets.basepoints(secp),
            first_per_commitment_point: secrets.per_commitment_point(secp, INITIAL_COMMITMENT_NUMBER)?,
        })
    }

    /// Announced keys must be valid points.
    pub fn remote(config: PartnerConfig, keys: &ChannelKeys) -> Result<Self, KeyError> {
        Ok(PartnerInfo {
            config,
            basepoints: Basepoints {
                funding: keys.funding.to_public_key()?,
                revocation: keys.revocation.to_public_key()?,
                payment: keys.payment.to_public_key()?,
                delayed_payment: keys.delayed_payment.to_public_key()?,
                htlc: keys.htlc.to_public_key()?,
            },
            first_per_commitment_point: keys.first_per_commitment.to_public_key()?,
        })
    }

    pub fn channel_keys(&self) -> ChannelKeys {
        ChannelKeys {
            funding: RawPublicKey::from(self.basepoints.funding),
            revocation: RawPublicKey::from(self.basepoints.revocation),
            payment: RawPublicKey::from(self.basepoints.payment),
            delayed_payment: RawPublicKey::from(self.basepoints.delayed_payment),
            htlc: RawPublicKey::from(self.basepoints.htlc),
            first_per_commitment: RawPublicKey::from(self.first_per_commitment_point),
        }
    }
}

/// A channel between the open proposal and the signed funding transaction.
#[derive(Debug, Clone)]
pub struct ChannelCandidate {
    pub peer: PeerId,
    pub temporary_channel_id: ChannelId,
    pub channel_id: Option<ChannelId>,
    pub role: Role,
    pub state: CandidateState,
    /// Index the local secrets are derived from.
    pub key_index: u64,

    pub chain_hash: Hash256,
    pub funding: Satoshi,
    pub push: MilliSatoshi,
    pub feerate: SatoshiPerKiloWeight,
    pub minimum_depth: u32,
    pub channel_type: ChannelType,
    pub flags: ChannelFlags,

    pub local: PartnerInfo,
    pub remote: Option<PartnerInfo>,

    /// Wallet inputs and change of the funding transaction, initiator only.
    pub funding_inputs: Vec<TxIn>,
    pub change: Option<TxOut>,
    pub funding_tx: Option<Transaction>,
    pub funding_outpoint: Option<OutPoint>,

    /// Our commitment, fully signed once the candidate is established.
    pub local_commitment: Option<Transaction>,
    /// The commitment we signed for the peer.
    pub remote_commitment: Option<Transaction>,
}

impl ChannelCandidate {
    pub fn id(&self) -> ChannelId {
        self.channel_id.unwrap_or(self.temporary_channel_id)
    }

    pub fn key(&self) -> CandidateKey {
        CandidateKey::new(self.peer, self.id())
    }

    pub fn is_established(&self) -> bool {
        self.state == CandidateState::Established
    }

    pub fn remote_info(&self) -> Result<&PartnerInfo, EstablishmentError> {
        self.remote
            .as_ref()
            .ok_or_else(|| EstablishmentError::protocol("remote keys are not known yet"))
    }

    fn funder_balance_msat(&self) -> Result<u64, TxError> {
        u64::from(self.funding)
            .checked_mul(1000)
            .and_then(|funding_msat| funding_msat.checked_sub(u64::from(self.push)))
            .ok_or(TxError::Overflow)
    }

    /// Terms of the first commitment held by `holder`. The initiator funds
    /// the channel and pays the fee.
    pub fn commit_tx<C: Verification>(&self, secp: &Secp256k1<C>, holder: Side) -> Result<CommitTx, EstablishmentError> {
        let remote = self.remote_info()?;
        let funding_outpoint = self
            .funding_outpoint
            .ok_or_else(|| EstablishmentError::protocol("funding outpoint is not known yet"))?;

        let (owner, counterparty) = match holder {
            Side::Local => (&self.local, remote),
            Side::Remote => (remote, &self.local),
        };
        let (opener, accepter) = match self.role {
            Role::Initiator => (&self.local, remote),
            Role::Responder => (remote, &self.local),
        };

        let funder_msat = self.funder_balance_msat()?;
        let push_msat = u64::from(self.push);
        let owner_is_funder = (holder == Side::Local) == (self.role == Role::Initiator);
        let (to_local_msat, to_remote_msat, funder) = if owner_is_funder {
            (funder_msat, push_msat, Side::Local)
        } else {
            (push_msat, funder_msat, Side::Remote)
        };

        let keys = CommitmentKeys::derive(
            secp,
            &owner.basepoints,
            &counterparty.basepoints,
            &owner.first_per_commitment_point,
            self.channel_type.static_remote_key(),
        )?;
        let obscuring = obscuring_factor(&opener.basepoints.payment, &accepter.basepoints.payment);

        Ok(CommitTx {
            funding_outpoint,
            funding_amount: u64::from(self.funding),
            local_funding_pubkey: owner.basepoints.funding,
            remote_funding_pubkey: counterparty.basepoints.funding,
            feerate_per_kw: u64::from(u32::from(self.feerate)),
            dust_limit_satoshi: u64::from(owner.config.dust_limit),
            to_local_msat,
            to_remote_msat,
            obscured_commit_number: obscuring ^ INITIAL_COMMITMENT_NUMBER,
            keys,
            to_self_delay: u16::from(counterparty.config.csv_delay),
            htlcs: Vec::new(),
            anchors: self.channel_type.anchors(),
            funder,
        })
    }
}
