use channel::{ChannelSecrets, FundingTx, Side};
use dependencies::bitcoin::{OutPoint, Txid};
use dependencies::bitcoin_hashes::Hash;
use dependencies::secp256k1::ecdsa::Signature;
use dependencies::tracing::info;
use wire::{AcceptChannel, ChannelId, FundingCreated, FundingSigned, FundingTxid, Message, RawSignature};

use super::EstablishmentEngine;
use crate::candidate::{CandidateKey, CandidateState, ChannelCandidate, ChannelType, PartnerConfig, PartnerInfo};
use crate::error::{EstablishmentError, StoreError, ValidationError};

impl EstablishmentEngine {
    async fn pending_candidate(&self, key: &CandidateKey, expected: CandidateState) -> Result<ChannelCandidate, EstablishmentError> {
        let candidate = self
            .store
            .get(key)
            .await?
            .ok_or(EstablishmentError::UnknownChannel { peer: key.peer, id: key.id })?;
        if candidate.state != expected {
            return Err(EstablishmentError::protocol(format!(
                "channel {} is {:?}, expected {:?}",
                key.id, candidate.state, expected
            )));
        }
        Ok(candidate)
    }

    // The funding outpoint decides the channel id, it must not name a stored channel.
    async fn ensure_unused_channel_id(&self, key: &CandidateKey, channel_id: ChannelId) -> Result<(), EstablishmentError> {
        let target = CandidateKey::new(key.peer, channel_id);
        if target != *key && self.store.get(&target).await?.is_some() {
            return Err(EstablishmentError::protocol(format!(
                "funding outpoint of channel {} is already in use",
                channel_id
            )));
        }
        Ok(())
    }

    async fn move_to_channel_id(&self, key: &CandidateKey, candidate: ChannelCandidate) -> Result<(), EstablishmentError> {
        self.store.rekey(key, candidate).await.map_err(|err| match err {
            StoreError::Duplicate(id) => EstablishmentError::protocol(format!("channel {} is already stored", id)),
            other => EstablishmentError::Store(other),
        })
    }

    fn local_secrets(&self, candidate: &ChannelCandidate) -> Result<ChannelSecrets, EstablishmentError> {
        Ok(self.secrets.channel_secrets(candidate.key_index)?)
    }

    /// Checks the terms of `accept_channel` against what we proposed.
    fn validate_accept(&self, candidate: &ChannelCandidate, msg: &AcceptChannel) -> Result<(), ValidationError> {
        let local = &candidate.local.config;
        if msg.channel_reserve < msg.dust_limit {
            return Err(ValidationError::ReserveBelowDust {
                reserve: msg.channel_reserve.raw(),
                dust_limit: msg.dust_limit.raw(),
            });
        }
        if msg.channel_reserve < local.dust_limit {
            return Err(ValidationError::ReserveBelowDust {
                reserve: msg.channel_reserve.raw(),
                dust_limit: local.dust_limit.raw(),
            });
        }
        if msg.dust_limit > local.channel_reserve {
            return Err(ValidationError::DustAboveReserve {
                dust_limit: msg.dust_limit.raw(),
                reserve: local.channel_reserve.raw(),
            });
        }
        self.validate_to_self_delay(msg.csv_delay)?;
        if msg.minimum_depth > self.config.max_minimum_depth {
            return Err(ValidationError::MinimumDepthTooLarge {
                depth: msg.minimum_depth,
                max: self.config.max_minimum_depth,
            });
        }
        Self::validate_max_accepted_htlcs(msg.max_accepted_htlc_number)?;
        if let Some(record) = &msg.channel_type {
            if ChannelType::from_features(record) != Some(candidate.channel_type) {
                return Err(ValidationError::UnsupportedChannelType);
            }
        }
        Ok(())
    }

    /// `accept_channel` as the initiator: builds the funding transaction and
    /// signs the first commitment of the peer.
    pub(super) async fn accept_channel(&self, key: CandidateKey, msg: &AcceptChannel) -> Result<Vec<Message>, EstablishmentError> {
        let mut candidate = self.pending_candidate(&key, CandidateState::AwaitingAccept).await?;
        self.validate_accept(&candidate, msg)?;

        let remote = PartnerInfo::remote(PartnerConfig::from_accept_channel(msg), &msg.keys)?;
        candidate.remote = Some(remote);
        candidate.minimum_depth = msg.minimum_depth;

        let funding = FundingTx {
            inputs: candidate.funding_inputs.clone(),
            funding_amount: candidate.funding.raw(),
            local_funding_pubkey: candidate.local.basepoints.funding,
            remote_funding_pubkey: remote.basepoints.funding,
            change: candidate.change.clone(),
        }
        .build();
        let outpoint = funding.outpoint();
        let funding_txid = outpoint.txid.to_byte_array();
        let channel_id = ChannelId::from_funding_outpoint(&funding_txid, funding.output_index);
        self.ensure_unused_channel_id(&key, channel_id).await?;
        candidate.funding_outpoint = Some(outpoint);
        candidate.funding_tx = Some(funding.tx);

        let secrets = self.local_secrets(&candidate)?;
        let local_commitment = candidate.commit_tx(&self.secp, Side::Local)?.build()?;
        let remote_commitment = candidate.commit_tx(&self.secp, Side::Remote)?.build()?;
        let signature = remote_commitment.sign(&self.secp, &secrets.funding)?;

        candidate.local_commitment = Some(local_commitment.tx);
        candidate.remote_commitment = Some(remote_commitment.tx);
        candidate.channel_id = Some(channel_id);
        candidate.state = CandidateState::AwaitingFundingSigned;
        self.move_to_channel_id(&key, candidate).await?;

        info!(
            peer = %key.peer,
            temporary_channel_id = %key.id,
            channel_id = %channel_id,
            state = ?CandidateState::AwaitingFundingSigned,
            "funding_created sent"
        );
        Ok(vec![Message::FundingCreated(FundingCreated {
            temporary_channel_id: key.id,
            funding_txid: FundingTxid::from(funding_txid),
            output_index: funding.output_index,
            signature: RawSignature::from(signature),
        })])
    }

    /// `funding_created` as the responder: the peer signed our commitment,
    /// we sign theirs and the channel is established on our side.
    pub(super) async fn funding_created(&self, key: CandidateKey, msg: &FundingCreated) -> Result<Vec<Message>, EstablishmentError> {
        let mut candidate = self.pending_candidate(&key, CandidateState::AwaitingFundingCreated).await?;
        let remote_funding = candidate.remote_info()?.basepoints.funding;
        let their_signature: Signature = msg.signature.to_signature().map_err(channel::KeyError::from)?;

        let funding_txid = *msg.funding_txid.as_bytes();
        let channel_id = ChannelId::from_funding_outpoint(&funding_txid, msg.output_index);
        self.ensure_unused_channel_id(&key, channel_id).await?;
        candidate.funding_outpoint = Some(OutPoint {
            txid: Txid::from_byte_array(funding_txid),
            vout: u32::from(msg.output_index),
        });

        let local_commitment = candidate.commit_tx(&self.secp, Side::Local)?.build()?;
        local_commitment.verify(&self.secp, &their_signature, &remote_funding)?;

        let secrets = self.local_secrets(&candidate)?;
        let local_funding = candidate.local.basepoints.funding;
        let our_signature = local_commitment.sign(&self.secp, &secrets.funding)?;
        let remote_commitment = candidate.commit_tx(&self.secp, Side::Remote)?.build()?;
        let signature = remote_commitment.sign(&self.secp, &secrets.funding)?;

        candidate.local_commitment = Some(local_commitment.signed(
            (&local_funding, &our_signature),
            (&remote_funding, &their_signature),
        ));
        candidate.remote_commitment = Some(remote_commitment.tx);
        candidate.channel_id = Some(channel_id);
        candidate.state = CandidateState::Established;
        self.move_to_channel_id(&key, candidate).await?;

        info!(
            peer = %key.peer,
            temporary_channel_id = %key.id,
            channel_id = %channel_id,
            state = ?CandidateState::Established,
            "funding_signed sent, channel established"
        );
        Ok(vec![Message::FundingSigned(FundingSigned {
            channel_id,
            signature: RawSignature::from(signature),
        })])
    }

    /// `funding_signed` as the initiator, the funding transaction can be
    /// broadcast once this succeeds.
    pub(super) async fn funding_signed(&self, key: CandidateKey, msg: &FundingSigned) -> Result<Vec<Message>, EstablishmentError> {
        let mut candidate = self.pending_candidate(&key, CandidateState::AwaitingFundingSigned).await?;
        let remote_funding = candidate.remote_info()?.basepoints.funding;
        let their_signature: Signature = msg.signature.to_signature().map_err(channel::KeyError::from)?;

        let local_commitment = candidate.commit_tx(&self.secp, Side::Local)?.build()?;
        local_commitment.verify(&self.secp, &their_signature, &remote_funding)?;

        let secrets = self.local_secrets(&candidate)?;
        let local_funding = candidate.local.basepoints.funding;
        let our_signature = local_commitment.sign(&self.secp, &secrets.funding)?;
        candidate.local_commitment = Some(local_commitment.signed(
            (&local_funding, &our_signature),
            (&remote_funding, &their_signature),
        ));
        candidate.state = CandidateState::Established;
        self.store.upsert(candidate).await?;

        info!(
            peer = %key.peer,
            channel_id = %key.id,
            state = ?CandidateState::Established,
            "channel established, funding transaction can be broadcast"
        );
        Ok(Vec::new())
    }
}
