use channel::fee::{commitment_fee, ANCHOR_OUTPUT_VALUE};
use dependencies::tracing::{debug, info, warn};
use wire::feature::negotiated;
use wire::{
    AcceptChannel, ChannelFlags, ChannelId, Feature, Message, MilliSatoshi, OpenChannel, RawFeatureVector, Satoshi,
    SatoshiPerKiloWeight, TlvStream,
};

use super::{EstablishmentEngine, OpenChannelRequest};
use crate::candidate::{
    CandidateKey, CandidateState, ChannelCandidate, ChannelType, PartnerConfig, PartnerInfo, PeerId, Role,
};
use crate::error::{EstablishmentError, ValidationError};
use crate::store::CandidateGuard;

/// Channels of this size and above need `option_support_large_channel`.
pub(super) const LARGE_CHANNEL_FUNDING: u64 = 1 << 24;

pub(super) const MAX_ACCEPTED_HTLCS: u16 = 483;

impl EstablishmentEngine {
    /// Proposes a channel to a peer we got `init` from. The returned
    /// `open_channel` carries a temporary id not pending with that peer.
    pub async fn start_open_channel(&self, request: OpenChannelRequest) -> Result<Message, EstablishmentError> {
        let peer_features = self.peer_features(&request.peer).await?;
        self.validate_funding(&peer_features, request.funding, request.push)?;
        self.validate_feerate(request.feerate)?;
        let channel_type = ChannelType::negotiate(&self.local_features, &peer_features);

        let key_index = self.secrets.new_key_index();
        let secrets = self.secrets.channel_secrets(key_index)?;
        let reserve = self.config.channel_reserve(request.funding);
        let local = PartnerInfo::local(&self.secp, &secrets, self.local_config(reserve))?;

        let (key, _guard) = self.fresh_temporary_id(request.peer).await?;
        let flags = if request.announce {
            ChannelFlags::FF_ANNOUNCE_CHANNEL
        } else {
            ChannelFlags::empty()
        };
        let upfront_shutdown_script = if negotiated(&self.local_features, &peer_features, Feature::UpfrontShutdownScript) {
            Some(Vec::new())
        } else {
            None
        };
        let channel_type_record = if negotiated(&self.local_features, &peer_features, Feature::ChannelType) {
            Some(channel_type.features())
        } else {
            None
        };

        let msg = OpenChannel {
            chain_hash: self.config.chain_hash,
            temporary_channel_id: key.id,
            funding: request.funding,
            push: request.push,
            dust_limit: local.config.dust_limit,
            max_in_flight: local.config.max_in_flight,
            channel_reserve: local.config.channel_reserve,
            htlc_minimum: local.config.htlc_minimum,
            feerate: request.feerate,
            csv_delay: local.config.csv_delay,
            max_accepted_htlc_number: local.config.max_accepted_htlc_number,
            keys: local.channel_keys(),
            flags,
            upfront_shutdown_script,
            channel_type: channel_type_record,
            extra: TlvStream::new(),
        };

        let candidate = ChannelCandidate {
            peer: request.peer,
            temporary_channel_id: key.id,
            channel_id: None,
            role: Role::Initiator,
            state: CandidateState::AwaitingAccept,
            key_index,
            chain_hash: self.config.chain_hash,
            funding: request.funding,
            push: request.push,
            feerate: request.feerate,
            minimum_depth: 0,
            channel_type,
            flags,
            local,
            remote: None,
            funding_inputs: request.funding_inputs,
            change: request.change,
            funding_tx: None,
            funding_outpoint: None,
            local_commitment: None,
            remote_commitment: None,
        };
        self.store.upsert(candidate).await?;

        info!(
            peer = %key.peer,
            temporary_channel_id = %key.id,
            funding = %request.funding,
            channel_type = ?channel_type,
            state = ?CandidateState::AwaitingAccept,
            "open_channel sent"
        );
        Ok(Message::OpenChannel(msg))
    }

    // The returned guard holds the key until the candidate is stored.
    async fn fresh_temporary_id(&self, peer: PeerId) -> Result<(CandidateKey, CandidateGuard), EstablishmentError> {
        let attempts = self.config.max_temporary_id_attempts;
        for attempt in 1..=attempts {
            let id = ChannelId::from(self.random.random_32());
            if id.is_all() {
                debug!(peer = %peer, attempt, "drawn the all-zero temporary channel id");
                continue;
            }
            let key = CandidateKey::new(peer, id);
            let guard = self.store.lock(key).await;
            if self.store.get(&key).await?.is_none() {
                return Ok((key, guard));
            }
            warn!(peer = %peer, temporary_channel_id = %id, attempt, "temporary channel id collision");
        }
        Err(EstablishmentError::TemporaryIdExhausted { attempts })
    }

    pub(super) fn local_config(&self, channel_reserve: Satoshi) -> PartnerConfig {
        PartnerConfig {
            dust_limit: self.config.dust_limit,
            max_in_flight: self.config.max_htlc_value_in_flight,
            channel_reserve,
            htlc_minimum: self.config.htlc_minimum,
            csv_delay: self.config.to_self_delay,
            max_accepted_htlc_number: self.config.max_accepted_htlcs,
        }
    }

    fn validate_funding(
        &self,
        peer_features: &RawFeatureVector,
        funding: Satoshi,
        push: MilliSatoshi,
    ) -> Result<(), ValidationError> {
        if funding < self.config.min_funding {
            return Err(ValidationError::FundingTooSmall {
                funding: funding.raw(),
                minimum: self.config.min_funding.raw(),
            });
        }
        if funding.raw() >= LARGE_CHANNEL_FUNDING && !negotiated(&self.local_features, peer_features, Feature::LargeChannels) {
            return Err(ValidationError::FundingTooLarge { funding: funding.raw() });
        }
        if push > MilliSatoshi::from(funding) {
            return Err(ValidationError::PushExceedsFunding { push: push.raw() });
        }
        Ok(())
    }

    fn validate_feerate(&self, feerate: SatoshiPerKiloWeight) -> Result<(), ValidationError> {
        if feerate < self.config.min_feerate || feerate > self.config.max_feerate {
            return Err(ValidationError::FeerateOutOfRange {
                feerate: feerate.raw(),
                min: self.config.min_feerate.raw(),
                max: self.config.max_feerate.raw(),
            });
        }
        Ok(())
    }

    pub(super) fn validate_max_accepted_htlcs(number: u16) -> Result<(), ValidationError> {
        if number == 0 || number > MAX_ACCEPTED_HTLCS {
            return Err(ValidationError::MaxAcceptedHtlcs(number));
        }
        Ok(())
    }

    pub(super) fn validate_to_self_delay(&self, delay: wire::CsvDelay) -> Result<(), ValidationError> {
        if delay > self.config.max_to_self_delay {
            return Err(ValidationError::ToSelfDelayTooLarge {
                delay: delay.raw(),
                max: self.config.max_to_self_delay.raw(),
            });
        }
        Ok(())
    }

    /// The type the opener asked for, or the best common one if it did not ask.
    fn open_channel_type(
        &self,
        peer_features: &RawFeatureVector,
        requested: Option<&RawFeatureVector>,
    ) -> Result<ChannelType, ValidationError> {
        let requested = match requested {
            Some(record) => ChannelType::from_features(record).ok_or(ValidationError::UnsupportedChannelType)?,
            None => return Ok(ChannelType::negotiate(&self.local_features, peer_features)),
        };
        let both = |feature| negotiated(&self.local_features, peer_features, feature);
        let supported = match requested {
            ChannelType::Legacy => true,
            ChannelType::StaticRemoteKey => both(Feature::StaticRemoteKey),
            ChannelType::Anchors => both(Feature::StaticRemoteKey) && both(Feature::AnchorOutputs),
        };
        if supported {
            Ok(requested)
        } else {
            Err(ValidationError::UnsupportedChannelType)
        }
    }

    /// Checks the terms of `open_channel` against our configuration, `reserve`
    /// is the reserve we are going to require from the opener.
    fn validate_open(
        &self,
        peer_features: &RawFeatureVector,
        msg: &OpenChannel,
        reserve: Satoshi,
    ) -> Result<ChannelType, ValidationError> {
        if msg.chain_hash != self.config.chain_hash {
            return Err(ValidationError::ChainHashMismatch);
        }
        let channel_type = self.open_channel_type(peer_features, msg.channel_type.as_ref())?;
        self.validate_funding(peer_features, msg.funding, msg.push)?;
        if msg.channel_reserve < msg.dust_limit {
            return Err(ValidationError::ReserveBelowDust {
                reserve: msg.channel_reserve.raw(),
                dust_limit: msg.dust_limit.raw(),
            });
        }
        if self.config.dust_limit > msg.channel_reserve {
            return Err(ValidationError::DustAboveReserve {
                dust_limit: self.config.dust_limit.raw(),
                reserve: msg.channel_reserve.raw(),
            });
        }
        self.validate_to_self_delay(msg.csv_delay)?;
        Self::validate_max_accepted_htlcs(msg.max_accepted_htlc_number)?;
        self.validate_feerate(msg.feerate)?;

        // the opener pays the fee of the first commitment and both anchors
        let mut fee = commitment_fee(u64::from(msg.feerate.raw()), 0, channel_type.anchors());
        if channel_type.anchors() {
            fee += 2 * ANCHOR_OUTPUT_VALUE;
        }
        let required = (fee + reserve.raw()).saturating_mul(1000);
        let available = msg.funding.raw().saturating_mul(1000).saturating_sub(msg.push.raw());
        if required > available {
            return Err(ValidationError::FunderCannotAfford { required, available });
        }
        Ok(channel_type)
    }

    /// `open_channel` as the responder.
    pub(super) async fn open_channel(&self, peer: PeerId, msg: &OpenChannel) -> Result<Vec<Message>, EstablishmentError> {
        let key = CandidateKey::new(peer, msg.temporary_channel_id);
        if key.id.is_all() {
            return Err(EstablishmentError::protocol("temporary channel id is all zero"));
        }
        if self.store.get(&key).await?.is_some() {
            return Err(EstablishmentError::protocol("temporary channel id is already in use"));
        }

        let peer_features = self.peer_features(&peer).await?;
        let reserve = self.config.channel_reserve(msg.funding).max(msg.dust_limit);
        let channel_type = self.validate_open(&peer_features, msg, reserve)?;

        let remote = PartnerInfo::remote(PartnerConfig::from_open_channel(msg), &msg.keys)?;
        let key_index = self.secrets.new_key_index();
        let secrets = self.secrets.channel_secrets(key_index)?;
        let local = PartnerInfo::local(&self.secp, &secrets, self.local_config(reserve))?;

        let upfront_shutdown_script = if negotiated(&self.local_features, &peer_features, Feature::UpfrontShutdownScript) {
            Some(Vec::new())
        } else {
            None
        };
        let accept = AcceptChannel {
            temporary_channel_id: key.id,
            dust_limit: local.config.dust_limit,
            max_in_flight: local.config.max_in_flight,
            channel_reserve: local.config.channel_reserve,
            htlc_minimum: local.config.htlc_minimum,
            minimum_depth: self.config.minimum_depth,
            csv_delay: local.config.csv_delay,
            max_accepted_htlc_number: local.config.max_accepted_htlc_number,
            keys: local.channel_keys(),
            upfront_shutdown_script,
            channel_type: msg.channel_type.clone(),
            extra: TlvStream::new(),
        };

        let candidate = ChannelCandidate {
            peer,
            temporary_channel_id: key.id,
            channel_id: None,
            role: Role::Responder,
            state: CandidateState::AwaitingFundingCreated,
            key_index,
            chain_hash: msg.chain_hash,
            funding: msg.funding,
            push: msg.push,
            feerate: msg.feerate,
            minimum_depth: self.config.minimum_depth,
            channel_type,
            flags: msg.flags,
            local,
            remote: Some(remote),
            funding_inputs: Vec::new(),
            change: None,
            funding_tx: None,
            funding_outpoint: None,
            local_commitment: None,
            remote_commitment: None,
        };
        self.store.upsert(candidate).await?;

        info!(
            peer = %peer,
            temporary_channel_id = %key.id,
            funding = %msg.funding,
            channel_type = ?channel_type,
            state = ?CandidateState::AwaitingFundingCreated,
            "accept_channel sent"
        );
        Ok(vec![Message::AcceptChannel(accept)])
    }
}
