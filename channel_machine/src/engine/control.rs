use dependencies::tracing::{debug, info, warn};
use wire::feature::validate_compatible;
use wire::{ChannelId, Init, Message, Ping};

use super::{EstablishmentEngine, ProcessingOutput};
use crate::candidate::{CandidateKey, PeerId};
use crate::error::EstablishmentError;

impl EstablishmentEngine {
    /// The peer gave up on a channel, or on all of them with the all-zero id.
    /// Established channels are out of our hands and stay stored.
    pub(super) async fn peer_error(&self, peer: PeerId, msg: &wire::Error) -> Result<ProcessingOutput, EstablishmentError> {
        warn!(peer = %peer, channel_id = %msg.channel_id, reason = %msg.message(), "error from peer");

        let ids = if msg.channel_id.is_all() {
            self.store.pending_ids(&peer).await?
        } else {
            vec![msg.channel_id]
        };

        let mut discarded = 0;
        for id in ids {
            let key = CandidateKey::new(peer, id);
            let _guard = self.store.lock(key).await;
            if self.discard(&key).await? {
                info!(peer = %peer, channel_id = %id, "candidate discarded by peer");
                discarded += 1;
            }
        }

        if discarded == 0 && !msg.channel_id.is_all() {
            debug!(peer = %peer, channel_id = %msg.channel_id, "error names no pending channel");
            return Ok(ProcessingOutput::failure(Vec::new()));
        }
        Ok(ProcessingOutput::success(Vec::new()))
    }

    pub(super) fn ping(&self, peer: PeerId, msg: &Ping) -> ProcessingOutput {
        match msg.validate() {
            Ok(()) => ProcessingOutput::success(vec![Message::Pong(msg.pong())]),
            Err(err) => {
                debug!(peer = %peer, error = %err, "ping ignored");
                ProcessingOutput::failure(Vec::new())
            },
        }
    }

    /// Records what the peer supports, channels are opened only with peers
    /// whose features are known.
    pub(super) async fn init(&self, peer: PeerId, msg: &Init) -> Result<ProcessingOutput, EstablishmentError> {
        let features = msg.features();
        if let Err(err) = validate_compatible(&self.local_features, &features) {
            warn!(peer = %peer, error = %err, features = ?features, "incompatible features");
            let response = wire::Error::new(ChannelId::all(), &err.to_string());
            return Ok(ProcessingOutput::failure(vec![Message::Error(response)]));
        }
        self.peers.add_peer(peer, features).await?;
        info!(peer = %peer, "peer features recorded");
        Ok(ProcessingOutput::success(Vec::new()))
    }
}
