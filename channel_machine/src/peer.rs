use dependencies::parking_lot::RwLock;
use wire::RawFeatureVector;

use async_trait::async_trait;

use std::collections::HashMap;

use super::candidate::PeerId;
use super::error::StoreError;

/// A connected node and the features it announced in `init`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Peer {
    pub node_id: PeerId,
    pub features: RawFeatureVector,
}

#[async_trait]
pub trait PeerDirectory: Send + Sync {
    /// Replaces the features of a known peer.
    async fn add_peer(&self, node_id: PeerId, features: RawFeatureVector) -> Result<(), StoreError>;

    async fn get_peer(&self, node_id: &PeerId) -> Result<Option<Peer>, StoreError>;
}

#[derive(Default)]
pub struct InMemoryPeerDirectory {
    peers: RwLock<HashMap<PeerId, Peer>>,
}

impl InMemoryPeerDirectory {
    pub fn new() -> Self {
        InMemoryPeerDirectory::default()
    }
}

#[async_trait]
impl PeerDirectory for InMemoryPeerDirectory {
    async fn add_peer(&self, node_id: PeerId, features: RawFeatureVector) -> Result<(), StoreError> {
        self.peers.write().insert(node_id, Peer { node_id, features });
        Ok(())
    }

    async fn get_peer(&self, node_id: &PeerId) -> Result<Option<Peer>, StoreError> {
        Ok(self.peers.read().get(node_id).cloned())
    }
}
