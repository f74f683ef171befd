use dependencies::parking_lot::Mutex;
use wire::ChannelId;

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use std::collections::HashMap;
use std::sync::Arc;

use super::candidate::{CandidateKey, ChannelCandidate, PeerId};
use super::error::StoreError;

/// Held while a step reads and writes one candidate.
pub type CandidateGuard = OwnedMutexGuard<()>;

/// Persistence of the channel candidates. Steps for the same key are
/// serialized by `lock`, different keys proceed in parallel.
#[async_trait]
pub trait ChannelCandidateStore: Send + Sync {
    /// Waits until no other step holds the key. Locking a key nothing is
    /// stored under is allowed, it reserves the key.
    async fn lock(&self, key: CandidateKey) -> CandidateGuard;

    async fn get(&self, key: &CandidateKey) -> Result<Option<ChannelCandidate>, StoreError>;

    async fn upsert(&self, candidate: ChannelCandidate) -> Result<(), StoreError>;

    async fn remove(&self, key: &CandidateKey) -> Result<Option<ChannelCandidate>, StoreError>;

    /// Ids of the candidates of the peer that are not established yet.
    async fn pending_ids(&self, peer: &PeerId) -> Result<Vec<ChannelId>, StoreError>;

    /// Moves the candidate from `old` to its own key in one step.
    async fn rekey(&self, old: &CandidateKey, candidate: ChannelCandidate) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct InMemoryCandidateStore {
    candidates: Mutex<HashMap<CandidateKey, ChannelCandidate>>,
    locks: Mutex<HashMap<CandidateKey, Arc<AsyncMutex<()>>>>,
}

impl InMemoryCandidateStore {
    pub fn new() -> Self {
        InMemoryCandidateStore::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.lock().is_empty()
    }
}

#[async_trait]
impl ChannelCandidateStore for InMemoryCandidateStore {
    async fn lock(&self, key: CandidateKey) -> CandidateGuard {
        let mutex = {
            let mut locks = self.locks.lock();
            // nobody waits on these
            locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
            locks.entry(key).or_insert_with(Default::default).clone()
        };
        mutex.lock_owned().await
    }

    async fn get(&self, key: &CandidateKey) -> Result<Option<ChannelCandidate>, StoreError> {
        Ok(self.candidates.lock().get(key).cloned())
    }

    async fn upsert(&self, candidate: ChannelCandidate) -> Result<(), StoreError> {
        self.candidates.lock().insert(candidate.key(), candidate);
        Ok(())
    }

    async fn remove(&self, key: &CandidateKey) -> Result<Option<ChannelCandidate>, StoreError> {
        Ok(self.candidates.lock().remove(key))
    }

    async fn pending_ids(&self, peer: &PeerId) -> Result<Vec<ChannelId>, StoreError> {
        let candidates = self.candidates.lock();
        let mut ids = candidates
            .iter()
            .filter(|&(key, candidate)| &key.peer == peer && !candidate.is_established())
            .map(|(key, _)| key.id)
            .collect::<Vec<_>>();
        ids.sort();
        Ok(ids)
    }

    async fn rekey(&self, old: &CandidateKey, candidate: ChannelCandidate) -> Result<(), StoreError> {
        let new = candidate.key();
        let mut candidates = self.candidates.lock();
        if &new != old && candidates.contains_key(&new) {
            return Err(StoreError::Duplicate(new.id));
        }
        if candidates.remove(old).is_none() {
            return Err(StoreError::NotFound(old.id));
        }
        candidates.insert(new, candidate);
        Ok(())
    }
}
