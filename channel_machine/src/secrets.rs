use channel::{ChannelSecrets, KeyError};

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out the private keys of a channel. The candidate only keeps the
/// key index, secrets are derived again whenever a step needs them.
pub trait ChannelSecretSource: Send + Sync {
    fn new_key_index(&self) -> u64;

    fn channel_secrets(&self, key_index: u64) -> Result<ChannelSecrets, KeyError>;
}

/// Derives every channel from the node seed.
pub struct SeedSecretSource {
    node_seed: [u8; 32],
    next_index: AtomicU64,
}

impl SeedSecretSource {
    pub fn new(node_seed: [u8; 32]) -> Self {
        SeedSecretSource::starting_at(node_seed, 0)
    }

    /// `next_index` is the first index not used by a channel yet, e.g. restored from storage.
    pub fn starting_at(node_seed: [u8; 32], next_index: u64) -> Self {
        SeedSecretSource {
            node_seed,
            next_index: AtomicU64::new(next_index),
        }
    }
}

impl ChannelSecretSource for SeedSecretSource {
    fn new_key_index(&self) -> u64 {
        self.next_index.fetch_add(1, Ordering::SeqCst)
    }

    fn channel_secrets(&self, key_index: u64) -> Result<ChannelSecrets, KeyError> {
        ChannelSecrets::derive(&self.node_seed, key_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dependencies::secp256k1::Secp256k1;

    #[test]
    fn indices_are_not_reused() {
        let source = SeedSecretSource::starting_at([7; 32], 5);
        assert_eq!(source.new_key_index(), 5);
        assert_eq!(source.new_key_index(), 6);

        let secp = Secp256k1::new();
        let a = source.channel_secrets(5).unwrap().basepoints(&secp);
        let b = source.channel_secrets(6).unwrap().basepoints(&secp);
        assert_ne!(a.funding, b.funding);
        assert_eq!(a, ChannelSecrets::derive(&[7; 32], 5).unwrap().basepoints(&secp));
    }
}
