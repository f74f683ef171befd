use dependencies::hkdf::Hkdf;
use dependencies::secp256k1::{PublicKey, Secp256k1, SecretKey, Signing, Verification};
use dependencies::sha2::Sha256;
use shachain::RevocationProducer;

use crate::derivation::{derive_pubkey, derive_revocation_pubkey};
use crate::error::KeyError;

const PER_CHANNEL_SEED_INFO: &[u8] = b"per-channel seed";

fn expand(hk: &Hkdf<Sha256>, info: &[u8]) -> Result<[u8; 32], KeyError> {
    let mut okm = [0u8; 32];
    hk.expand(info, &mut okm).map_err(|_| KeyError::Expand)?;
    Ok(okm)
}

/// Seed of the channel number `key_index`, every channel of the node gets
/// its own seed so the secrets of one channel tell nothing about the others.
pub fn per_channel_seed(node_seed: &[u8; 32], key_index: u64) -> Result<[u8; 32], KeyError> {
    let hk = Hkdf::<Sha256>::new(Some(&key_index.to_be_bytes()), node_seed);
    expand(&hk, PER_CHANNEL_SEED_INFO)
}

/// The private side of a channel: basepoint secrets and the shachain seed
/// per-commitment secrets are produced from.
#[derive(Clone)]
pub struct ChannelSecrets {
    pub funding: SecretKey,
    pub revocation_base: SecretKey,
    pub payment_base: SecretKey,
    pub delayed_payment_base: SecretKey,
    pub htlc_base: SecretKey,
    producer: RevocationProducer,
}

impl ChannelSecrets {
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, KeyError> {
        let hk = Hkdf::<Sha256>::new(None, seed);
        let key = |info: &[u8]| -> Result<SecretKey, KeyError> {
            let bytes = expand(&hk, info)?;
            SecretKey::from_slice(&bytes).map_err(KeyError::from)
        };

        Ok(ChannelSecrets {
            funding: key(b"funding key")?,
            revocation_base: key(b"revocation base key")?,
            payment_base: key(b"payment base key")?,
            delayed_payment_base: key(b"delayed payment base key")?,
            htlc_base: key(b"htlc base key")?,
            producer: RevocationProducer::new(expand(&hk, b"shachain seed")?),
        })
    }

    pub fn derive(node_seed: &[u8; 32], key_index: u64) -> Result<Self, KeyError> {
        Self::from_seed(&per_channel_seed(node_seed, key_index)?)
    }

    pub fn basepoints<C: Signing>(&self, secp: &Secp256k1<C>) -> Basepoints {
        Basepoints {
            funding: PublicKey::from_secret_key(secp, &self.funding),
            revocation: PublicKey::from_secret_key(secp, &self.revocation_base),
            payment: PublicKey::from_secret_key(secp, &self.payment_base),
            delayed_payment: PublicKey::from_secret_key(secp, &self.delayed_payment_base),
            htlc: PublicKey::from_secret_key(secp, &self.htlc_base),
        }
    }

    pub fn per_commitment_secret(&self, commitment_number: u64) -> Result<SecretKey, KeyError> {
        self.producer
            .secret_key_at_index(commitment_number)
            .map_err(KeyError::from)
    }

    pub fn per_commitment_point<C: Signing>(&self, secp: &Secp256k1<C>, commitment_number: u64) -> Result<PublicKey, KeyError> {
        self.producer
            .point_at_index(secp, commitment_number)
            .map_err(KeyError::from)
    }
}

/// The public keys a party announces in `open_channel` or `accept_channel`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Basepoints {
    pub funding: PublicKey,
    pub revocation: PublicKey,
    pub payment: PublicKey,
    pub delayed_payment: PublicKey,
    pub htlc: PublicKey,
}

/// Keys of one commitment transaction. `local` is the party who holds
/// and may broadcast the commitment, `remote` is the counterparty.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CommitmentKeys {
    pub revocation: PublicKey,
    pub local_delayed: PublicKey,
    pub local_htlc: PublicKey,
    pub remote_htlc: PublicKey,
    pub remote_payment: PublicKey,
}

impl CommitmentKeys {
    /// With `static_remote_key` the to_remote output pays to the remote
    /// payment basepoint itself instead of a per-commitment key.
    pub fn derive<C: Verification>(
        secp: &Secp256k1<C>,
        local: &Basepoints,
        remote: &Basepoints,
        per_commitment_point: &PublicKey,
        static_remote_key: bool,
    ) -> Result<Self, KeyError> {
        let remote_payment = if static_remote_key {
            remote.payment
        } else {
            derive_pubkey(secp, &remote.payment, per_commitment_point)?
        };
        Ok(CommitmentKeys {
            revocation: derive_revocation_pubkey(secp, &remote.revocation, per_commitment_point)?,
            local_delayed: derive_pubkey(secp, &local.delayed_payment, per_commitment_point)?,
            local_htlc: derive_pubkey(secp, &local.htlc, per_commitment_point)?,
            remote_htlc: derive_pubkey(secp, &remote.htlc, per_commitment_point)?,
            remote_payment,
        })
    }
}
