use dependencies::bitcoin_hashes::{sha256, Hash, HashEngine};
use dependencies::secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey, Signing, Verification};

use crate::error::KeyError;

fn sha256_of_pair(first: &PublicKey, second: &PublicKey) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    engine.input(&first.serialize());
    engine.input(&second.serialize());
    sha256::Hash::from_engine(engine).to_byte_array()
}

fn tweak(first: &PublicKey, second: &PublicKey) -> Result<Scalar, KeyError> {
    Scalar::from_be_bytes(sha256_of_pair(first, second)).map_err(KeyError::from)
}

// pubkey = basepoint + SHA256(per_commitment_point || basepoint) * G
pub fn derive_pubkey<C: Verification>(
    secp: &Secp256k1<C>,
    base_point: &PublicKey,
    per_commitment_point: &PublicKey,
) -> Result<PublicKey, KeyError> {
    let t = tweak(per_commitment_point, base_point)?;
    base_point.add_exp_tweak(secp, &t).map_err(KeyError::from)
}

// privkey = basepoint_secret + SHA256(per_commitment_point || basepoint)
pub fn derive_privkey<C: Signing>(
    secp: &Secp256k1<C>,
    base_point_secret: &SecretKey,
    per_commitment_point: &PublicKey,
) -> Result<SecretKey, KeyError> {
    let base_point = PublicKey::from_secret_key(secp, base_point_secret);
    let t = tweak(per_commitment_point, &base_point)?;
    base_point_secret.add_tweak(&t).map_err(KeyError::from)
}

// revocation_pubkey = revocation_basepoint * SHA256(revocation_basepoint || per_commitment_point)
//      + per_commitment_point * SHA256(per_commitment_point || revocation_basepoint)
pub fn derive_revocation_pubkey<C: Verification>(
    secp: &Secp256k1<C>,
    revocation_base_point: &PublicKey,
    per_commitment_point: &PublicKey,
) -> Result<PublicKey, KeyError> {
    let h1 = tweak(revocation_base_point, per_commitment_point)?;
    let h2 = tweak(per_commitment_point, revocation_base_point)?;

    let pk1 = revocation_base_point.mul_tweak(secp, &h1)?;
    let pk2 = per_commitment_point.mul_tweak(secp, &h2)?;
    pk1.combine(&pk2).map_err(KeyError::from)
}

// revocationprivkey = revocation_basepoint_secret * SHA256(revocation_basepoint || per_commitment_point)
//        + per_commitment_secret * SHA256(per_commitment_point || revocation_basepoint)
pub fn derive_revocation_privkey<C: Signing>(
    secp: &Secp256k1<C>,
    revocation_base_point_secret: &SecretKey,
    per_commitment_secret: &SecretKey,
) -> Result<SecretKey, KeyError> {
    let revocation_base_point = PublicKey::from_secret_key(secp, revocation_base_point_secret);
    let per_commitment_point = PublicKey::from_secret_key(secp, per_commitment_secret);

    let h1 = tweak(&revocation_base_point, &per_commitment_point)?;
    let h2 = tweak(&per_commitment_point, &revocation_base_point)?;

    let sk1 = revocation_base_point_secret.mul_tweak(&h1)?;
    let sk2 = per_commitment_secret.mul_tweak(&h2)?;
    sk1.add_tweak(&Scalar::from(sk2)).map_err(KeyError::from)
}

/// The 48-bit number both parties XOR the commitment number with, derived
/// from the payment basepoints of the opener and the accepter in this order.
pub fn obscuring_factor(opener_payment_basepoint: &PublicKey, accepter_payment_basepoint: &PublicKey) -> u64 {
    let h = sha256_of_pair(opener_payment_basepoint, accepter_payment_basepoint);

    h[26..]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

// upper 8 bits are 0x80,
// lower 24 bits are upper 24 bits of the obscured commitment transaction number
pub fn commitment_sequence(obscured_commitment_number: u64) -> u32 {
    (0x80 << 24) | ((obscured_commitment_number >> 24) & 0xFF_FFFF) as u32
}

// upper 8 bits are 0x20,
// lower 24 bits are the lower 24 bits of the obscured commitment transaction number
pub fn commitment_locktime(obscured_commitment_number: u64) -> u32 {
    (0x20 << 24) | (obscured_commitment_number & 0xFF_FFFF) as u32
}
