use dependencies::bitcoin::script::{Instruction, Script};
use dependencies::bitcoin::sighash::{EcdsaSighashType, SighashCache};
use dependencies::bitcoin::{Amount, Transaction, Witness};
use dependencies::bitcoin_hashes::Hash;
use dependencies::secp256k1::ecdsa::Signature;
use dependencies::secp256k1::{Message, PublicKey, Secp256k1, SecretKey, Signing, Verification};

use crate::error::TxError;

fn script_has_key(redeem_script: &Script, pubkey: &PublicKey) -> bool {
    let serialized = pubkey.serialize();
    redeem_script.instructions().any(|instruction| match instruction {
        Ok(Instruction::PushBytes(bytes)) => bytes.as_bytes() == &serialized[..],
        _ => false,
    })
}

// BIP 143 digest of the input spending a P2WSH output with SIGHASH_ALL.
fn sighash(tx: &Transaction, input_index: usize, redeem_script: &Script, amount: u64) -> Result<Message, TxError> {
    let mut cache = SighashCache::new(tx);
    let hash = cache
        .p2wsh_signature_hash(input_index, redeem_script, Amount::from_sat(amount), EcdsaSighashType::All)
        .map_err(|_| TxError::InvalidInputIndex(input_index))?;
    Ok(Message::from_digest(hash.to_byte_array()))
}

/// Signs the input spending `amount` satoshi locked by P2WSH of `redeem_script`.
/// The key must be one of the keys the script pushes.
pub fn sign_input<C: Signing>(
    secp: &Secp256k1<C>,
    tx: &Transaction,
    input_index: usize,
    redeem_script: &Script,
    amount: u64,
    key: &SecretKey,
) -> Result<Signature, TxError> {
    if !script_has_key(redeem_script, &PublicKey::from_secret_key(secp, key)) {
        return Err(TxError::KeyMismatch);
    }
    let message = sighash(tx, input_index, redeem_script, amount)?;
    Ok(secp.sign_ecdsa(&message, key))
}

pub fn verify_input<C: Verification>(
    secp: &Secp256k1<C>,
    tx: &Transaction,
    input_index: usize,
    redeem_script: &Script,
    amount: u64,
    signature: &Signature,
    pubkey: &PublicKey,
) -> Result<(), TxError> {
    if !script_has_key(redeem_script, pubkey) {
        return Err(TxError::KeyMismatch);
    }
    let message = sighash(tx, input_index, redeem_script, amount)?;
    secp.verify_ecdsa(&message, signature, pubkey)
        .map_err(|_| TxError::InvalidSignature)
}

fn with_sighash_all(signature: &Signature) -> Vec<u8> {
    let mut serialized = signature.serialize_der().to_vec();
    serialized.push(EcdsaSighashType::All as u8);
    serialized
}

/// Witness spending the 2-of-2 funding output. Signatures go in the order
/// of their keys in the script.
pub fn funding_witness(funding_script: &Script, a: (&PublicKey, &Signature), b: (&PublicKey, &Signature)) -> Witness {
    let (first, second) = if a.0.serialize() < b.0.serialize() { (a, b) } else { (b, a) };
    let mut witness = Witness::new();
    witness.push(Vec::<u8>::new());
    witness.push(with_sighash_all(first.1));
    witness.push(with_sighash_all(second.1));
    witness.push(funding_script.as_bytes());
    witness
}
