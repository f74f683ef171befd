use dependencies::bitcoin::absolute::LockTime;
use dependencies::bitcoin::transaction::Version;
use dependencies::bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};

use crate::commit::{CommitTx, Commitment, HtlcDirection};
use crate::error::TxError;
use crate::script::{p2wsh, to_local_script};

/// HTLC-timeout transaction for an offered HTLC, HTLC-success transaction
/// for an accepted one. Both spend the HTLC output of the commitment into
/// the delayed to_local shaped output of the commitment holder.
pub fn htlc_tx(commit_tx: &CommitTx, commitment: &Commitment, htlc_index: usize) -> Result<Transaction, TxError> {
    let htlc = commit_tx
        .htlcs
        .get(htlc_index)
        .ok_or(TxError::InvalidHtlcIndex(htlc_index))?;
    let vout = commitment
        .htlc_outputs
        .get(htlc_index)
        .cloned()
        .flatten()
        .ok_or(TxError::InvalidHtlcIndex(htlc_index))?;

    let lock_time = match htlc.direction {
        HtlcDirection::Offered => htlc.cltv_expiry,
        HtlcDirection::Accepted => 0,
    };
    let fee = htlc.second_stage_fee(commit_tx.feerate_per_kw, commit_tx.anchors);
    let value = htlc
        .amount_sat()
        .checked_sub(fee)
        .ok_or(TxError::InsufficientFunds {
            required: fee * 1000,
            available: htlc.amount_msat,
        })?;

    let keys = &commit_tx.keys;
    let script = to_local_script(&keys.revocation, commit_tx.to_self_delay, &keys.local_delayed);

    Ok(Transaction {
        version: Version::TWO,
        lock_time: LockTime::from_consensus(lock_time),
        input: vec![TxIn {
            previous_output: OutPoint {
                txid: commitment.txid(),
                vout,
            },
            script_sig: ScriptBuf::new(),
            sequence: Sequence(if commit_tx.anchors { 1 } else { 0 }),
            witness: Witness::new(),
        }],
        output: vec![TxOut {
            value: Amount::from_sat(value),
            script_pubkey: p2wsh(&script),
        }],
    })
}
