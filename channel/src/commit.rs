use dependencies::bitcoin::absolute::LockTime;
use dependencies::bitcoin::transaction::Version;
use dependencies::bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness};
use dependencies::secp256k1::ecdsa::Signature;
use dependencies::secp256k1::{PublicKey, Secp256k1, SecretKey, Signing, Verification};

use crate::bip69::TransactionReordering;
use crate::derivation::{commitment_locktime, commitment_sequence};
use crate::error::TxError;
use crate::fee::{commitment_fee, htlc_success_fee, htlc_timeout_fee, ANCHOR_OUTPUT_VALUE};
use crate::keys::CommitmentKeys;
use crate::script::{
    anchor_script, funding_script, offered_htlc_script, p2wsh, received_htlc_script, to_local_script,
    to_remote_script_pubkey,
};
use crate::sign::{funding_witness, sign_input, verify_input};

/// Direction of an HTLC as seen by the holder of the commitment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HtlcDirection {
    Offered,
    Accepted,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Htlc {
    pub direction: HtlcDirection,
    pub amount_msat: u64,
    pub cltv_expiry: u32,
    pub payment_hash: [u8; 32],
}

impl Htlc {
    pub fn amount_sat(&self) -> u64 {
        self.amount_msat / 1000
    }

    /// Fee of the HTLC-timeout or HTLC-success transaction spending this HTLC.
    pub fn second_stage_fee(&self, feerate_per_kw: u64, anchors: bool) -> u64 {
        match self.direction {
            HtlcDirection::Offered => htlc_timeout_fee(feerate_per_kw, anchors),
            HtlcDirection::Accepted => htlc_success_fee(feerate_per_kw, anchors),
        }
    }

    pub fn is_trimmed(&self, dust_limit_satoshi: u64, feerate_per_kw: u64, anchors: bool) -> bool {
        self.amount_sat() < dust_limit_satoshi + self.second_stage_fee(feerate_per_kw, anchors)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Local,
    Remote,
}

/// Everything a commitment transaction is built from. `local` is the
/// holder of the commitment, the one who can broadcast it.
#[derive(Clone, Debug)]
pub struct CommitTx {
    pub funding_outpoint: OutPoint,
    pub funding_amount: u64,
    pub local_funding_pubkey: PublicKey,
    pub remote_funding_pubkey: PublicKey,

    pub feerate_per_kw: u64,
    pub dust_limit_satoshi: u64,

    pub to_local_msat: u64,
    pub to_remote_msat: u64,

    pub obscured_commit_number: u64,

    pub keys: CommitmentKeys,
    pub to_self_delay: u16,

    pub htlcs: Vec<Htlc>,
    pub anchors: bool,
    pub funder: Side,
}

/// A built commitment transaction, ready to be signed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commitment {
    pub tx: Transaction,
    pub funding_script: ScriptBuf,
    pub funding_amount: u64,
    /// Output index of every HTLC of the `CommitTx`, `None` if the HTLC was trimmed.
    pub htlc_outputs: Vec<Option<u32>>,
    pub fee: u64,
}

impl CommitTx {
    pub fn htlc_script(&self, htlc: &Htlc) -> ScriptBuf {
        match htlc.direction {
            HtlcDirection::Offered => offered_htlc_script(
                &self.keys.revocation,
                &self.keys.remote_htlc,
                &self.keys.local_htlc,
                &htlc.payment_hash,
                self.anchors,
            ),
            HtlcDirection::Accepted => received_htlc_script(
                &self.keys.revocation,
                &self.keys.remote_htlc,
                &self.keys.local_htlc,
                &htlc.payment_hash,
                htlc.cltv_expiry,
                self.anchors,
            ),
        }
    }

    pub fn untrimmed_htlcs(&self) -> Vec<usize> {
        self.htlcs
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_trimmed(self.dust_limit_satoshi, self.feerate_per_kw, self.anchors))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn fee(&self) -> u64 {
        commitment_fee(self.feerate_per_kw, self.untrimmed_htlcs().len(), self.anchors)
    }

    fn check_balances(&self) -> Result<(), TxError> {
        let funding_msat = self.funding_amount.checked_mul(1000).ok_or(TxError::Overflow)?;
        let total = self
            .htlcs
            .iter()
            .try_fold(self.to_local_msat, |acc, h| acc.checked_add(h.amount_msat))
            .and_then(|acc| acc.checked_add(self.to_remote_msat))
            .ok_or(TxError::Overflow)?;
        if total > funding_msat {
            return Err(TxError::InsufficientFunds {
                required: total,
                available: funding_msat,
            });
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Commitment, TxError> {
        self.check_balances()?;

        let untrimmed = self.untrimmed_htlcs();
        let fee = commitment_fee(self.feerate_per_kw, untrimmed.len(), self.anchors);

        // the funder pays the fee and both anchors from its own balance
        let anchors_value = if self.anchors { 2 * ANCHOR_OUTPUT_VALUE } else { 0 };
        let charge_msat = (fee + anchors_value).checked_mul(1000).ok_or(TxError::Overflow)?;
        let (mut to_local_msat, mut to_remote_msat) = (self.to_local_msat, self.to_remote_msat);
        let funder_msat = match self.funder {
            Side::Local => &mut to_local_msat,
            Side::Remote => &mut to_remote_msat,
        };
        if *funder_msat < charge_msat {
            return Err(TxError::InsufficientFunds {
                required: charge_msat,
                available: *funder_msat,
            });
        }
        *funder_msat -= charge_msat;

        let mut outputs = Vec::with_capacity(untrimmed.len() + 4);
        let mut cltv_tie_break = Vec::with_capacity(untrimmed.len() + 4);
        let mut htlc_of_output = Vec::with_capacity(untrimmed.len() + 4);

        for &i in &untrimmed {
            let h = &self.htlcs[i];
            outputs.push(TxOut {
                value: Amount::from_sat(h.amount_sat()),
                script_pubkey: p2wsh(&self.htlc_script(h)),
            });
            cltv_tie_break.push(h.cltv_expiry);
            htlc_of_output.push(Some(i));
        }

        let to_local = to_local_msat / 1000;
        let has_to_local = to_local >= self.dust_limit_satoshi;
        if has_to_local {
            let script = to_local_script(&self.keys.revocation, self.to_self_delay, &self.keys.local_delayed);
            outputs.push(TxOut {
                value: Amount::from_sat(to_local),
                script_pubkey: p2wsh(&script),
            });
            cltv_tie_break.push(0);
            htlc_of_output.push(None);
        }

        let to_remote = to_remote_msat / 1000;
        let has_to_remote = to_remote >= self.dust_limit_satoshi;
        if has_to_remote {
            outputs.push(TxOut {
                value: Amount::from_sat(to_remote),
                script_pubkey: to_remote_script_pubkey(&self.keys.remote_payment, self.anchors),
            });
            cltv_tie_break.push(0);
            htlc_of_output.push(None);
        }

        if self.anchors {
            let anchors = [
                (has_to_local, &self.local_funding_pubkey),
                (has_to_remote, &self.remote_funding_pubkey),
            ];
            for (has_output, funding_pubkey) in anchors.iter() {
                if *has_output || !untrimmed.is_empty() {
                    outputs.push(TxOut {
                        value: Amount::from_sat(ANCHOR_OUTPUT_VALUE),
                        script_pubkey: p2wsh(&anchor_script(funding_pubkey)),
                    });
                    cltv_tie_break.push(0);
                    htlc_of_output.push(None);
                }
            }
        }

        let mut tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::from_consensus(commitment_locktime(self.obscured_commit_number)),
            input: vec![TxIn {
                previous_output: self.funding_outpoint,
                script_sig: ScriptBuf::new(),
                sequence: Sequence(commitment_sequence(self.obscured_commit_number)),
                witness: Witness::new(),
            }],
            output: outputs,
        };

        let reordering = TransactionReordering::from_tx_to_bip69_with_tie_break(&tx, &cltv_tie_break);
        reordering.apply(&mut tx);

        let mut htlc_outputs = vec![None; self.htlcs.len()];
        for (position, &old) in reordering.outputs.iter().enumerate() {
            if let Some(i) = htlc_of_output[old as usize] {
                htlc_outputs[i] = Some(position as u32);
            }
        }

        Ok(Commitment {
            tx,
            funding_script: funding_script(&self.local_funding_pubkey, &self.remote_funding_pubkey),
            funding_amount: self.funding_amount,
            htlc_outputs,
            fee,
        })
    }
}

impl Commitment {
    pub fn txid(&self) -> Txid {
        self.tx.compute_txid()
    }

    pub fn sign<C: Signing>(&self, secp: &Secp256k1<C>, funding_key: &SecretKey) -> Result<Signature, TxError> {
        sign_input(secp, &self.tx, 0, &self.funding_script, self.funding_amount, funding_key)
    }

    pub fn verify<C: Verification>(&self, secp: &Secp256k1<C>, signature: &Signature, funding_pubkey: &PublicKey) -> Result<(), TxError> {
        verify_input(secp, &self.tx, 0, &self.funding_script, self.funding_amount, signature, funding_pubkey)
    }

    /// The broadcastable transaction carrying both funding signatures.
    pub fn signed(&self, local: (&PublicKey, &Signature), remote: (&PublicKey, &Signature)) -> Transaction {
        let mut tx = self.tx.clone();
        tx.input[0].witness = funding_witness(&self.funding_script, local, remote);
        tx
    }
}
