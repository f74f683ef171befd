use dependencies::bitcoin::absolute::LockTime;
use dependencies::bitcoin::transaction::Version;
use dependencies::bitcoin::{Amount, OutPoint, ScriptBuf, Transaction, TxIn, TxOut};
use dependencies::secp256k1::PublicKey;

use crate::bip69;
use crate::script::{funding_script, p2wsh};

/// The funding transaction, built by the opener from its own wallet inputs.
#[derive(Clone, Debug)]
pub struct FundingTx {
    pub inputs: Vec<TxIn>,
    pub funding_amount: u64,
    pub local_funding_pubkey: PublicKey,
    pub remote_funding_pubkey: PublicKey,
    pub change: Option<TxOut>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Funding {
    pub tx: Transaction,
    pub output_index: u16,
    pub funding_script: ScriptBuf,
}

impl Funding {
    pub fn outpoint(&self) -> OutPoint {
        OutPoint {
            txid: self.tx.compute_txid(),
            vout: u32::from(self.output_index),
        }
    }
}

impl FundingTx {
    pub fn build(&self) -> Funding {
        let script = funding_script(&self.local_funding_pubkey, &self.remote_funding_pubkey);

        let mut output = vec![TxOut {
            value: Amount::from_sat(self.funding_amount),
            script_pubkey: p2wsh(&script),
        }];
        output.extend(self.change.iter().cloned());

        let mut tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: self.inputs.clone(),
            output,
        };
        let reordering = bip69::reorder_tx(&mut tx);

        // the funding output was the first one, there are at most two outputs
        let output_index = reordering.output_position(0).unwrap_or(0) as u16;

        Funding {
            tx,
            output_index,
            funding_script: script,
        }
    }
}
