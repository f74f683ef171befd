use dependencies::bitcoin::absolute::LockTime;
use dependencies::bitcoin::transaction::Version;
use dependencies::bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};

use crate::bip69;
use crate::commit::Side;
use crate::error::TxError;

/// The mutual close transaction, it pays both balances to the scripts
/// exchanged in `shutdown`.
#[derive(Clone, Debug)]
pub struct ClosingTx {
    pub funding_outpoint: OutPoint,
    pub local_script: ScriptBuf,
    pub remote_script: ScriptBuf,
    pub to_local_msat: u64,
    pub to_remote_msat: u64,
    pub fee: u64,
    pub funder: Side,
    pub dust_limit_satoshi: u64,
}

impl ClosingTx {
    pub fn build(&self) -> Result<Transaction, TxError> {
        let fee_msat = self.fee.checked_mul(1000).ok_or(TxError::Overflow)?;
        let (mut to_local_msat, mut to_remote_msat) = (self.to_local_msat, self.to_remote_msat);
        let funder_msat = match self.funder {
            Side::Local => &mut to_local_msat,
            Side::Remote => &mut to_remote_msat,
        };
        if *funder_msat < fee_msat {
            return Err(TxError::InsufficientFunds {
                required: fee_msat,
                available: *funder_msat,
            });
        }
        *funder_msat -= fee_msat;

        let output = [(to_local_msat, &self.local_script), (to_remote_msat, &self.remote_script)]
            .iter()
            .map(|(msat, script)| (msat / 1000, *script))
            .filter(|(sat, _)| *sat >= self.dust_limit_satoshi)
            .map(|(sat, script)| TxOut {
                value: Amount::from_sat(sat),
                script_pubkey: script.clone(),
            })
            .collect();

        let mut tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: vec![TxIn {
                previous_output: self.funding_outpoint,
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output,
        };
        bip69::reorder_tx(&mut tx);
        Ok(tx)
    }
}
