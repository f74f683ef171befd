#![forbid(unsafe_code)]

//! Key derivation, scripts and transactions of BOLT 3, everything a channel
//! needs to put its first commitment on chain.

pub mod bip69;
mod closing;
mod commit;
mod derivation;
mod error;
pub mod fee;
mod funding;
mod htlc;
mod keys;
pub mod script;
mod sign;

#[cfg(test)]
mod test_vectors;

pub use self::closing::ClosingTx;
pub use self::commit::{CommitTx, Commitment, Htlc, HtlcDirection, Side};
pub use self::derivation::{
    commitment_locktime, commitment_sequence, derive_privkey, derive_pubkey, derive_revocation_privkey,
    derive_revocation_pubkey, obscuring_factor,
};
pub use self::error::{KeyError, TxError};
pub use self::funding::{Funding, FundingTx};
pub use self::htlc::htlc_tx;
pub use self::keys::{per_channel_seed, Basepoints, ChannelSecrets, CommitmentKeys};
pub use self::sign::{funding_witness, sign_input, verify_input};
