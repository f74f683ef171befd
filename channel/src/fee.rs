// Expected weights of the transactions, used to calculate the fees, see
// https://github.com/lightning/bolts/blob/master/03-transactions.md#fee-calculation
pub const BASE_COMMITMENT_WEIGHT: u64 = 724;
pub const BASE_COMMITMENT_WEIGHT_ANCHORS: u64 = 1124;
pub const PER_HTLC_COMMITMENT_WEIGHT: u64 = 172;
pub const HTLC_TIMEOUT_WEIGHT: u64 = 663;
pub const HTLC_TIMEOUT_WEIGHT_ANCHORS: u64 = 666;
pub const HTLC_SUCCESS_WEIGHT: u64 = 703;
pub const HTLC_SUCCESS_WEIGHT_ANCHORS: u64 = 706;

/// Value of each of the two anchor outputs, in satoshi.
pub const ANCHOR_OUTPUT_VALUE: u64 = 330;

fn fee_for_weight(feerate_per_kw: u64, weight: u64) -> u64 {
    feerate_per_kw.saturating_mul(weight) / 1000
}

pub fn commitment_weight(untrimmed_htlcs: usize, anchors: bool) -> u64 {
    let base = if anchors {
        BASE_COMMITMENT_WEIGHT_ANCHORS
    } else {
        BASE_COMMITMENT_WEIGHT
    };
    base + PER_HTLC_COMMITMENT_WEIGHT * untrimmed_htlcs as u64
}

/// Fee of the commitment transaction in satoshi, rounded down.
pub fn commitment_fee(feerate_per_kw: u64, untrimmed_htlcs: usize, anchors: bool) -> u64 {
    fee_for_weight(feerate_per_kw, commitment_weight(untrimmed_htlcs, anchors))
}

pub fn htlc_timeout_fee(feerate_per_kw: u64, anchors: bool) -> u64 {
    let weight = if anchors {
        HTLC_TIMEOUT_WEIGHT_ANCHORS
    } else {
        HTLC_TIMEOUT_WEIGHT
    };
    fee_for_weight(feerate_per_kw, weight)
}

pub fn htlc_success_fee(feerate_per_kw: u64, anchors: bool) -> u64 {
    let weight = if anchors {
        HTLC_SUCCESS_WEIGHT_ANCHORS
    } else {
        HTLC_SUCCESS_WEIGHT
    };
    fee_for_weight(feerate_per_kw, weight)
}
