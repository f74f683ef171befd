//! Test data of BOLT 3, Appendix C, and helpers to parse it.

use std::str::FromStr;

use dependencies::bitcoin::consensus::encode::deserialize;
use dependencies::bitcoin::{OutPoint, ScriptBuf, Transaction, Txid};
use dependencies::bitcoin_hashes::{sha256, Hash};
use dependencies::hex;
use dependencies::secp256k1::{PublicKey, SecretKey};

use crate::commit::{CommitTx, Htlc, HtlcDirection, Side};
use crate::keys::CommitmentKeys;

pub fn pubkey(s: &str) -> PublicKey {
    PublicKey::from_slice(&hex::decode(s).unwrap()).unwrap()
}

pub fn secret(s: &str) -> SecretKey {
    SecretKey::from_slice(&hex::decode(s).unwrap()).unwrap()
}

pub fn script(s: &str) -> ScriptBuf {
    ScriptBuf::from(hex::decode(s).unwrap())
}

/// Parses the txid in its displayed (reversed) byte order.
pub fn txid(s: &str) -> Txid {
    Txid::from_str(s).unwrap()
}

pub fn tx(s: &str) -> Transaction {
    deserialize(&hex::decode(s).unwrap()).unwrap()
}

// Private keys of the example the counterparty would normally keep for itself.
pub struct Internal {
    pub remote_funding_privkey: SecretKey,
    pub local_payment_basepoint_secret: SecretKey,
    pub remote_revocation_basepoint_secret: SecretKey,
    pub local_delayed_payment_basepoint_secret: SecretKey,
    pub remote_payment_basepoint_secret: SecretKey,
    pub x_local_per_commitment_secret: SecretKey,
    pub remote_revocation_basepoint: PublicKey,
    pub local_delayed_payment_basepoint: PublicKey,
    pub local_per_commitment_point: PublicKey,
    pub remote_privkey: SecretKey,
    pub local_delayed_privkey: SecretKey,
}

pub struct HtlcExample {
    pub direction: HtlcDirection,
    pub amount_msat: u64,
    pub expiry: u32,
    pub payment_preimage: [u8; 32],
}

impl HtlcExample {
    pub fn to_htlc(&self) -> Htlc {
        Htlc {
            direction: self.direction,
            amount_msat: self.amount_msat,
            cltv_expiry: self.expiry,
            payment_hash: sha256::Hash::hash(&self.payment_preimage).to_byte_array(),
        }
    }
}

pub struct Bolt3Example {
    pub funding_tx_id: Txid,
    pub funding_output_index: u32,
    pub funding_amount_satoshi: u64,
    pub commitment_number: u64,
    pub local_delay: u16,
    pub local_dust_limit_satoshi: u64,
    pub htlcs: Vec<HtlcExample>,
    pub local_payment_basepoint: PublicKey,
    pub remote_payment_basepoint: PublicKey,
    pub obscuring_factor: u64,
    pub local_funding_privkey: SecretKey,
    pub local_funding_pubkey: PublicKey,
    pub remote_funding_pubkey: PublicKey,
    pub local_privkey: SecretKey,
    pub localpubkey: PublicKey,
    pub remotepubkey: PublicKey,
    pub local_delayedpubkey: PublicKey,
    pub local_revocation_pubkey: PublicKey,
    pub internal: Internal,
}

fn htlc(direction: HtlcDirection, amount_msat: u64, expiry: u32, preimage_byte: u8) -> HtlcExample {
    HtlcExample {
        direction,
        amount_msat,
        expiry,
        payment_preimage: [preimage_byte; 32],
    }
}

pub fn get_example() -> Bolt3Example {
    Bolt3Example {
        funding_tx_id: txid("8984484a580b825b9972d7adb15050b3ab624ccd731946b3eeddb92f4e7ef6be"),
        funding_output_index: 0,
        funding_amount_satoshi: 10_000_000,
        commitment_number: 42,
        local_delay: 144,
        local_dust_limit_satoshi: 546,
        htlcs: vec![
            // remote->local is accepted, local->remote is offered
            htlc(HtlcDirection::Accepted, 1_000_000, 500, 0),
            htlc(HtlcDirection::Accepted, 2_000_000, 501, 1),
            htlc(HtlcDirection::Offered, 2_000_000, 502, 2),
            htlc(HtlcDirection::Offered, 3_000_000, 503, 3),
            htlc(HtlcDirection::Accepted, 4_000_000, 504, 4),
        ],
        local_payment_basepoint: pubkey("034f355bdcb7cc0af728ef3cceb9615d90684bb5b2ca5f859ab0f0b704075871aa"),
        remote_payment_basepoint: pubkey("032c0b7cf95324a07d05398b240174dc0c2be444d96b159aa6c7f7b1e668680991"),
        obscuring_factor: 0x2bb038521914,
        local_funding_privkey: secret("30ff4956bbdd3222d44cc5e8a1261dab1e07957bdac5ae88fe3261ef321f3749"),
        local_funding_pubkey: pubkey("023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb"),
        remote_funding_pubkey: pubkey("030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c1"),
        local_privkey: secret("bb13b121cdc357cd2e608b0aea294afca36e2b34cf958e2e6451a2f274694491"),
        localpubkey: pubkey("030d417a46946384f88d5f3337267c5e579765875dc4daca813e21734b140639e7"),
        remotepubkey: pubkey("0394854aa6eab5b2a8122cc726e9dded053a2184d88256816826d6231c068d4a5b"),
        local_delayedpubkey: pubkey("03fd5960528dc152014952efdb702a88f71e3c1653b2314431701ec77e57fde83c"),
        local_revocation_pubkey: pubkey("0212a140cd0c6539d07cd08dfe09984dec3251ea808b892efeac3ede9402bf2b19"),
        internal: Internal {
            remote_funding_privkey: secret("1552dfba4f6cf29a62a0af13c8d6981d36d0ef8d61ba10fb0fe90da7634d7e13"),
            local_payment_basepoint_secret: secret("1111111111111111111111111111111111111111111111111111111111111111"),
            remote_revocation_basepoint_secret: secret("2222222222222222222222222222222222222222222222222222222222222222"),
            local_delayed_payment_basepoint_secret: secret("3333333333333333333333333333333333333333333333333333333333333333"),
            remote_payment_basepoint_secret: secret("4444444444444444444444444444444444444444444444444444444444444444"),
            x_local_per_commitment_secret: secret("1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100"),
            remote_revocation_basepoint: pubkey("02466d7fcae563e5cb09a0d1870bb580344804617879a14949cf22285f1bae3f27"),
            local_delayed_payment_basepoint: pubkey("023c72addb4fdf09af94f0c94d7fe92a386a7e70cf8a1d85916386bb2535c7b1b1"),
            local_per_commitment_point: pubkey("025f7117a78150fe2ef97db7cfc83bd57b2e2c0d0dd25eaf467a4a1c2a45ce1486"),
            remote_privkey: secret("8deba327a7cc6d638ab0eb025770400a6184afcba6713c210d8d10e199ff2fda"),
            local_delayed_privkey: secret("adf3464ce9c2f230fd2582fda4c6965e4993ca5524e8c9580e3df0cf226981ad"),
        },
    }
}

// Most of the examples use the same commitment with a different feerate.
pub fn get_base_commit_tx(feerate_per_kw: u64) -> CommitTx {
    let ex = get_example();
    CommitTx {
        funding_outpoint: OutPoint {
            txid: ex.funding_tx_id,
            vout: ex.funding_output_index,
        },
        funding_amount: ex.funding_amount_satoshi,
        local_funding_pubkey: ex.local_funding_pubkey,
        remote_funding_pubkey: ex.remote_funding_pubkey,

        feerate_per_kw,
        dust_limit_satoshi: ex.local_dust_limit_satoshi,

        to_local_msat: 6_988_000_000,
        to_remote_msat: 3_000_000_000,

        obscured_commit_number: ex.obscuring_factor ^ ex.commitment_number,

        keys: CommitmentKeys {
            revocation: ex.local_revocation_pubkey,
            local_delayed: ex.local_delayedpubkey,
            local_htlc: ex.localpubkey,
            remote_htlc: ex.remotepubkey,
            remote_payment: ex.remotepubkey,
        },
        to_self_delay: ex.local_delay,

        htlcs: ex.htlcs.iter().map(HtlcExample::to_htlc).collect(),
        anchors: false,
        funder: Side::Local,
    }
}

/// BOLT 3, Appendix C: the commitments built on top of `get_base_commit_tx`.
pub const COMMITMENT_VECTORS: &[(u64, &str, &str)] = &[
    (
        0,
        "commitment tx with all five HTLCs untrimmed (minimum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8007e80300000000000022002052bfef0479d7b293c27e0f1eb294bea154c63a3294ef092c19af51409bce0e2ad007000000000000220020403d394747cae42e98ff01734ad5c08f82ba123d3d9a620abda88989651e2ab5d007000000000000220020748eba944fedc8827f6b06bc44678f93c0f9e6078b35c6331ed31e75f8ce0c2db80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de843110e0a06a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e04004730440220275b0c325a5e9355650dc30c0eccfbc7efb23987c24b556b9dfdd40effca18d202206caceb2c067836c51f296740c7ae807ffcbfbf1dd3a0d56b6de9a5b247985f060147304402204fd4928835db1ccdfc40f5c78ce9bd65249b16348df81f0c44328dcdefc97d630220194d3869c38bc732dd87d13d2958015e2fc16829e74cd4377f84d215c0b7060601475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        647,
        "commitment tx with seven outputs untrimmed (maximum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8007e80300000000000022002052bfef0479d7b293c27e0f1eb294bea154c63a3294ef092c19af51409bce0e2ad007000000000000220020403d394747cae42e98ff01734ad5c08f82ba123d3d9a620abda88989651e2ab5d007000000000000220020748eba944fedc8827f6b06bc44678f93c0f9e6078b35c6331ed31e75f8ce0c2db80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de843110e09c6a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e040048304502210094bfd8f5572ac0157ec76a9551b6c5216a4538c07cd13a51af4a54cb26fa14320220768efce8ce6f4a5efac875142ff19237c011343670adf9c7ac69704a120d116301483045022100a5c01383d3ec646d97e40f44318d49def817fcd61a0ef18008a665b3e151785502203e648efddd5838981ef55ec954be69c4a652d021e6081a100d034de366815e9b01475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        648,
        "commitment tx with six outputs untrimmed (minimum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8006d007000000000000220020403d394747cae42e98ff01734ad5c08f82ba123d3d9a620abda88989651e2ab5d007000000000000220020748eba944fedc8827f6b06bc44678f93c0f9e6078b35c6331ed31e75f8ce0c2db80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de8431104e9d6a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e0400483045022100a2270d5950c89ae0841233f6efea9c951898b301b2e89e0adbd2c687b9f32efa02207943d90f95b9610458e7c65a576e149750ff3accaacad004cd85e70b235e27de01473044022072714e2fbb93cdd1c42eb0828b4f2eff143f717d8f26e79d6ada4f0dcb681bbe02200911be4e5161dd6ebe59ff1c58e1997c4aea804f81db6b698821db6093d7b05701475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        2069,
        "commitment tx with six outputs untrimmed (maximum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8006d007000000000000220020403d394747cae42e98ff01734ad5c08f82ba123d3d9a620abda88989651e2ab5d007000000000000220020748eba944fedc8827f6b06bc44678f93c0f9e6078b35c6331ed31e75f8ce0c2db80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de84311077956a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e040047304402203ca8f31c6a47519f83255dc69f1894d9a6d7476a19f498d31eaf0cd3a85eeb63022026fd92dc752b33905c4c838c528b692a8ad4ced959990b5d5ee2ff940fa90eea01473044022001d55e488b8b035b2dd29d50b65b530923a416d47f377284145bc8767b1b6a75022019bb53ddfe1cefaf156f924777eaaf8fdca1810695a7d0a247ad2afba8232eb401475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        2070,
        "commitment tx with five outputs untrimmed (minimum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8005d007000000000000220020403d394747cae42e98ff01734ad5c08f82ba123d3d9a620abda88989651e2ab5b80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de843110da966a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e04004730440220443cb07f650aebbba14b8bc8d81e096712590f524c5991ac0ed3bbc8fd3bd0c7022028a635f548e3ca64b19b69b1ea00f05b22752f91daf0b6dab78e62ba52eb7fd001483045022100f2377f7a67b7fc7f4e2c0c9e3a7de935c32417f5668eda31ea1db401b7dc53030220415fdbc8e91d0f735e70c21952342742e25249b0d062d43efbfc564499f3752601475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        2194,
        "commitment tx with five outputs untrimmed (maximum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8005d007000000000000220020403d394747cae42e98ff01734ad5c08f82ba123d3d9a620abda88989651e2ab5b80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de84311040966a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e040047304402203b1b010c109c2ecbe7feb2d259b9c4126bd5dc99ee693c422ec0a5781fe161ba0220571fe4e2c649dea9c7aaf7e49b382962f6a3494963c97d80fef9a430ca3f706101483045022100d33c4e541aa1d255d41ea9a3b443b3b822ad8f7f86862638aac1f69f8f760577022007e2a18e6931ce3d3a804b1c78eda1de17dbe1fb7a95488c9a4ec8620395334801475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        2195,
        "commitment tx with four outputs untrimmed (minimum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8004b80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de843110b8976a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e040047304402203b12d44254244b8ff3bb4129b0920fd45120ab42f553d9976394b099d500c99e02205e95bb7a3164852ef0c48f9e0eaf145218f8e2c41251b231f03cbdc4f29a54290147304402205e2f76d4657fb732c0dfc820a18a7301e368f5799e06b7828007633741bda6df0220458009ae59d0c6246065c419359e05eb2a4b4ef4a1b310cc912db44eb792429801475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        3702,
        "commitment tx with four outputs untrimmed (maximum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8004b80b000000000000220020c20b5d1f8584fd90443e7b7b720136174fa4b9333c261d04dbbd012635c0f419a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de8431106f916a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e040047304402200e930a43c7951162dc15a2b7344f48091c74c70f7024e7116e900d8bcfba861c022066fa6cbda3929e21daa2e7e16a4b948db7e8919ef978402360d1095ffdaff7b001483045022100c1a3b0b60ca092ed5080121f26a74a20cec6bdee3f8e47bae973fcdceb3eda5502207d467a9873c939bf3aa758014ae67295fedbca52412633f7e5b2670fc7c381c101475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        3703,
        "commitment tx with three outputs untrimmed (minimum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8003a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de843110eb936a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e0400473044022047305531dd44391dce03ae20f8735005c615eb077a974edb0059ea1a311857d602202e0ed6972fbdd1e8cb542b06e0929bc41b2ddf236e04cb75edd56151f4197506014830450221008b7c191dd46893b67b628e618d2dc8e81169d38bade310181ab77d7c94c6675e02203b4dd131fd7c9deb299560983dcdc485545c98f989f7ae8180c28289f9e6bdb001475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        4914,
        "commitment tx with three outputs untrimmed (maximum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8003a00f0000000000002200208c48d15160397c9731df9bc3b236656efb6665fbfe92b4a6878e88a499f741c4c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de843110ae8f6a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e040047304402206a2679efa3c7aaffd2a447fd0df7aba8792858b589750f6a1203f9259173198a022008d52a0e77a99ab533c36206cb15ad7aeb2aa72b93d4b571e728cb5ec2f6fe260147304402206d6cb93969d39177a09d5d45b583f34966195b77c7e585cf47ac5cce0c90cefb022031d71ae4e33a4e80df7f981d696fbdee517337806a3c7138b7491e2cbb077a0e01475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        4915,
        "commitment tx with two outputs untrimmed (minimum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8002c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de843110fa926a00000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e0400483045022100a012691ba6cea2f73fa8bac37750477e66363c6d28813b0bb6da77c8eb3fb0270220365e99c51304b0b1a6ab9ea1c8500db186693e39ec1ad5743ee231b0138384b90147304402200769ba89c7330dfa4feba447b6e322305f12ac7dac70ec6ba997ed7c1b598d0802204fe8d337e7fee781f9b7b1a06e580b22f4f79d740059560191d7db53f876555201475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        9651180,
        "commitment tx with two outputs untrimmed (maximum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b800222020000000000002200204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80ec0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de84311004004730440220514f977bf7edc442de8ce43ace9686e5ebdc0f893033f13e40fb46c8b8c6e1f90220188006227d175f5c35da0b092c57bea82537aed89f7778204dc5bacf4f29f2b901473044022037f83ff00c8e5fb18ae1f918ffc24e54581775a20ff1ae719297ef066c71caa9022039c529cccd89ff6c5ed1db799614533844bd6d101da503761c45c713996e3bbd01475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
    (
        9651181,
        "commitment tx with one output untrimmed (minimum feerate)",
        "02000000000101bef67e4e2fb9ddeeb3461973cd4c62abb35050b1add772995b820b584a488489000000000038b02b8001c0c62d0000000000160014ccf1af2f2aabee14bb40fa3851ab2301de8431100400473044022031a82b51bd014915fe68928d1abf4b9885353fb896cac10c3fdd88d7f9c7f2e00220716bda819641d2c63e65d3549b6120112e1aeaf1742eed94a471488e79e206b101473044022064901950be922e62cbe3f2ab93de2b99f37cff9fc473e73e394b27f88ef0731d02206d1dfa227527b4df44a07599289e207d6fd9cca60c0365682dcd3deaf739567e01475221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae3e195220",
    ),
];
