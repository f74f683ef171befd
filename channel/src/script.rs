use dependencies::bitcoin::opcodes::all::*;
use dependencies::bitcoin::script::{Builder, Script, ScriptBuf};
use dependencies::bitcoin::WPubkeyHash;
use dependencies::bitcoin_hashes::{hash160, ripemd160, Hash};
use dependencies::secp256k1::PublicKey;

// Keys are ordered lexicographically by their compressed serialization.
fn ordered(pk1: &PublicKey, pk2: &PublicKey) -> ([u8; 33], [u8; 33]) {
    let (a, b) = (pk1.serialize(), pk2.serialize());
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// 2 <pubkey1> <pubkey2> 2 OP_CHECKMULTISIG
pub fn funding_script(pk1: &PublicKey, pk2: &PublicKey) -> ScriptBuf {
    let (first, second) = ordered(pk1, pk2);
    Builder::new()
        .push_int(2)
        .push_slice(first)
        .push_slice(second)
        .push_int(2)
        .push_opcode(OP_CHECKMULTISIG)
        .into_script()
}

pub fn p2wsh(script: &Script) -> ScriptBuf {
    ScriptBuf::new_p2wsh(&script.wscript_hash())
}

pub fn p2wpkh(pk: &PublicKey) -> ScriptBuf {
    ScriptBuf::new_p2wpkh(&WPubkeyHash::hash(&pk.serialize()))
}

//OP_IF
//    # Penalty transaction
//    <revocationpubkey>
//OP_ELSE
//    `to_self_delay`
//    OP_CSV
//    OP_DROP
//    <local_delayedpubkey>
//OP_ENDIF
//OP_CHECKSIG
pub fn to_local_script(revocation_pubkey: &PublicKey, to_self_delay: u16, local_delayed_pubkey: &PublicKey) -> ScriptBuf {
    Builder::new()
        .push_opcode(OP_IF)
        .push_slice(revocation_pubkey.serialize())
        .push_opcode(OP_ELSE)
        .push_int(i64::from(to_self_delay))
        .push_opcode(OP_CSV)
        .push_opcode(OP_DROP)
        .push_slice(local_delayed_pubkey.serialize())
        .push_opcode(OP_ENDIF)
        .push_opcode(OP_CHECKSIG)
        .into_script()
}

/// Script pubkey of the to_remote output. Without anchors it is a plain
/// P2WPKH, with anchors the output is delayed by one block:
/// `<remote_pubkey> OP_CHECKSIGVERIFY 1 OP_CSV`.
pub fn to_remote_script_pubkey(remote_pubkey: &PublicKey, anchors: bool) -> ScriptBuf {
    if anchors {
        p2wsh(&to_remote_anchor_script(remote_pubkey))
    } else {
        p2wpkh(remote_pubkey)
    }
}

pub fn to_remote_anchor_script(remote_pubkey: &PublicKey) -> ScriptBuf {
    Builder::new()
        .push_slice(remote_pubkey.serialize())
        .push_opcode(OP_CHECKSIGVERIFY)
        .push_int(1)
        .push_opcode(OP_CSV)
        .into_script()
}

//<local_funding_pubkey> OP_CHECKSIG OP_IFDUP
//OP_NOTIF
//    OP_16 OP_CSV
//OP_ENDIF
pub fn anchor_script(funding_pubkey: &PublicKey) -> ScriptBuf {
    Builder::new()
        .push_slice(funding_pubkey.serialize())
        .push_opcode(OP_CHECKSIG)
        .push_opcode(OP_IFDUP)
        .push_opcode(OP_NOTIF)
        .push_int(16)
        .push_opcode(OP_CSV)
        .push_opcode(OP_ENDIF)
        .into_script()
}

fn revocation_hash(revocation_pubkey: &PublicKey) -> [u8; 20] {
    hash160::Hash::hash(&revocation_pubkey.serialize()).to_byte_array()
}

fn payment_hash160(payment_hash: &[u8; 32]) -> [u8; 20] {
    ripemd160::Hash::hash(payment_hash).to_byte_array()
}

//OP_DUP OP_HASH160 <RIPEMD160(SHA256(revocationpubkey))> OP_EQUAL
//OP_IF
//    OP_CHECKSIG
//OP_ELSE
//    <remote_htlcpubkey> OP_SWAP OP_SIZE 32 OP_EQUAL
//    OP_NOTIF
//        # To local node via HTLC-timeout transaction (timelocked).
//        OP_DROP 2 OP_SWAP <local_htlcpubkey> 2 OP_CHECKMULTISIG
//    OP_ELSE
//        # To remote node with preimage.
//        OP_HASH160 <RIPEMD160(payment_hash)> OP_EQUALVERIFY
//        OP_CHECKSIG
//    OP_ENDIF
//    [1 OP_CSV OP_DROP]  (anchors only)
//OP_ENDIF
pub fn offered_htlc_script(
    revocation_pubkey: &PublicKey,
    remote_htlc_pubkey: &PublicKey,
    local_htlc_pubkey: &PublicKey,
    payment_hash: &[u8; 32],
    anchors: bool,
) -> ScriptBuf {
    let builder = Builder::new()
        .push_opcode(OP_DUP)
        .push_opcode(OP_HASH160)
        .push_slice(revocation_hash(revocation_pubkey))
        .push_opcode(OP_EQUAL)
        .push_opcode(OP_IF)
            .push_opcode(OP_CHECKSIG)
        .push_opcode(OP_ELSE)
            .push_slice(remote_htlc_pubkey.serialize())
            .push_opcode(OP_SWAP)
            .push_opcode(OP_SIZE)
            .push_int(32)
            .push_opcode(OP_EQUAL)
            .push_opcode(OP_NOTIF)
                .push_opcode(OP_DROP)
                .push_int(2)
                .push_opcode(OP_SWAP)
                .push_slice(local_htlc_pubkey.serialize())
                .push_int(2)
                .push_opcode(OP_CHECKMULTISIG)
            .push_opcode(OP_ELSE)
                .push_opcode(OP_HASH160)
                .push_slice(payment_hash160(payment_hash))
                .push_opcode(OP_EQUALVERIFY)
                .push_opcode(OP_CHECKSIG)
            .push_opcode(OP_ENDIF);
    anchor_delay(builder, anchors)
        .push_opcode(OP_ENDIF)
        .into_script()
}

//OP_DUP OP_HASH160 <RIPEMD160(SHA256(revocationpubkey))> OP_EQUAL
//OP_IF
//    OP_CHECKSIG
//OP_ELSE
//    <remote_htlcpubkey> OP_SWAP OP_SIZE 32 OP_EQUAL
//    OP_IF
//        # To local node via HTLC-success transaction.
//        OP_HASH160 <RIPEMD160(payment_hash)> OP_EQUALVERIFY
//        2 OP_SWAP <local_htlcpubkey> 2 OP_CHECKMULTISIG
//    OP_ELSE
//        # To remote node after timeout.
//        OP_DROP <cltv_expiry> OP_CHECKLOCKTIMEVERIFY OP_DROP
//        OP_CHECKSIG
//    OP_ENDIF
//    [1 OP_CSV OP_DROP]  (anchors only)
//OP_ENDIF
pub fn received_htlc_script(
    revocation_pubkey: &PublicKey,
    remote_htlc_pubkey: &PublicKey,
    local_htlc_pubkey: &PublicKey,
    payment_hash: &[u8; 32],
    cltv_expiry: u32,
    anchors: bool,
) -> ScriptBuf {
    let builder = Builder::new()
        .push_opcode(OP_DUP)
        .push_opcode(OP_HASH160)
        .push_slice(revocation_hash(revocation_pubkey))
        .push_opcode(OP_EQUAL)
        .push_opcode(OP_IF)
            .push_opcode(OP_CHECKSIG)
        .push_opcode(OP_ELSE)
            .push_slice(remote_htlc_pubkey.serialize())
            .push_opcode(OP_SWAP)
            .push_opcode(OP_SIZE)
            .push_int(32)
            .push_opcode(OP_EQUAL)
            .push_opcode(OP_IF)
                .push_opcode(OP_HASH160)
                .push_slice(payment_hash160(payment_hash))
                .push_opcode(OP_EQUALVERIFY)
                .push_int(2)
                .push_opcode(OP_SWAP)
                .push_slice(local_htlc_pubkey.serialize())
                .push_int(2)
                .push_opcode(OP_CHECKMULTISIG)
            .push_opcode(OP_ELSE)
                .push_opcode(OP_DROP)
                .push_int(i64::from(cltv_expiry))
                .push_opcode(OP_CLTV)
                .push_opcode(OP_DROP)
                .push_opcode(OP_CHECKSIG)
            .push_opcode(OP_ENDIF);
    anchor_delay(builder, anchors)
        .push_opcode(OP_ENDIF)
        .into_script()
}

fn anchor_delay(builder: Builder, anchors: bool) -> Builder {
    if anchors {
        builder.push_int(1).push_opcode(OP_CSV).push_opcode(OP_DROP)
    } else {
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_vectors::{get_example, pubkey, script};
    use dependencies::bitcoin_hashes::sha256;

    #[test]
    fn test_funding_script() {
        let pk1 = pubkey("023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb");
        let pk2 = pubkey("030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c1");
        let expected = script("5221023da092f6980e58d2c037173180e9a465476026ee50f96695963e8efe436f54eb21030e9f7b623d2ccc7c9bd44d66d5ce21ce504c0acf6385a132cec6d3c39fa711c152ae");
        assert_eq!(funding_script(&pk1, &pk2), expected);
        // order of the arguments does not matter
        assert_eq!(funding_script(&pk2, &pk1), expected);
        assert_eq!(
            p2wsh(&expected),
            script("0020c015c4a6be010e21657068fc2e6a9d02b27ebe4d490a25846f7237f104d1a3cd")
        );
    }

    #[test]
    fn test_p2wpkh() {
        let pk = pubkey("03535b32d5eb0a6ed0982a0479bbadc9868d9836f6ba94dd5a63be16d875069184");
        assert_eq!(p2wpkh(&pk), script("00143ca33c2e4446f4a305f23c80df8ad1afdcf652f9"));
    }

    #[test]
    fn test_to_local_and_to_remote() {
        let ex = get_example();
        let to_local = to_local_script(&ex.local_revocation_pubkey, ex.local_delay, &ex.local_delayedpubkey);
        assert_eq!(
            to_local,
            script("63210212a140cd0c6539d07cd08dfe09984dec3251ea808b892efeac3ede9402bf2b1967029000b2752103fd5960528dc152014952efdb702a88f71e3c1653b2314431701ec77e57fde83c68ac")
        );
        assert_eq!(
            p2wsh(&to_local),
            script("00204adb4e2f00643db396dd120d4e7dc17625f5f2c11a40d857accc862d6b7dd80e")
        );
        assert_eq!(
            to_remote_script_pubkey(&ex.remotepubkey, false),
            script("0014ccf1af2f2aabee14bb40fa3851ab2301de843110")
        );
    }

    #[test]
    fn test_htlc_scripts() {
        let ex = get_example();
        let hash = |i: usize| sha256::Hash::hash(&ex.htlcs[i].payment_preimage).to_byte_array();

        let htlc0 = received_htlc_script(&ex.local_revocation_pubkey, &ex.remotepubkey, &ex.localpubkey, &hash(0), 500, false);
        assert_eq!(htlc0, script("76a91414011f7254d96b819c76986c277d115efce6f7b58763ac67210394854aa6eab5b2a8122cc726e9dded053a2184d88256816826d6231c068d4a5b7c8201208763a914b8bcb07f6344b42ab04250c86a6e8b75d3fdbbc688527c21030d417a46946384f88d5f3337267c5e579765875dc4daca813e21734b140639e752ae677502f401b175ac6868"));

        let htlc2 = offered_htlc_script(&ex.local_revocation_pubkey, &ex.remotepubkey, &ex.localpubkey, &hash(2), false);
        assert_eq!(htlc2, script("76a91414011f7254d96b819c76986c277d115efce6f7b58763ac67210394854aa6eab5b2a8122cc726e9dded053a2184d88256816826d6231c068d4a5b7c820120876475527c21030d417a46946384f88d5f3337267c5e579765875dc4daca813e21734b140639e752ae67a914b43e1b38138a41b37f7cd9a1d274bc63e3a9b5d188ac6868"));

        let htlc4 = received_htlc_script(&ex.local_revocation_pubkey, &ex.remotepubkey, &ex.localpubkey, &hash(4), 504, false);
        assert_eq!(htlc4, script("76a91414011f7254d96b819c76986c277d115efce6f7b58763ac67210394854aa6eab5b2a8122cc726e9dded053a2184d88256816826d6231c068d4a5b7c8201208763a91418bc1a114ccf9c052d3d23e28d3b0a9d1227434288527c21030d417a46946384f88d5f3337267c5e579765875dc4daca813e21734b140639e752ae677502f801b175ac6868"));
    }

    #[test]
    fn test_anchor_variants() {
        let ex = get_example();
        let hash = [0x42; 32];

        // 1 OP_CSV OP_DROP is placed right before the final OP_ENDIF
        let plain = offered_htlc_script(&ex.local_revocation_pubkey, &ex.remotepubkey, &ex.localpubkey, &hash, false);
        let anchored = offered_htlc_script(&ex.local_revocation_pubkey, &ex.remotepubkey, &ex.localpubkey, &hash, true);
        let plain = plain.as_bytes();
        let (head, tail) = plain.split_at(plain.len() - 1);
        assert_eq!(anchored.as_bytes(), &[head, &[0x51, 0xb2, 0x75], tail].concat()[..]);

        let plain = received_htlc_script(&ex.local_revocation_pubkey, &ex.remotepubkey, &ex.localpubkey, &hash, 600, false);
        let anchored = received_htlc_script(&ex.local_revocation_pubkey, &ex.remotepubkey, &ex.localpubkey, &hash, 600, true);
        assert_eq!(anchored.len(), plain.len() + 3);

        let to_remote = to_remote_anchor_script(&ex.remotepubkey);
        assert_eq!(
            to_remote.as_bytes(),
            &[&[0x21][..], &ex.remotepubkey.serialize()[..], &[0xad, 0x51, 0xb2][..]].concat()[..]
        );
        assert_eq!(to_remote_script_pubkey(&ex.remotepubkey, true), p2wsh(&to_remote));

        let anchor = anchor_script(&ex.local_funding_pubkey);
        assert_eq!(
            anchor.as_bytes(),
            &[&[0x21][..], &ex.local_funding_pubkey.serialize()[..], &[0xac, 0x73, 0x64, 0x60, 0xb2, 0x68][..]].concat()[..]
        );
    }
}
