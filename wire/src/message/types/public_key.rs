use binformat::{Decode, Encode, Reader, WireError, Writer};
use dependencies::hex;
use dependencies::secp256k1::{self, ecdsa, PublicKey};

use std::fmt;

pub const PUBLIC_KEY_SIZE: usize = 33;
pub const SIGNATURE_SIZE: usize = 64;

/// Compressed point exactly as received. The curve check is deferred until
/// the key is used, so the codec does not reject a message for a bad key.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawPublicKey {
    data: [u8; PUBLIC_KEY_SIZE],
}

/// Compact (r || s) ECDSA signature.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct RawSignature {
    data: [u8; SIGNATURE_SIZE],
}

impl RawPublicKey {
    pub fn from_hex(s: &str) -> Result<Self, WireError> {
        let bytes = hex::decode(s).map_err(|e| WireError::invalid("public key", e))?;
        RawPublicKey::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(WireError::invalid("public key", format!("expected {} bytes, got {}", PUBLIC_KEY_SIZE, bytes.len())));
        }
        let mut data = [0; PUBLIC_KEY_SIZE];
        data.copy_from_slice(bytes);
        Ok(RawPublicKey { data })
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.data
    }

    pub fn to_public_key(&self) -> Result<PublicKey, secp256k1::Error> {
        PublicKey::from_slice(&self.data[..])
    }
}

impl From<PublicKey> for RawPublicKey {
    fn from(v: PublicKey) -> Self {
        RawPublicKey { data: v.serialize() }
    }
}

impl fmt::Debug for RawPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RawPublicKey({})", hex::encode(&self.data[..]))
    }
}

impl RawSignature {
    pub fn from_bytes(data: [u8; SIGNATURE_SIZE]) -> Self {
        RawSignature { data }
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.data
    }

    pub fn to_signature(&self) -> Result<ecdsa::Signature, secp256k1::Error> {
        ecdsa::Signature::from_compact(&self.data[..])
    }
}

impl From<ecdsa::Signature> for RawSignature {
    fn from(v: ecdsa::Signature) -> Self {
        RawSignature { data: v.serialize_compact() }
    }
}

impl fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RawSignature({})", hex::encode(&self.data[..]))
    }
}

impl Encode for RawPublicKey {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.data.encode(w)
    }
}

impl Decode for RawPublicKey {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_fixed::<PUBLIC_KEY_SIZE>().map(|data| RawPublicKey { data })
    }
}

impl Encode for RawSignature {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        self.data.encode(w)
    }
}

impl Decode for RawSignature {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_fixed::<SIGNATURE_SIZE>().map(|data| RawSignature { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dependencies::secp256k1::{Message, Secp256k1, SecretKey};

    #[test]
    fn public_key_conversion() {
        let raw = RawPublicKey::from_hex("02f4f54c706c49df82c35453fafcbe3fe55268e274651f50d573f8eeeee8b3a31d").unwrap();
        let key = raw.to_public_key().unwrap();
        assert_eq!(RawPublicKey::from(key), raw);
        assert!(RawPublicKey::from_hex("02f4f5").is_err());
    }

    #[test]
    fn off_curve_key_decodes_but_does_not_convert() {
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        let raw = RawPublicKey::from_slice(&bytes).unwrap();
        assert!(raw.to_public_key().is_err());
    }

    #[test]
    fn signature_is_compact() {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&[0x11; 32]).unwrap();
        let msg = Message::from_digest([0x22; 32]);
        let signature = secp.sign_ecdsa(&msg, &sk);
        let raw = RawSignature::from(signature);
        assert_eq!(raw.as_bytes()[..], signature.serialize_compact()[..]);
        assert_eq!(raw.to_signature().unwrap(), signature);
    }
}
