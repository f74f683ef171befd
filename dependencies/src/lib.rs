#![forbid(unsafe_code)]

pub use bitcoin;
pub use bitcoin::secp256k1;
pub use bitcoin::hashes as bitcoin_hashes;
pub use rand;
pub use hex;
pub use byteorder;
pub use hkdf;
pub use sha2;
pub use bitflags;
pub use hex_literal;
pub use parking_lot;
pub use tracing;
pub use pretty_assertions;
