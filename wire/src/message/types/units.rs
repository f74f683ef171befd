use binformat::{Decode, Encode, Reader, WireError, Writer};

use serde_derive::{Serialize, Deserialize};

use std::fmt;

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, Debug)]
#[serde(transparent)]
pub struct Satoshi {
    raw: u64,
}

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, Debug)]
#[serde(transparent)]
pub struct MilliSatoshi {
    raw: u64,
}

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, Debug)]
#[serde(transparent)]
pub struct SatoshiPerKiloWeight {
    raw: u32,
}

#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, Debug)]
#[serde(transparent)]
pub struct CsvDelay {
    raw: u16,
}

macro_rules! unit {
    ($name:ident, $raw:ty, $suffix:expr) => {
        impl $name {
            pub const fn new(raw: $raw) -> Self {
                $name { raw }
            }

            pub const fn raw(self) -> $raw {
                self.raw
            }
        }

        impl From<$name> for $raw {
            fn from(v: $name) -> Self {
                v.raw
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                $name { raw }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{} {}", self.raw, $suffix)
            }
        }

        impl Encode for $name {
            fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
                self.raw.encode(w)
            }
        }

        impl Decode for $name {
            fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
                <$raw>::decode(r).map($name::from)
            }
        }
    };
}

unit!(Satoshi, u64, "sat");
unit!(MilliSatoshi, u64, "msat");
unit!(SatoshiPerKiloWeight, u32, "sat/kw");
unit!(CsvDelay, u16, "blocks");

mod scaling {
    use super::*;

    const MILE: u64 = 1000;

    impl From<Satoshi> for MilliSatoshi {
        fn from(v: Satoshi) -> Self {
            MilliSatoshi {
                raw: v.raw.saturating_mul(MILE),
            }
        }
    }

    // rounds down, the remainder is lost
    impl From<MilliSatoshi> for Satoshi {
        fn from(v: MilliSatoshi) -> Self {
            Satoshi {
                raw: v.raw / MILE,
            }
        }
    }
}
