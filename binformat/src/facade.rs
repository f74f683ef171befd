use dependencies::byteorder::BigEndian;

use super::{Reader, WireError, Writer};

/// Writes the canonical wire form of a value.
pub trait Encode {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError>;
}

/// Reads a value from the cursor. On error nothing is returned and callers
/// must drop the whole message.
pub trait Decode: Sized {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError>;
}

// Bare integers are big endian, as everywhere in the Lightning messages.
// Little endian fields are read explicitly through `Reader`.
macro_rules! big_endian_integer {
    ($t:ty, $read:ident, $write:ident) => {
        impl Encode for $t {
            fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
                w.$write::<BigEndian>(*self);
                Ok(())
            }
        }

        impl Decode for $t {
            fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
                r.$read::<BigEndian>()
            }
        }
    };
}

big_endian_integer!(u16, read_u16, write_u16);
big_endian_integer!(u32, read_u32, write_u32);
big_endian_integer!(u64, read_u64, write_u64);

impl Encode for u8 {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        w.write_u8(*self);
        Ok(())
    }
}

impl Decode for u8 {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_u8()
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, w: &mut Writer) -> Result<(), WireError> {
        w.write_bytes(&self[..]);
        Ok(())
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        r.read_fixed::<N>()
    }
}

/// Public facade object, provides the codec with the proper configuration applied
pub struct BinarySD;

impl BinarySD {
    pub fn serialize<T: Encode>(value: &T) -> Result<Vec<u8>, WireError> {
        let mut w = Writer::new();
        value.encode(&mut w)?;
        Ok(w.into_inner())
    }

    pub fn deserialize<T: Decode>(data: &[u8]) -> Result<T, WireError> {
        BinarySD::deserialize_with_position(data).map(|(value, _)| value)
    }

    /// Returns the value together with the number of bytes consumed.
    pub fn deserialize_with_position<T: Decode>(data: &[u8]) -> Result<(T, usize), WireError> {
        let mut r = Reader::new(data);
        let value = T::decode(&mut r)?;
        Ok((value, r.position()))
    }
}
