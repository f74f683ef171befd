use dependencies::byteorder::{ByteOrder, BigEndian, LittleEndian};

use std::cmp;
use std::convert::TryFrom;

use super::error::{BigSizeViolation, WireError};

/// Cursor over an input buffer. Every read either consumes exactly the bytes
/// of the primitive or fails and leaves the position where it was.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader {
            data,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Runs `f` and rewinds the cursor if it fails, so composite reads never
    /// leave the cursor in the middle of a value.
    pub fn atomically<T, F>(&mut self, f: F) -> Result<T, WireError>
    where
        F: FnOnce(&mut Self) -> Result<T, WireError>,
    {
        let start = self.position;
        let result = f(self);
        if result.is_err() {
            self.position = start;
        }
        result
    }

    pub fn read_slice(&mut self, length: usize) -> Result<&'a [u8], WireError> {
        let remaining = self.remaining();
        if length > remaining {
            return Err(WireError::Underflow { needed: length, remaining });
        }
        let start = self.position;
        self.position += length;
        Ok(&self.data[start..self.position])
    }

    pub fn read_remaining(&mut self) -> &'a [u8] {
        let start = self.position;
        self.position = self.data.len();
        &self.data[start..]
    }

    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_slice(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        self.read_slice(1).map(|b| b[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        self.read_u8().map(|b| b > 0)
    }

    pub fn read_u16<B: ByteOrder>(&mut self) -> Result<u16, WireError> {
        self.read_slice(2).map(B::read_u16)
    }

    pub fn read_u32<B: ByteOrder>(&mut self) -> Result<u32, WireError> {
        self.read_slice(4).map(B::read_u32)
    }

    pub fn read_u64<B: ByteOrder>(&mut self) -> Result<u64, WireError> {
        self.read_slice(8).map(B::read_u64)
    }

    pub fn read_i64<B: ByteOrder>(&mut self) -> Result<i64, WireError> {
        self.read_slice(8).map(B::read_i64)
    }

    /// Reads 32 bytes, optionally reversing them (hashes displayed big endian
    /// are stored little endian).
    pub fn read_u256(&mut self, reversed: bool) -> Result<[u8; 32], WireError> {
        let mut value = self.read_fixed::<32>()?;
        if reversed {
            value.reverse();
        }
        Ok(value)
    }

    /// Bitcoin CompactSize. Non-minimal encodings are accepted.
    pub fn read_var_int(&mut self) -> Result<u64, WireError> {
        self.atomically(|r| match r.read_u8()? {
            0xfd => r.read_u16::<LittleEndian>().map(u64::from),
            0xfe => r.read_u32::<LittleEndian>().map(u64::from),
            0xff => r.read_u64::<LittleEndian>(),
            prefix => Ok(u64::from(prefix)),
        })
    }

    /// BOLT 1 BigSize. Non-minimal and truncated encodings are rejected.
    pub fn read_big_size(&mut self) -> Result<u64, WireError> {
        self.atomically(|r| {
            let remaining = r.remaining();
            let prefix = r
                .read_u8()
                .map_err(|_| BigSizeViolation::Truncated { needed: 1, remaining })?;
            let (width, minimum) = match prefix {
                0xfd => (2, 0xfd),
                0xfe => (4, 0x1_0000),
                0xff => (8, 0x1_0000_0000),
                _ => return Ok(u64::from(prefix)),
            };
            let remaining = r.remaining();
            if remaining < width {
                return Err(BigSizeViolation::Truncated { needed: width, remaining }.into());
            }
            let value = match width {
                2 => u64::from(r.read_u16::<BigEndian>()?),
                4 => u64::from(r.read_u32::<BigEndian>()?),
                _ => r.read_u64::<BigEndian>()?,
            };
            if value < minimum {
                return Err(BigSizeViolation::NotMinimal { prefix, value }.into());
            }
            Ok(value)
        })
    }

    /// VarInt length followed by that many bytes.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], WireError> {
        self.atomically(|r| {
            let length = r.read_var_int()?;
            let remaining = r.remaining();
            let length = usize::try_from(length)
                .map_err(|_| WireError::Underflow { needed: usize::MAX, remaining })?;
            r.read_slice(length)
        })
    }

    pub fn read_var_string(&mut self) -> Result<String, WireError> {
        self.atomically(|r| {
            let bytes = r.read_var_bytes()?;
            String::from_utf8(bytes.to_vec()).map_err(|e| WireError::invalid("string", e))
        })
    }

    /// Big endian u16 length followed by that many bytes, the form BOLT
    /// messages use for features, scripts and error data.
    pub fn read_u16_bytes(&mut self) -> Result<&'a [u8], WireError> {
        self.atomically(|r| {
            let length = r.read_u16::<BigEndian>()?;
            r.read_slice(usize::from(length))
        })
    }

    /// VarInt count followed by that many elements, each produced by `element`.
    pub fn read_typed_array<T, F>(&mut self, mut element: F) -> Result<Vec<T>, WireError>
    where
        F: FnMut(&mut Reader<'a>) -> Result<T, WireError>,
    {
        self.atomically(|r| {
            let count = r.read_var_int()?;
            // every element takes at least one byte
            let capacity = cmp::min(count, r.remaining() as u64) as usize;
            let mut items = Vec::with_capacity(capacity);
            for _ in 0..count {
                items.push(element(r)?);
            }
            Ok(items)
        })
    }
}
