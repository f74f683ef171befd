use dependencies::byteorder::{ByteOrder, BigEndian, LittleEndian};

use super::error::WireError;

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Writer {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    pub fn write_u16<B: ByteOrder>(&mut self, value: u16) {
        let mut bytes = [0u8; 2];
        B::write_u16(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_u32<B: ByteOrder>(&mut self, value: u32) {
        let mut bytes = [0u8; 4];
        B::write_u32(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_u64<B: ByteOrder>(&mut self, value: u64) {
        let mut bytes = [0u8; 8];
        B::write_u64(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_i64<B: ByteOrder>(&mut self, value: i64) {
        let mut bytes = [0u8; 8];
        B::write_i64(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_u256(&mut self, value: &[u8; 32], reversed: bool) {
        if reversed {
            let mut bytes = *value;
            bytes.reverse();
            self.write_bytes(&bytes);
        } else {
            self.write_bytes(value);
        }
    }

    /// Always writes the minimal CompactSize form.
    pub fn write_var_int(&mut self, value: u64) {
        match value {
            0..=0xfc => self.write_u8(value as u8),
            0xfd..=0xffff => {
                self.write_u8(0xfd);
                self.write_u16::<LittleEndian>(value as u16);
            },
            0x1_0000..=0xffff_ffff => {
                self.write_u8(0xfe);
                self.write_u32::<LittleEndian>(value as u32);
            },
            _ => {
                self.write_u8(0xff);
                self.write_u64::<LittleEndian>(value);
            },
        }
    }

    pub fn write_big_size(&mut self, value: u64) {
        match value {
            0..=0xfc => self.write_u8(value as u8),
            0xfd..=0xffff => {
                self.write_u8(0xfd);
                self.write_u16::<BigEndian>(value as u16);
            },
            0x1_0000..=0xffff_ffff => {
                self.write_u8(0xfe);
                self.write_u32::<BigEndian>(value as u32);
            },
            _ => {
                self.write_u8(0xff);
                self.write_u64::<BigEndian>(value);
            },
        }
    }

    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_var_int(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    pub fn write_var_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }

    pub fn write_u16_bytes(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        let limit = u16::MAX as usize;
        if bytes.len() > limit {
            return Err(WireError::LengthOverflow { length: bytes.len(), limit });
        }
        self.write_u16::<BigEndian>(bytes.len() as u16);
        self.write_bytes(bytes);
        Ok(())
    }

    pub fn write_typed_array<T, F>(&mut self, items: &[T], mut element: F) -> Result<(), WireError>
    where
        F: FnMut(&mut Writer, &T) -> Result<(), WireError>,
    {
        self.write_var_int(items.len() as u64);
        for item in items {
            element(self, item)?;
        }
        Ok(())
    }
}
