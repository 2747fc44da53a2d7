//! Panic-free body reader.
//!
//! Wraps a byte slice and hands out fixed-offset fields. Every read checks
//! bounds first and reports `DecodeFault` for the owning family instead of
//! panicking.

use bytes::Buf;

use crate::error::{PacketError, Result};

/// Length of a character name field on the wire.
pub const NAME_LEN: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct BodyReader<'a> {
    family: &'static str,
    buf: &'a [u8],
}

impl<'a> BodyReader<'a> {
    pub fn new(family: &'static str, buf: &'a [u8]) -> Self {
        Self { family, buf }
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Fail with `DecodeLengthMismatch` unless at least `min` bytes are present.
    pub fn require(&self, min: usize) -> Result<()> {
        if self.buf.len() < min {
            return Err(PacketError::length(self.family, self.buf.len(), min));
        }
        Ok(())
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| PacketError::fault(self.family, "field offset overflow"))?;
        self.buf.get(offset..end).ok_or_else(|| {
            PacketError::fault(
                self.family,
                format!("field {offset}..{end} beyond body of {} bytes", self.buf.len()),
            )
        })
    }

    pub fn u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?.get_u8())
    }

    pub fn u16_be(&self, offset: usize) -> Result<u16> {
        Ok(self.slice(offset, 2)?.get_u16())
    }

    pub fn u16_le(&self, offset: usize) -> Result<u16> {
        Ok(self.slice(offset, 2)?.get_u16_le())
    }

    pub fn u32_be(&self, offset: usize) -> Result<u32> {
        Ok(self.slice(offset, 4)?.get_u32())
    }

    pub fn u32_le(&self, offset: usize) -> Result<u32> {
        Ok(self.slice(offset, 4)?.get_u32_le())
    }

    pub fn u64_be(&self, offset: usize) -> Result<u64> {
        Ok(self.slice(offset, 8)?.get_u64())
    }

    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        self.slice(offset, len)
    }

    /// Everything from `offset` to the end (empty when past the end).
    pub fn rest(&self, offset: usize) -> &'a [u8] {
        self.buf.get(offset..).unwrap_or(&[])
    }

    /// NUL-padded Latin-1 text of exactly `len` bytes.
    pub fn text(&self, offset: usize, len: usize) -> Result<String> {
        Ok(latin1(self.slice(offset, len)?))
    }

    /// Character name field.
    pub fn name(&self, offset: usize) -> Result<String> {
        self.text(offset, NAME_LEN)
    }

    /// A reader over a sub-range, used for repeated records.
    pub fn sub(&self, offset: usize, len: usize) -> Result<BodyReader<'a>> {
        Ok(BodyReader::new(self.family, self.slice(offset, len)?))
    }
}

/// Decode NUL-terminated Latin-1 text.
pub fn latin1(raw: &[u8]) -> String {
    raw.iter()
        .take_while(|b| **b != 0)
        .map(|b| char::from(*b))
        .collect()
}

/// Strip the "newly created" flag carried in bit 15 of object ids.
pub fn object_id(raw: u16) -> u16 {
    raw & 0x7FFF
}
