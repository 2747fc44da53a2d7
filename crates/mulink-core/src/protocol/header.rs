//! Header decoding (panic-free).
//!
//! Parsing rules:
//! - Never index (`buf[0]`): every access goes through `get()`.
//! - Out-of-range access surfaces as `HeaderError::Malformed`.

use crate::error::HeaderError;
use crate::protocol::subcode::{StaticSubCodes, SubCodeClassifier};

/// Minimum message size: framing byte, one length byte, opcode.
pub const MIN_MESSAGE_LEN: usize = 3;

/// The four framing families, distinguished by the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framing {
    /// 1-byte length, plain.
    C1,
    /// 2-byte length, plain.
    C2,
    /// 1-byte length, encrypted on the wire.
    C3,
    /// 2-byte length, encrypted on the wire.
    C4,
}

impl Framing {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0xC1 => Some(Framing::C1),
            0xC2 => Some(Framing::C2),
            0xC3 => Some(Framing::C3),
            0xC4 => Some(Framing::C4),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            Framing::C1 => 0xC1,
            Framing::C2 => 0xC2,
            Framing::C3 => 0xC3,
            Framing::C4 => 0xC4,
        }
    }

    /// Width of the length prefix in bytes.
    pub fn length_size(self) -> usize {
        match self {
            Framing::C1 | Framing::C3 => 1,
            Framing::C2 | Framing::C4 => 2,
        }
    }

    /// Offset of the main opcode.
    pub fn code_offset(self) -> usize {
        1 + self.length_size()
    }

    /// Declared total length from a message prefix, if enough bytes are present.
    pub fn declared_len(self, prefix: &[u8]) -> Option<usize> {
        match self.length_size() {
            1 => prefix.get(1).map(|b| usize::from(*b)),
            _ => {
                let hi = prefix.get(1)?;
                let lo = prefix.get(2)?;
                Some(usize::from(u16::from_be_bytes([*hi, *lo])))
            }
        }
    }
}

/// Decoded message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub framing: Framing,
    /// Main opcode.
    pub code: u8,
    /// Sub-opcode, only for families that carry one.
    pub sub_code: Option<u8>,
    /// Offset of the first body byte (after opcode and sub-opcode).
    pub body_offset: usize,
}

/// Decode a header using the built-in sub-code table.
pub fn decode_header(bytes: &[u8]) -> Result<Header, HeaderError> {
    decode_header_with(bytes, &StaticSubCodes)
}

/// Decode a header, consulting `classifier` for sub-opcode presence.
pub fn decode_header_with(
    bytes: &[u8],
    classifier: &dyn SubCodeClassifier,
) -> Result<Header, HeaderError> {
    if bytes.len() < MIN_MESSAGE_LEN {
        return Err(HeaderError::TooShort { len: bytes.len() });
    }

    let first = *bytes
        .first()
        .ok_or(HeaderError::Malformed("missing framing byte"))?;
    let framing = Framing::from_byte(first).ok_or(HeaderError::UnknownFraming(first))?;

    let code_offset = framing.code_offset();
    let code = *bytes
        .get(code_offset)
        .ok_or(HeaderError::Malformed("opcode beyond end of message"))?;

    let sub_offset = code_offset + 1;
    let sub_code = if classifier.has_sub_opcode(code) {
        bytes.get(sub_offset).copied()
    } else {
        None
    };

    let body_offset = if sub_code.is_some() {
        sub_offset + 1
    } else {
        sub_offset
    };

    Ok(Header {
        framing,
        code,
        sub_code,
        body_offset,
    })
}

/// A raw message together with its decoded header.
#[derive(Debug, Clone, Copy)]
pub struct Packet<'a> {
    pub header: Header,
    raw: &'a [u8],
}

impl<'a> Packet<'a> {
    pub fn with_header(header: Header, raw: &'a [u8]) -> Self {
        Self { header, raw }
    }

    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Bytes after the (sub-)opcode.
    pub fn body(&self) -> &'a [u8] {
        self.raw.get(self.header.body_offset..).unwrap_or(&[])
    }
}
