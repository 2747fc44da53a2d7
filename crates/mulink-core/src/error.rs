//! Shared error types for the mulink protocol layer.

use thiserror::Error;

/// Stable error kinds (used in logs, metric labels and test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Too short / unknown framing / out-of-range header access.
    HeaderMalformed,
    /// No dispatch entry for the (code, sub-code) pair.
    UnresolvedOpcode,
    /// Payload too short for every known layout of the family.
    DecodeLengthMismatch,
    /// Any other decode-time fault.
    DecodeFault,
}

impl ErrorKind {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::HeaderMalformed => "HEADER_MALFORMED",
            ErrorKind::UnresolvedOpcode => "UNRESOLVED_OPCODE",
            ErrorKind::DecodeLengthMismatch => "DECODE_LENGTH_MISMATCH",
            ErrorKind::DecodeFault => "DECODE_FAULT",
        }
    }
}

/// Header-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("message too short ({len} bytes)")]
    TooShort { len: usize },
    #[error("unknown framing byte {0:#04x}")]
    UnknownFraming(u8),
    #[error("malformed header: {0}")]
    Malformed(&'static str),
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PacketError>;

/// Everything that can go wrong while processing a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("header malformed: {0}")]
    HeaderMalformed(#[from] HeaderError),
    #[error("unresolved opcode {code:#04x}/{}", fmt_sub(.sub))]
    UnresolvedOpcode { code: u8, sub: Option<u8> },
    #[error("{family}: unexpected length {actual}, need at least {expected}")]
    DecodeLengthMismatch {
        family: &'static str,
        actual: usize,
        expected: usize,
    },
    #[error("{family}: {reason}")]
    DecodeFault { family: &'static str, reason: String },
}

impl PacketError {
    /// Map the error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PacketError::HeaderMalformed(_) => ErrorKind::HeaderMalformed,
            PacketError::UnresolvedOpcode { .. } => ErrorKind::UnresolvedOpcode,
            PacketError::DecodeLengthMismatch { .. } => ErrorKind::DecodeLengthMismatch,
            PacketError::DecodeFault { .. } => ErrorKind::DecodeFault,
        }
    }

    pub(crate) fn length(family: &'static str, actual: usize, expected: usize) -> Self {
        PacketError::DecodeLengthMismatch {
            family,
            actual,
            expected,
        }
    }

    pub(crate) fn fault(family: &'static str, reason: impl Into<String>) -> Self {
        PacketError::DecodeFault {
            family,
            reason: reason.into(),
        }
    }
}

fn fmt_sub(sub: &Option<u8>) -> String {
    match sub {
        Some(s) => format!("{s:#04x}"),
        None => "-".to_string(),
    }
}
