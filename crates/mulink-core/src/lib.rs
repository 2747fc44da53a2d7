//! mulink core: runtime-free protocol primitives, message decoders and the
//! error taxonomy.
//!
//! This crate owns the classify-and-decode half of the client: header
//! framing, sub-opcode classification, the protocol-version enum and one
//! version-aware decoder per message family. It carries no runtime or
//! transport dependencies so it can be reused by tools and tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `PacketError` so a hostile or truncated message never takes the
//! process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod packets;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorKind, HeaderError, PacketError, Result};
pub use protocol::{Framing, Header, Packet, ProtocolVersion};
