//! Protocol primitives: framing, sub-code table, versions, body reader and
//! the opcode catalogue.
//!
//! All parsers are panic-free: malformed input is reported as `PacketError`
//! instead of panicking or indexing raw buffers.

pub mod codes;
pub mod header;
pub mod reader;
pub mod request;
pub mod subcode;
pub mod version;

pub use header::{decode_header, decode_header_with, Framing, Header, Packet};
pub use subcode::{has_sub_opcode, StaticSubCodes, SubCodeClassifier};
pub use version::ProtocolVersion;
