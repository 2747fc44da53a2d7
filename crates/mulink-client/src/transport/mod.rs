//! TCP transport glue: stream re-framing and the connection loop.
//!
//! Encryption is not handled here; frames are routed as received.

pub mod connection;
pub mod frame;

pub use connection::run;
pub use frame::FrameSplitter;
