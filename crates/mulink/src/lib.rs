//! Top-level facade crate for mulink.
//!
//! Re-exports the protocol core and the client router so users can depend on a single crate.

pub mod core {
    pub use mulink_core::*;
}

pub mod client {
    pub use mulink_client::*;
}
