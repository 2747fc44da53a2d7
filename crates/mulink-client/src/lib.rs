//! MU protocol client library.
//!
//! Wires header decoding, the dispatch table, version-aware handlers, the
//! session sink and follow-up triggers into one packet router, plus the TCP
//! glue that feeds it. Consumed by the binary (`main.rs`) and by integration
//! tests.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod followup;
pub mod obs;
pub mod router;
pub mod session;
pub mod transport;

pub use error::{ClientError, Result};
pub use router::{DispatchOutcome, PacketRouter};
pub use session::{SessionSink, SessionSnapshot, SessionState};
