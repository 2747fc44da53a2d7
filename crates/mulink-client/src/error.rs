//! Client-level errors (everything outside a single message's processing).

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("framing: {0}")]
    Framing(String),
    #[error("outbound channel closed")]
    OutboundClosed,
}
