//! Protocol generations.

use std::fmt;

use serde::Deserialize;

/// Protocol generation spoken by the server, fixed for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    /// Current generation (shield/ability, wide map numbers, 64-bit experience).
    #[default]
    Season6,
    /// Mid legacy.
    V097,
    /// Early legacy.
    V075,
}

impl ProtocolVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolVersion::Season6 => "season6",
            ProtocolVersion::V097 => "v097",
            ProtocolVersion::V075 => "v075",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
