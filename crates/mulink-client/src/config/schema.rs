use serde::Deserialize;

use mulink_core::protocol::reader::NAME_LEN;
use mulink_core::ProtocolVersion;

use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub connection: ConnectionSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ClientError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.client.validate()?;
        self.connection.validate()?;

        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Protocol generation of the server; fixed for every connection.
    #[serde(default)]
    pub protocol: ProtocolVersion,

    /// Character to enter the game with; the first listed one otherwise.
    #[serde(default)]
    pub character: Option<String>,
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.character {
            if name.is_empty() || name.chars().count() > NAME_LEN {
                return Err(ClientError::Config(format!(
                    "client.character must be 1..={NAME_LEN} characters"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for ConnectionSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_frame_bytes: default_max_frame_bytes(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl ConnectionSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ClientError::Config("connection.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ClientError::Config("connection.port must not be 0".into()));
        }
        if !(16..=65535).contains(&self.max_frame_bytes) {
            return Err(ClientError::Config(
                "connection.max_frame_bytes must be between 16 and 65535".into(),
            ));
        }
        if !(1..=4096).contains(&self.outbound_queue) {
            return Err(ClientError::Config(
                "connection.outbound_queue must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    55901
}
fn default_max_frame_bytes() -> usize {
    8192
}
fn default_outbound_queue() -> usize {
    64
}
