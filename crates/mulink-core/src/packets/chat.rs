//! Chat (`00`), whisper (`02`) and server notices (`0D`).

use crate::error::Result;
use crate::protocol::reader::{latin1, BodyReader, NAME_LEN};
use crate::protocol::version::ProtocolVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

pub fn decode_chat_message(body: &[u8], _version: ProtocolVersion) -> Result<ChatMessage> {
    let r = BodyReader::new("chat_message", body);
    r.require(NAME_LEN)?;
    Ok(ChatMessage {
        sender: r.name(0)?,
        text: latin1(r.rest(NAME_LEN)),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessageKind {
    /// Golden centre-screen notice.
    GoldenCenter,
    /// Blue system line.
    BlueNormal,
    /// Guild notice.
    GuildNotice,
    Other(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMessage {
    pub kind: ServerMessageKind,
    pub text: String,
}

pub fn decode_server_message(body: &[u8], version: ProtocolVersion) -> Result<ServerMessage> {
    let r = BodyReader::new("server_message", body);
    // Current servers insert repeat/delay/colour/speed fields before the text.
    let text_at = match version {
        ProtocolVersion::Season6 => 12,
        ProtocolVersion::V097 | ProtocolVersion::V075 => 1,
    };
    r.require(text_at)?;
    let kind = match r.u8(0)? {
        0 => ServerMessageKind::GoldenCenter,
        1 => ServerMessageKind::BlueNormal,
        2 => ServerMessageKind::GuildNotice,
        other => ServerMessageKind::Other(other),
    };
    Ok(ServerMessage {
        kind,
        text: latin1(r.rest(text_at)),
    })
}
