use mulink_core::error::Result;
use mulink_core::packets::chat::{decode_chat_message, decode_server_message};
use mulink_core::Packet;

use crate::dispatch::HandlerCtx;

pub(super) fn chat_message(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_chat_message(packet.body(), ctx.version)?;
    tracing::info!(from = %ev.sender, text = %ev.text, "chat");
    Ok(())
}

pub(super) fn whisper(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_chat_message(packet.body(), ctx.version)?;
    tracing::info!(from = %ev.sender, text = %ev.text, "whisper");
    Ok(())
}

pub(super) fn server_message(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_server_message(packet.body(), ctx.version)?;
    tracing::info!(kind = ?ev.kind, text = %ev.text, "server message");
    Ok(())
}
