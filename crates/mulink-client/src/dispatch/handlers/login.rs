use mulink_core::error::Result;
use mulink_core::packets::login::{decode_game_server_entered, decode_login_response, decode_logout};
use mulink_core::Packet;

use crate::dispatch::HandlerCtx;

pub(super) fn game_server_entered(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_game_server_entered(packet.body(), ctx.version)?;
    tracing::info!(
        success = ev.success,
        player_id = ev.player_id,
        server_version = %ev.server_version,
        "game server entered"
    );
    ctx.session.set_connected(true);
    Ok(())
}

pub(super) fn login_result(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_login_response(packet.body(), ctx.version)?;
    if ev.result.is_success() {
        tracing::info!("login succeeded");
        ctx.follow_up.request_character_list();
    } else {
        tracing::warn!(result = ?ev.result, "login rejected");
    }
    Ok(())
}

pub(super) fn logout(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_logout(packet.body(), ctx.version)?;
    tracing::info!(kind = ?ev.kind, "logged out");
    ctx.session.set_in_game(false);
    Ok(())
}

pub(super) fn login_group(_ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    tracing::debug!(sub = ?packet.header.sub_code, len = packet.raw().len(), "login group message ignored");
    Ok(())
}
