//! Movement handlers. Only the own character's movement touches the
//! session; everything else is observed.

use mulink_core::error::Result;
use mulink_core::packets::movement::{decode_map_changed, decode_object_moved, decode_object_walked};
use mulink_core::Packet;

use crate::dispatch::HandlerCtx;

pub(super) fn object_moved(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_object_moved(packet.body(), ctx.version)?;
    if ctx.session.character_id() == Some(ev.id) {
        tracing::debug!(x = ev.x, y = ev.y, "own character moved");
        ctx.session.set_position(ev.x, ev.y);
    } else {
        tracing::trace!(id = ev.id, x = ev.x, y = ev.y, "object moved");
    }
    Ok(())
}

pub(super) fn object_walked(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_object_walked(packet.body(), ctx.version)?;
    if ctx.session.character_id() != Some(ev.id) {
        tracing::trace!(id = ev.id, x = ev.target_x, y = ev.target_y, steps = ev.step_count, "object walked");
        return Ok(());
    }

    if ev.step_count == 0 {
        // Walk rejected or already at target: unblock whoever awaits it.
        tracing::debug!("own walk acknowledged without steps");
        ctx.session.signal_movement_acknowledged();
        return Ok(());
    }

    // The route is informational; the target is authoritative.
    tracing::debug!(x = ev.target_x, y = ev.target_y, route = ?ev.route, "own character walked");
    ctx.session.set_position(ev.target_x, ev.target_y);
    Ok(())
}

pub(super) fn map_changed(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_map_changed(packet.body(), ctx.version)?;
    tracing::info!(map = ev.map, x = ev.x, y = ev.y, map_change = ev.is_map_change, "map changed");
    ctx.session.set_position(ev.x, ev.y);
    Ok(())
}
