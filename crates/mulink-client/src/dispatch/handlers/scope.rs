use mulink_core::error::Result;
use mulink_core::packets::scope::{
    decode_characters_in_scope, decode_npcs_in_scope, decode_object_got_killed,
    decode_objects_out_of_scope, CharactersInScope,
};
use mulink_core::Packet;

use crate::dispatch::HandlerCtx;
use crate::session::SessionSink;

pub(super) fn characters_in_scope(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_characters_in_scope(packet.body(), ctx.version)?;
    tracing::debug!(count = ev.characters.len(), truncated = ev.truncated, "characters in scope");
    latch_own_identity(ctx.session, &ev);
    Ok(())
}

/// Latch the id of the first scoped character carrying our name, unless an
/// id is already known. Later matches never overwrite it.
fn latch_own_identity(session: &dyn SessionSink, ev: &CharactersInScope) {
    let Some(own_name) = session.character_name() else {
        return;
    };

    for c in ev.characters.iter().filter(|c| c.name == own_name) {
        match session.character_id() {
            None => {
                tracing::info!(id = c.id, name = %c.name, "own character id resolved");
                session.set_character_id(c.id);
            }
            Some(known) if known != c.id => {
                tracing::warn!(known, ignored = c.id, name = %c.name, "conflicting id for own character ignored");
            }
            Some(_) => {}
        }
    }
}

pub(super) fn npcs_in_scope(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_npcs_in_scope(packet.body(), ctx.version)?;
    tracing::debug!(count = ev.npcs.len(), truncated = ev.truncated, "npcs in scope");
    Ok(())
}

pub(super) fn objects_out_of_scope(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_objects_out_of_scope(packet.body(), ctx.version)?;
    tracing::debug!(ids = ?ev.ids, "objects out of scope");
    Ok(())
}

pub(super) fn object_got_killed(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_object_got_killed(packet.body(), ctx.version)?;
    if ctx.session.character_id() == Some(ev.killed_id) {
        tracing::warn!(killer = ev.killer_id, skill = ev.skill, "own character died");
    } else {
        tracing::debug!(killed = ev.killed_id, killer = ev.killer_id, "object killed");
    }
    Ok(())
}
