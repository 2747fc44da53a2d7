use mulink_core::error::Result;
use mulink_core::packets::vitals::{decode_health_shield, decode_mana_ability};
use mulink_core::Packet;

use crate::dispatch::HandlerCtx;

pub(super) fn current_health_shield(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_health_shield(packet.body(), ctx.version)?;
    tracing::debug!(health = ev.health, shield = ev.shield, layout = ?ev.layout, "current health");
    ctx.session.update_current_health_shield(ev.health, ev.shield);
    Ok(())
}

pub(super) fn maximum_health_shield(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_health_shield(packet.body(), ctx.version)?;
    tracing::debug!(health = ev.health, shield = ev.shield, layout = ?ev.layout, "maximum health");
    ctx.session.update_maximum_health_shield(ev.health, ev.shield);
    Ok(())
}

pub(super) fn current_mana_ability(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_mana_ability(packet.body(), ctx.version)?;
    tracing::debug!(mana = ev.mana, ability = ev.ability, layout = ?ev.layout, "current mana");
    ctx.session.update_current_mana_ability(ev.mana, ev.ability);
    Ok(())
}

pub(super) fn maximum_mana_ability(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_mana_ability(packet.body(), ctx.version)?;
    tracing::debug!(mana = ev.mana, ability = ev.ability, layout = ?ev.layout, "maximum mana");
    ctx.session.update_maximum_mana_ability(ev.mana, ev.ability);
    Ok(())
}
