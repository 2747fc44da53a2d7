use mulink_core::error::Result;
use mulink_core::packets::characters::{
    decode_character_information, decode_character_list, decode_level_up, decode_respawn,
};
use mulink_core::packets::skills::{decode_skill_list, SkillListUpdate};
use mulink_core::Packet;

use crate::dispatch::HandlerCtx;

pub(super) fn character_list(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_character_list(packet.body(), ctx.version)?;
    tracing::info!(count = ev.characters.len(), truncated = ev.truncated, "character list");
    for c in &ev.characters {
        tracing::debug!(slot = c.slot, name = %c.name, level = c.level, "character");
    }

    if ev.characters.is_empty() {
        tracing::info!("account has no characters");
        return Ok(());
    }
    ctx.follow_up.begin_character_selection(ev.characters);
    Ok(())
}

pub(super) fn character_information(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_character_information(packet.body(), ctx.version)?;
    tracing::info!(map = ev.map, x = ev.x, y = ev.y, money = ev.money, "entered the game");

    let v = ev.vitals;
    ctx.session.set_position(ev.x, ev.y);
    ctx.session.update_current_health_shield(v.health, v.shield);
    ctx.session.update_maximum_health_shield(v.max_health, v.max_shield);
    ctx.session.update_current_mana_ability(v.mana, v.ability);
    ctx.session.update_maximum_mana_ability(v.max_mana, v.max_ability);
    ctx.session.update_primary_attributes(ev.attributes);
    ctx.session.set_in_game(true);
    Ok(())
}

pub(super) fn respawn(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_respawn(packet.body(), ctx.version)?;
    tracing::info!(map = ev.map, x = ev.x, y = ev.y, "respawned");
    ctx.session.set_position(ev.x, ev.y);
    ctx.session.update_current_health_shield(ev.health, ev.shield);
    ctx.session.update_current_mana_ability(ev.mana, ev.ability);
    Ok(())
}

pub(super) fn level_up(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    let ev = decode_level_up(packet.body(), ctx.version)?;
    tracing::info!(level = ev.level, points = ev.level_up_points, "level up");
    ctx.session.update_maximum_health_shield(ev.max_health, ev.max_shield);
    ctx.session.update_maximum_mana_ability(ev.max_mana, ev.max_ability);
    Ok(())
}

pub(super) fn skill_list(ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    match decode_skill_list(packet.body(), ctx.version)? {
        SkillListUpdate::List { skills, truncated } => {
            tracing::debug!(count = skills.len(), truncated, "skill list");
        }
        SkillListUpdate::Added(skill) => {
            tracing::info!(index = skill.index, number = skill.number, level = skill.level, "skill added");
        }
        SkillListUpdate::Removed(skill) => {
            tracing::info!(index = skill.index, number = skill.number, "skill removed");
        }
    }
    Ok(())
}

pub(super) fn character_group(_ctx: &HandlerCtx<'_>, packet: &Packet<'_>) -> Result<()> {
    tracing::debug!(sub = ?packet.header.sub_code, len = packet.raw().len(), "character group message ignored");
    Ok(())
}
