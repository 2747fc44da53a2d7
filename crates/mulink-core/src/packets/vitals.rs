//! Health/shield (`26`) and mana/ability (`27`) updates.
//!
//! Current (`FF`) and maximum (`FE`) messages share a layout. Shield and
//! ability were appended in the current generation; legacy servers only send
//! the standard layout.

use crate::error::Result;
use crate::packets::{select_layout, Layout};
use crate::protocol::reader::BodyReader;
use crate::protocol::version::ProtocolVersion;

const EXTENDED: usize = 4;
const STANDARD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthShield {
    pub layout: Layout,
    pub health: u32,
    pub shield: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManaAbility {
    pub layout: Layout,
    pub mana: u32,
    pub ability: u32,
}

/// Returns (layout, primary, secondary).
fn decode_pair(r: &BodyReader<'_>, version: ProtocolVersion) -> Result<(Layout, u32, u32)> {
    let layout = match version {
        ProtocolVersion::Season6 => select_layout(r, EXTENDED, STANDARD)?,
        ProtocolVersion::V097 | ProtocolVersion::V075 => {
            r.require(STANDARD)?;
            Layout::Standard
        }
    };
    let primary = u32::from(r.u16_be(0)?);
    let secondary = match layout {
        Layout::Extended => u32::from(r.u16_be(2)?),
        Layout::Standard => 0,
    };
    Ok((layout, primary, secondary))
}

pub fn decode_health_shield(body: &[u8], version: ProtocolVersion) -> Result<HealthShield> {
    let r = BodyReader::new("health_shield", body);
    let (layout, health, shield) = decode_pair(&r, version)?;
    Ok(HealthShield {
        layout,
        health,
        shield,
    })
}

pub fn decode_mana_ability(body: &[u8], version: ProtocolVersion) -> Result<ManaAbility> {
    let r = BodyReader::new("mana_ability", body);
    let (layout, mana, ability) = decode_pair(&r, version)?;
    Ok(ManaAbility {
        layout,
        mana,
        ability,
    })
}
