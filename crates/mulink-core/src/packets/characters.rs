//! Character group (`F3`): character list, character information (game
//! entered), respawn and level up.

use crate::error::Result;
use crate::packets::{select_layout, split_records, Layout};
use crate::protocol::reader::BodyReader;
use crate::protocol::version::ProtocolVersion;

/// Primary attributes. `leadership` is zero before the current generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    pub strength: u16,
    pub agility: u16,
    pub vitality: u16,
    pub energy: u16,
    pub leadership: u16,
}

/// Current and maximum pools. Shield and ability are zero before the
/// current generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vitals {
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub max_shield: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub ability: u32,
    pub max_ability: u32,
}

// ---------------------------------------------------------------------------
// Character list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSummary {
    pub slot: u8,
    pub name: String,
    pub level: u16,
    pub status: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterList {
    pub characters: Vec<CharacterSummary>,
    /// Account-wide "move" counter, current generation only.
    pub move_count: u8,
    pub truncated: bool,
}

/// (header size, offset of the count byte, record size)
fn character_list_layout(version: ProtocolVersion) -> (usize, usize, usize) {
    match version {
        ProtocolVersion::Season6 => (4, 2, 34),
        ProtocolVersion::V097 => (1, 0, 26),
        ProtocolVersion::V075 => (1, 0, 24),
    }
}

pub fn decode_character_list(body: &[u8], version: ProtocolVersion) -> Result<CharacterList> {
    let r = BodyReader::new("character_list", body);
    let (header, count_at, record) = character_list_layout(version);
    r.require(header)?;

    let count = usize::from(r.u8(count_at)?);
    let move_count = match version {
        ProtocolVersion::Season6 => r.u8(1)?,
        _ => 0,
    };

    let recs = split_records(&r, header, count, record, false);
    let mut characters = Vec::with_capacity(recs.records.len());
    for rec in recs.records {
        characters.push(CharacterSummary {
            slot: rec.u8(0)?,
            name: rec.name(1)?,
            level: rec.u16_le(12)?,
            status: rec.u8(14)?,
        });
    }

    Ok(CharacterList {
        characters,
        move_count,
        truncated: recs.truncated,
    })
}

// ---------------------------------------------------------------------------
// Character information (sent once the selected character entered the game)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterInformation {
    pub x: u8,
    pub y: u8,
    pub map: u16,
    pub direction: u8,
    pub experience: u64,
    pub next_experience: u64,
    pub level_up_points: u16,
    pub attributes: Attributes,
    pub vitals: Vitals,
    pub money: u32,
    pub hero_state: u8,
    pub status: u8,
}

pub fn decode_character_information(
    body: &[u8],
    version: ProtocolVersion,
) -> Result<CharacterInformation> {
    let r = BodyReader::new("character_information", body);
    match version {
        ProtocolVersion::Season6 => {
            r.require(64)?;
            Ok(CharacterInformation {
                x: r.u8(0)?,
                y: r.u8(1)?,
                map: r.u16_le(2)?,
                direction: r.u8(4)?,
                experience: r.u64_be(5)?,
                next_experience: r.u64_be(13)?,
                level_up_points: r.u16_le(21)?,
                attributes: Attributes {
                    strength: r.u16_le(23)?,
                    agility: r.u16_le(25)?,
                    vitality: r.u16_le(27)?,
                    energy: r.u16_le(29)?,
                    leadership: r.u16_le(57)?,
                },
                vitals: Vitals {
                    health: r.u16_le(31)?.into(),
                    max_health: r.u16_le(33)?.into(),
                    mana: r.u16_le(35)?.into(),
                    max_mana: r.u16_le(37)?.into(),
                    shield: r.u16_le(39)?.into(),
                    max_shield: r.u16_le(41)?.into(),
                    ability: r.u16_le(43)?.into(),
                    max_ability: r.u16_le(45)?.into(),
                },
                money: r.u32_le(47)?,
                hero_state: r.u8(51)?,
                status: r.u8(52)?,
            })
        }
        ProtocolVersion::V097 | ProtocolVersion::V075 => {
            // 0.97 appends fruit counters; both share the first 36 bytes.
            let min = if version == ProtocolVersion::V097 { 40 } else { 36 };
            r.require(min)?;
            Ok(CharacterInformation {
                x: r.u8(0)?,
                y: r.u8(1)?,
                map: r.u8(2)?.into(),
                direction: r.u8(3)?,
                experience: r.u32_be(4)?.into(),
                next_experience: r.u32_be(8)?.into(),
                level_up_points: r.u16_le(12)?,
                attributes: Attributes {
                    strength: r.u16_le(14)?,
                    agility: r.u16_le(16)?,
                    vitality: r.u16_le(18)?,
                    energy: r.u16_le(20)?,
                    leadership: 0,
                },
                vitals: Vitals {
                    health: r.u16_le(22)?.into(),
                    max_health: r.u16_le(24)?.into(),
                    mana: r.u16_le(26)?.into(),
                    max_mana: r.u16_le(28)?.into(),
                    ..Vitals::default()
                },
                money: r.u32_le(30)?,
                hero_state: r.u8(34)?,
                status: r.u8(35)?,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Respawn after death
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Respawn {
    pub x: u8,
    pub y: u8,
    pub map: u16,
    pub direction: u8,
    pub health: u32,
    pub mana: u32,
    pub shield: u32,
    pub ability: u32,
    pub experience: u64,
    pub money: u32,
}

pub fn decode_respawn(body: &[u8], version: ProtocolVersion) -> Result<Respawn> {
    let r = BodyReader::new("respawn", body);
    match version {
        ProtocolVersion::Season6 => {
            r.require(25)?;
            Ok(Respawn {
                x: r.u8(0)?,
                y: r.u8(1)?,
                map: r.u16_le(2)?,
                direction: r.u8(4)?,
                health: r.u16_le(5)?.into(),
                mana: r.u16_le(7)?.into(),
                shield: r.u16_le(9)?.into(),
                ability: r.u16_le(11)?.into(),
                experience: r.u64_be(13)?,
                money: r.u32_le(21)?,
            })
        }
        ProtocolVersion::V097 | ProtocolVersion::V075 => {
            r.require(16)?;
            Ok(Respawn {
                x: r.u8(0)?,
                y: r.u8(1)?,
                map: r.u8(2)?.into(),
                direction: r.u8(3)?,
                health: r.u16_le(4)?.into(),
                mana: r.u16_le(6)?.into(),
                shield: 0,
                ability: 0,
                experience: r.u32_be(8)?.into(),
                money: r.u32_le(12)?,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Level up
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub layout: Layout,
    pub level: u16,
    pub level_up_points: u16,
    pub max_health: u32,
    pub max_mana: u32,
    pub max_shield: u32,
    pub max_ability: u32,
}

const LEVEL_UP_EXTENDED: usize = 12;
const LEVEL_UP_STANDARD: usize = 8;

pub fn decode_level_up(body: &[u8], version: ProtocolVersion) -> Result<LevelUp> {
    let r = BodyReader::new("level_up", body);
    let layout = match version {
        ProtocolVersion::Season6 => select_layout(&r, LEVEL_UP_EXTENDED, LEVEL_UP_STANDARD)?,
        ProtocolVersion::V097 | ProtocolVersion::V075 => {
            r.require(LEVEL_UP_STANDARD)?;
            Layout::Standard
        }
    };

    let (max_shield, max_ability) = match layout {
        Layout::Extended => (r.u16_le(8)?.into(), r.u16_le(10)?.into()),
        Layout::Standard => (0, 0),
    };

    Ok(LevelUp {
        layout,
        level: r.u16_le(0)?,
        level_up_points: r.u16_le(2)?,
        max_health: r.u16_le(4)?.into(),
        max_mana: r.u16_le(6)?.into(),
        max_shield,
        max_ability,
    })
}
