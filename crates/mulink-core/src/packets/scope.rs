//! Scope lists: characters (`12`) and NPCs (`13`) entering the visible
//! area, objects leaving it (`14`), and kills (`17`).
//!
//! Scope records are variable length: the last byte of each fixed base
//! record counts the one-byte effect ids that follow it.

use crate::error::Result;
use crate::packets::split_records;
use crate::protocol::reader::{object_id, BodyReader};
use crate::protocol::version::ProtocolVersion;

const NEW_OBJECT_FLAG: u16 = 0x8000;

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedCharacter {
    pub id: u16,
    /// Spawned just now rather than walked into view.
    pub is_new: bool,
    pub name: String,
    pub x: u8,
    pub y: u8,
    pub target_x: u8,
    pub target_y: u8,
    pub rotation: u8,
    pub effects: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharactersInScope {
    pub characters: Vec<ScopedCharacter>,
    pub truncated: bool,
}

struct CharacterRecordLayout {
    base: usize,
    name_at: usize,
    target_at: usize,
    rotation_at: Option<usize>,
}

fn character_record_layout(version: ProtocolVersion) -> CharacterRecordLayout {
    match version {
        ProtocolVersion::Season6 => CharacterRecordLayout {
            base: 36,
            name_at: 22,
            target_at: 32,
            rotation_at: Some(34),
        },
        ProtocolVersion::V097 => CharacterRecordLayout {
            base: 29,
            name_at: 15,
            target_at: 25,
            rotation_at: Some(27),
        },
        ProtocolVersion::V075 => CharacterRecordLayout {
            base: 26,
            name_at: 13,
            target_at: 23,
            rotation_at: None,
        },
    }
}

pub fn decode_characters_in_scope(
    body: &[u8],
    version: ProtocolVersion,
) -> Result<CharactersInScope> {
    let r = BodyReader::new("characters_in_scope", body);
    r.require(1)?;
    let count = usize::from(r.u8(0)?);
    let layout = character_record_layout(version);

    let recs = split_records(&r, 1, count, layout.base, true);
    let mut characters = Vec::with_capacity(recs.records.len());
    for rec in recs.records {
        let raw_id = rec.u16_be(0)?;
        let rotation = match layout.rotation_at {
            Some(at) => rec.u8(at)?,
            None => 0,
        };
        characters.push(ScopedCharacter {
            id: object_id(raw_id),
            is_new: raw_id & NEW_OBJECT_FLAG != 0,
            name: rec.name(layout.name_at)?,
            x: rec.u8(2)?,
            y: rec.u8(3)?,
            target_x: rec.u8(layout.target_at)?,
            target_y: rec.u8(layout.target_at + 1)?,
            rotation,
            effects: rec.rest(layout.base).to_vec(),
        });
    }

    Ok(CharactersInScope {
        characters,
        truncated: recs.truncated,
    })
}

// ---------------------------------------------------------------------------
// NPCs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedNpc {
    pub id: u16,
    pub is_new: bool,
    pub kind: u16,
    pub x: u8,
    pub y: u8,
    pub target_x: u8,
    pub target_y: u8,
    pub rotation: u8,
    pub effects: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcsInScope {
    pub npcs: Vec<ScopedNpc>,
    pub truncated: bool,
}

pub fn decode_npcs_in_scope(body: &[u8], version: ProtocolVersion) -> Result<NpcsInScope> {
    let r = BodyReader::new("npcs_in_scope", body);
    r.require(1)?;
    let count = usize::from(r.u8(0)?);
    let (base, rotation_at) = match version {
        ProtocolVersion::Season6 => (10, Some(8)),
        ProtocolVersion::V097 | ProtocolVersion::V075 => (9, None),
    };

    let recs = split_records(&r, 1, count, base, true);
    let mut npcs = Vec::with_capacity(recs.records.len());
    for rec in recs.records {
        let raw_id = rec.u16_be(0)?;
        let rotation = match rotation_at {
            Some(at) => rec.u8(at)?,
            None => 0,
        };
        npcs.push(ScopedNpc {
            id: object_id(raw_id),
            is_new: raw_id & NEW_OBJECT_FLAG != 0,
            kind: rec.u16_be(2)?,
            x: rec.u8(4)?,
            y: rec.u8(5)?,
            target_x: rec.u8(6)?,
            target_y: rec.u8(7)?,
            rotation,
            effects: rec.rest(base).to_vec(),
        });
    }

    Ok(NpcsInScope {
        npcs,
        truncated: recs.truncated,
    })
}

// ---------------------------------------------------------------------------
// Out of scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectsOutOfScope {
    pub ids: Vec<u16>,
    pub truncated: bool,
}

pub fn decode_objects_out_of_scope(
    body: &[u8],
    _version: ProtocolVersion,
) -> Result<ObjectsOutOfScope> {
    let r = BodyReader::new("objects_out_of_scope", body);
    r.require(1)?;
    let count = usize::from(r.u8(0)?);
    let recs = split_records(&r, 1, count, 2, false);
    let mut ids = Vec::with_capacity(recs.records.len());
    for rec in recs.records {
        ids.push(object_id(rec.u16_be(0)?));
    }
    Ok(ObjectsOutOfScope {
        ids,
        truncated: recs.truncated,
    })
}

// ---------------------------------------------------------------------------
// Kills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectGotKilled {
    pub killed_id: u16,
    pub skill: u16,
    pub killer_id: u16,
}

pub fn decode_object_got_killed(
    body: &[u8],
    version: ProtocolVersion,
) -> Result<ObjectGotKilled> {
    let r = BodyReader::new("object_got_killed", body);
    match version {
        ProtocolVersion::Season6 => {
            r.require(6)?;
            Ok(ObjectGotKilled {
                killed_id: object_id(r.u16_be(0)?),
                skill: r.u16_be(2)?,
                killer_id: object_id(r.u16_be(4)?),
            })
        }
        ProtocolVersion::V097 | ProtocolVersion::V075 => {
            r.require(5)?;
            Ok(ObjectGotKilled {
                killed_id: object_id(r.u16_be(0)?),
                skill: r.u8(2)?.into(),
                killer_id: object_id(r.u16_be(3)?),
            })
        }
    }
}
