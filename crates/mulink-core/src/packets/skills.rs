//! Skill list (`F3 11`).
//!
//! The count byte doubles as a notification flag: reserved values announce a
//! single added or removed skill instead of a full list. The reserved values
//! are `FE`/`FF` for 0.97 onwards and `01`/`00` on the earliest servers.

use crate::error::Result;
use crate::packets::split_records;
use crate::protocol::reader::BodyReader;
use crate::protocol::version::ProtocolVersion;

const ENTRIES_AT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillEntry {
    pub index: u8,
    pub number: u16,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillListUpdate {
    List { skills: Vec<SkillEntry>, truncated: bool },
    Added(SkillEntry),
    Removed(SkillEntry),
}

enum CountMeaning {
    Added,
    Removed,
    List(usize),
}

fn classify_count(count: u8, version: ProtocolVersion) -> CountMeaning {
    match (version, count) {
        (ProtocolVersion::Season6 | ProtocolVersion::V097, 0xFE) => CountMeaning::Added,
        (ProtocolVersion::Season6 | ProtocolVersion::V097, 0xFF) => CountMeaning::Removed,
        (ProtocolVersion::V075, 0x01) => CountMeaning::Added,
        (ProtocolVersion::V075, 0x00) => CountMeaning::Removed,
        (_, n) => CountMeaning::List(usize::from(n)),
    }
}

fn entry_size(version: ProtocolVersion) -> usize {
    match version {
        ProtocolVersion::Season6 | ProtocolVersion::V097 => 4,
        ProtocolVersion::V075 => 3,
    }
}

fn read_entry(rec: &BodyReader<'_>, version: ProtocolVersion) -> Result<SkillEntry> {
    match version {
        ProtocolVersion::Season6 | ProtocolVersion::V097 => Ok(SkillEntry {
            index: rec.u8(0)?,
            number: rec.u16_le(1)?,
            level: rec.u8(3)?,
        }),
        ProtocolVersion::V075 => Ok(SkillEntry {
            index: rec.u8(0)?,
            number: rec.u8(1)?.into(),
            level: rec.u8(2)?,
        }),
    }
}

pub fn decode_skill_list(body: &[u8], version: ProtocolVersion) -> Result<SkillListUpdate> {
    let r = BodyReader::new("skill_list", body);
    r.require(ENTRIES_AT)?;
    let size = entry_size(version);

    match classify_count(r.u8(0)?, version) {
        CountMeaning::Added => {
            r.require(ENTRIES_AT + size)?;
            Ok(SkillListUpdate::Added(read_entry(&r.sub(ENTRIES_AT, size)?, version)?))
        }
        CountMeaning::Removed => {
            r.require(ENTRIES_AT + size)?;
            Ok(SkillListUpdate::Removed(read_entry(&r.sub(ENTRIES_AT, size)?, version)?))
        }
        CountMeaning::List(count) => {
            let recs = split_records(&r, ENTRIES_AT, count, size, false);
            let mut skills = Vec::with_capacity(recs.records.len());
            for rec in &recs.records {
                skills.push(read_entry(rec, version)?);
            }
            Ok(SkillListUpdate::List {
                skills,
                truncated: recs.truncated,
            })
        }
    }
}
