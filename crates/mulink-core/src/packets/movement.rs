//! Movement: instantaneous position set (`15`), walk with route (`D4`) and
//! map change / teleport (`1C`).

use crate::error::Result;
use crate::protocol::reader::{object_id, BodyReader};
use crate::protocol::version::ProtocolVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMoved {
    pub id: u16,
    pub x: u8,
    pub y: u8,
}

pub fn decode_object_moved(body: &[u8], _version: ProtocolVersion) -> Result<ObjectMoved> {
    let r = BodyReader::new("object_moved", body);
    r.require(4)?;
    Ok(ObjectMoved {
        id: object_id(r.u16_be(0)?),
        x: r.u8(2)?,
        y: r.u8(3)?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectWalked {
    pub id: u16,
    pub target_x: u8,
    pub target_y: u8,
    pub rotation: u8,
    /// Declared number of steps.
    pub step_count: u8,
    /// Step directions (0..=7) as far as the message carried them.
    pub route: Vec<u8>,
}

pub fn decode_object_walked(body: &[u8], version: ProtocolVersion) -> Result<ObjectWalked> {
    let r = BodyReader::new("object_walked", body);
    let (rotation, step_count, steps_at) = match version {
        ProtocolVersion::Season6 | ProtocolVersion::V097 => {
            r.require(5)?;
            let packed = r.u8(4)?;
            (packed >> 4, packed & 0x0F, 5)
        }
        ProtocolVersion::V075 => {
            r.require(6)?;
            (r.u8(5)?, r.u8(4)?, 6)
        }
    };

    let packed = r.rest(steps_at);
    let route: Vec<u8> = packed
        .iter()
        .flat_map(|b| [b >> 4, b & 0x0F])
        .take(usize::from(step_count))
        .collect();
    if route.len() < usize::from(step_count) {
        tracing::warn!(
            family = r.family(),
            declared = step_count,
            carried = route.len(),
            "walk route shorter than declared step count"
        );
    }

    Ok(ObjectWalked {
        id: object_id(r.u16_be(0)?),
        target_x: r.u8(2)?,
        target_y: r.u8(3)?,
        rotation,
        step_count,
        route,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapChanged {
    pub is_map_change: bool,
    pub map: u16,
    pub x: u8,
    pub y: u8,
    pub rotation: u8,
}

pub fn decode_map_changed(body: &[u8], version: ProtocolVersion) -> Result<MapChanged> {
    let r = BodyReader::new("map_changed", body);
    match version {
        ProtocolVersion::Season6 => {
            r.require(6)?;
            Ok(MapChanged {
                is_map_change: r.u8(0)? != 0,
                map: r.u16_le(1)?,
                x: r.u8(3)?,
                y: r.u8(4)?,
                rotation: r.u8(5)?,
            })
        }
        ProtocolVersion::V097 | ProtocolVersion::V075 => {
            r.require(5)?;
            Ok(MapChanged {
                is_map_change: r.u8(0)? != 0,
                map: r.u8(1)?.into(),
                x: r.u8(2)?,
                y: r.u8(3)?,
                rotation: r.u8(4)?,
            })
        }
    }
}
