//! Server-to-client opcode catalogue.

/// Chat message from a nearby character.
pub const CHAT_MESSAGE: u8 = 0x00;
/// Private message.
pub const WHISPER: u8 = 0x02;
/// Server notice / golden message.
pub const SERVER_MESSAGE: u8 = 0x0D;
/// Characters entered the visible area.
pub const ADD_CHARACTERS_TO_SCOPE: u8 = 0x12;
/// NPCs and monsters entered the visible area.
pub const ADD_NPCS_TO_SCOPE: u8 = 0x13;
/// Objects left the visible area.
pub const OBJECTS_OUT_OF_SCOPE: u8 = 0x14;
/// Instantaneous position set.
pub const OBJECT_MOVED: u8 = 0x15;
/// An object was killed.
pub const OBJECT_GOT_KILLED: u8 = 0x17;
/// Own character changed map / teleported.
pub const MAP_CHANGED: u8 = 0x1C;
/// Multi-step walk with route.
pub const OBJECT_WALKED: u8 = 0xD4;

/// Health/shield group.
pub const HEALTH: u8 = 0x26;
/// Mana/ability group.
pub const MANA: u8 = 0x27;
/// Current values sub-code within [`HEALTH`] and [`MANA`].
pub const SUB_CURRENT: u8 = 0xFF;
/// Maximum values sub-code within [`HEALTH`] and [`MANA`].
pub const SUB_MAXIMUM: u8 = 0xFE;

/// Login / connection group.
pub const LOGIN_GROUP: u8 = 0xF1;
pub const SUB_GAME_SERVER_ENTERED: u8 = 0x00;
pub const SUB_LOGIN_RESULT: u8 = 0x01;
pub const SUB_LOGOUT: u8 = 0x02;

/// Character group.
pub const CHARACTER_GROUP: u8 = 0xF3;
pub const SUB_CHARACTER_LIST: u8 = 0x00;
pub const SUB_CHARACTER_INFORMATION: u8 = 0x03;
pub const SUB_RESPAWN: u8 = 0x04;
pub const SUB_LEVEL_UP: u8 = 0x05;
pub const SUB_SKILL_LIST: u8 = 0x11;

/// Opcodes whose handling feeds a caller waiting on movement confirmation.
pub fn is_movement(code: u8) -> bool {
    matches!(code, OBJECT_MOVED | OBJECT_WALKED)
}
