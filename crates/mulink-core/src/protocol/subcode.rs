//! Sub-opcode classification.
//!
//! Only some opcode families carry a sub-opcode byte after the main opcode.
//! Note that 0x26/0x27 use 0xFF as a real sub-opcode, so "no sub-opcode" is
//! never represented by a byte value.

/// Answers "does main opcode X carry a sub-opcode byte at all?".
pub trait SubCodeClassifier: Send + Sync {
    fn has_sub_opcode(&self, code: u8) -> bool;
}

/// Opcode families known to carry a sub-opcode.
pub const SUB_CODE_FAMILIES: [u8; 14] = [
    0x22, 0x26, 0x27, 0x4E, 0xBF, 0xD1, 0xEC, 0xF1, 0xF3, 0xF4, 0xF6, 0xF7, 0xF8, 0xFA,
];

const fn build_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < SUB_CODE_FAMILIES.len() {
        table[SUB_CODE_FAMILIES[i] as usize] = true;
        i += 1;
    }
    table
}

static TABLE: [bool; 256] = build_table();

/// Static lookup table built at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSubCodes;

impl SubCodeClassifier for StaticSubCodes {
    fn has_sub_opcode(&self, code: u8) -> bool {
        TABLE[usize::from(code)]
    }
}

/// Convenience wrapper over [`StaticSubCodes`].
pub fn has_sub_opcode(code: u8) -> bool {
    StaticSubCodes.has_sub_opcode(code)
}
