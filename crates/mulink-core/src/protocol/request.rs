//! Client-to-server requests sent by follow-up triggers.

use bytes::{BufMut, Bytes, BytesMut};

use crate::protocol::codes::{CHARACTER_GROUP, SUB_CHARACTER_INFORMATION, SUB_CHARACTER_LIST};
use crate::protocol::header::Framing;
use crate::protocol::reader::NAME_LEN;

/// `C1 04 F3 00`: request the account's character list.
pub fn character_list() -> Bytes {
    let mut buf = BytesMut::with_capacity(4);
    buf.put_u8(Framing::C1.byte());
    buf.put_u8(4);
    buf.put_u8(CHARACTER_GROUP);
    buf.put_u8(SUB_CHARACTER_LIST);
    buf.freeze()
}

/// `C1 0E F3 03 name[10]`: enter the game with the named character.
///
/// Names longer than the wire field are truncated; characters outside
/// Latin-1 are replaced by `?`.
pub fn select_character(name: &str) -> Bytes {
    let len = 4 + NAME_LEN;
    let mut buf = BytesMut::with_capacity(len);
    buf.put_u8(Framing::C1.byte());
    buf.put_u8(len as u8);
    buf.put_u8(CHARACTER_GROUP);
    buf.put_u8(SUB_CHARACTER_INFORMATION);

    let mut field = [0u8; NAME_LEN];
    for (slot, ch) in field.iter_mut().zip(name.chars()) {
        *slot = u8::try_from(u32::from(ch)).unwrap_or(b'?');
    }
    buf.put_slice(&field);
    buf.freeze()
}
