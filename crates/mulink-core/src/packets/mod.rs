//! Version-aware decoders, one module per message family.
//!
//! Each decoder is a pure function `(body, version) -> Result<Event>`. The
//! body is everything after the (sub-)opcode, so layouts are independent of
//! the framing family. Decoders branch on the protocol version first and,
//! where a family grew an extended superset, on body length second.

use crate::error::{PacketError, Result};
use crate::protocol::reader::BodyReader;

pub mod characters;
pub mod chat;
pub mod login;
pub mod movement;
pub mod scope;
pub mod skills;
pub mod vitals;

/// Which of two layouts of the same logical message was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Superset layout carrying the optional fields.
    Extended,
    /// Base layout; optional fields read as zero.
    Standard,
}

/// Select the extended layout when the body is at least `extended` bytes,
/// else the standard one when it is at least `standard` bytes.
pub(crate) fn select_layout(r: &BodyReader<'_>, extended: usize, standard: usize) -> Result<Layout> {
    if r.len() >= extended {
        Ok(Layout::Extended)
    } else if r.len() >= standard {
        Ok(Layout::Standard)
    } else {
        Err(PacketError::DecodeLengthMismatch {
            family: r.family(),
            actual: r.len(),
            expected: standard,
        })
    }
}

/// Fully contained records of a repeated-record list.
#[derive(Debug)]
pub(crate) struct Records<'a> {
    pub records: Vec<BodyReader<'a>>,
    pub truncated: bool,
}

/// Split `count` records starting at `start`.
///
/// Every record has `base` fixed bytes. With `counted_tail`, the last base
/// byte holds the number of one-byte trailing entries that follow. Iteration
/// stops at the last fully contained record when the buffer runs out.
pub(crate) fn split_records<'a>(
    r: &BodyReader<'a>,
    start: usize,
    count: usize,
    base: usize,
    counted_tail: bool,
) -> Records<'a> {
    let mut records = Vec::with_capacity(count.min(64));
    let mut cursor = start;
    let mut truncated = false;

    for _ in 0..count {
        let remaining = r.len().saturating_sub(cursor);
        if remaining < base {
            truncated = true;
            break;
        }

        let tail = if counted_tail {
            match r.u8(cursor + base - 1) {
                Ok(n) => usize::from(n),
                Err(_) => {
                    truncated = true;
                    break;
                }
            }
        } else {
            0
        };

        let size = base + tail;
        if remaining < size {
            truncated = true;
            break;
        }
        match r.sub(cursor, size) {
            Ok(rec) => records.push(rec),
            Err(_) => {
                truncated = true;
                break;
            }
        }
        cursor += size;
    }

    if truncated {
        tracing::warn!(
            family = r.family(),
            declared = count,
            decoded = records.len(),
            "record list truncated, stopping early"
        );
    }

    Records { records, truncated }
}
