//! Stream re-framing for the TCP transport.
//!
//! Cuts a byte stream into whole messages using the declared length of the
//! framing family. Unknown framing bytes and impossible lengths are fatal for
//! the connection: once the stream is out of sync nothing after it can be
//! trusted.

use bytes::{Bytes, BytesMut};

use mulink_core::Framing;

use crate::error::{ClientError, Result};

pub struct FrameSplitter {
    buf: BytesMut,
    max_frame: usize,
}

impl FrameSplitter {
    pub fn new(max_frame: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(max_frame),
            max_frame,
        }
    }

    /// Read target for `AsyncReadExt::read_buf`.
    pub fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Next complete message, `None` when more bytes are needed.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>> {
        let Some(&first) = self.buf.first() else {
            return Ok(None);
        };
        let framing = Framing::from_byte(first)
            .ok_or_else(|| ClientError::Framing(format!("unknown framing byte {first:#04x}")))?;

        let Some(len) = framing.declared_len(&self.buf) else {
            return Ok(None);
        };
        if len <= framing.code_offset() {
            return Err(ClientError::Framing(format!(
                "declared length {len} shorter than {framing:?} header"
            )));
        }
        if len > self.max_frame {
            return Err(ClientError::Framing(format!(
                "declared length {len} exceeds limit {}",
                self.max_frame
            )));
        }
        if self.buf.len() < len {
            return Ok(None);
        }
        Ok(Some(self.buf.split_to(len).freeze()))
    }
}
