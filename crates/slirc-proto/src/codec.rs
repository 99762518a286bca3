//! Line-based codec for tokio.
//!
//! Reads newline-terminated lines off a byte stream and writes CRLF
//! terminated ones. Decoding is tolerant: invalid UTF-8 is replaced,
//! blank lines are skipped, and over-long lines are cut at the limit
//! with the remainder discarded up to the next newline.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::command::sanitize;
use crate::error::{ProtocolError, Result};

/// Longest line accepted, in bytes: 4094 bytes of tags plus a 512 byte
/// message, with slack for the separators servers actually send.
pub const MAX_LINE_LEN: usize = 8703;

/// Newline-framed text codec.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Dropping the tail of an over-long line
    discarding: bool,
}

impl LineCodec {
    /// Codec with the default [`MAX_LINE_LEN`] limit.
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Codec with a custom line limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len: max_len.max(1),
            discarding: false,
        }
    }

    fn finish(&self, bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        let mut text = text.trim_end_matches(['\r', '\n']).to_owned();
        truncate_to_boundary(&mut text, self.max_len);
        text
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_to_boundary(text: &mut String, max_len: usize) {
    if text.len() <= max_len {
        return;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                } else if src.len() > self.max_len {
                    // Emit the head now, drop the rest of this line as it arrives.
                    let head = src.split_to(self.max_len);
                    self.next_index = 0;
                    self.discarding = true;
                    return Ok(Some(self.finish(&head)));
                } else {
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if self.discarding {
                self.discarding = false;
                continue;
            }

            let text = self.finish(&line);
            if text.is_empty() {
                continue;
            }
            return Ok(Some(text));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            return Ok(None);
        }

        let rest = src.split();
        self.next_index = 0;
        if std::mem::take(&mut self.discarding) {
            return Ok(None);
        }
        let text = self.finish(&rest);
        Ok((!text.is_empty()).then_some(text))
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> Result<()> {
        let line = sanitize(&msg);
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
