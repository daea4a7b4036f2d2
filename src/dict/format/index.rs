//! # Index Decoding
//!
//! A DICT index (`.idx`) is a flat sequence of records with no header, footer
//! or record count:
//!
//! ```text
//! ┌──────────────────┬────────────────┬────────────────┐
//! │ word bytes, NUL  │ offset: i32 BE │ length: i32 BE │  × N
//! └──────────────────┴────────────────┴────────────────┘
//! ```
//!
//! The end of the index is the end of the buffer. A buffer that stops anywhere
//! other than right after a length field is malformed.

use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use log::{info, trace};

use crate::dict::codec::compression;
use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::WordEntry;

const FIELD_WIDTH: usize = 4;

/// Explicit read position over the raw index bytes.
struct IndexCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> IndexCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Reads up to the next NUL and leaves the cursor just past it.
    fn read_word(&mut self) -> Result<&'a str> {
        let start = self.pos;
        let rest = &self.data[start..];
        let end = rest
            .iter()
            .position(|&byte| byte == 0)
            .map(|len| start + len)
            .ok_or_else(|| malformed(start, "word is missing its NUL terminator"))?;

        let word = std::str::from_utf8(&self.data[start..end])
            .map_err(|e| malformed(start, format!("word is not valid UTF-8: {}", e)))?;
        self.pos = end + 1;
        Ok(word)
    }

    fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        let end = self.pos + FIELD_WIDTH;
        if end > self.data.len() {
            return Err(malformed(
                self.pos,
                format!(
                    "{} field needs {} bytes, {} remain",
                    field,
                    FIELD_WIDTH,
                    self.data.len() - self.pos
                ),
            ));
        }
        let value = BigEndian::read_i32(&self.data[self.pos..end]);
        self.pos = end;
        Ok(value)
    }
}

fn malformed(position: usize, reason: impl Into<String>) -> DictError {
    DictError::MalformedIndex {
        position,
        reason: reason.into(),
    }
}

/// Decodes raw index bytes into entries, in file order.
///
/// Duplicate words are kept as separate entries.
///
/// # Errors
/// Returns `DictError::MalformedIndex` if the buffer ends mid-record or a word
/// is not valid UTF-8.
pub fn decode(raw: &[u8]) -> Result<Vec<WordEntry>> {
    let mut cursor = IndexCursor::new(raw);
    let mut entries = Vec::new();

    while !cursor.is_exhausted() {
        let word = cursor.read_word()?;
        let offset = cursor.read_i32("offset")?;
        let length = cursor.read_i32("length")?;
        trace!("Index entry {:?}: offset={}, length={}", word, offset, length);
        entries.push(WordEntry::new(word, i64::from(offset), i64::from(length)));
    }

    Ok(entries)
}

/// Appends the binary record for `entry` to `out`.
///
/// Offsets and lengths outside the `i32` range are truncated to their low
/// 32 bits, matching the width of the on-disk fields.
pub fn encode_entry(entry: &WordEntry, out: &mut Vec<u8>) {
    let mut field = [0u8; FIELD_WIDTH];
    out.extend_from_slice(entry.word.as_bytes());
    out.push(0);
    BigEndian::write_i32(&mut field, entry.offset as i32);
    out.extend_from_slice(&field);
    BigEndian::write_i32(&mut field, entry.length as i32);
    out.extend_from_slice(&field);
}

/// Encodes a full index from `entries`.
pub fn encode(entries: &[WordEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    for entry in entries {
        encode_entry(entry, &mut out);
    }
    out
}

/// Reads and decodes the index file at `path`.
///
/// A compressed index is materialized first, the same way data files are.
pub fn read_index(path: impl AsRef<Path>) -> Result<Vec<WordEntry>> {
    let path = path.as_ref();
    let raw = compression::read_materialized(path)?;
    let entries = decode(&raw)?;
    info!("Decoded {} index entries from {}", entries.len(), path.display());
    Ok(entries)
}
