//! # Definition Extraction
//!
//! Reads the byte range an index entry points at out of a materialized data
//! file and turns it into text.

use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use encoding_rs::Encoding;
use log::trace;

use crate::dict::types::error::Result;

/// Reads exactly `length` bytes starting at `offset` from `reader`.
///
/// # Errors
/// Returns `DictError::Io` if either value is negative, if `offset` lies past
/// the end of the stream, or if fewer than `length` bytes remain after it.
pub fn extract<R: Read + Seek>(reader: &mut R, offset: i64, length: i64) -> Result<Vec<u8>> {
    if offset < 0 || length < 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("negative byte range: offset={}, length={}", offset, length),
        )
        .into());
    }
    let (offset, length) = (offset as u64, length as u64);

    let end = reader.seek(SeekFrom::End(0))?;
    if offset > end {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("offset {} is past the end of the data file ({} bytes)", offset, end),
        )
        .into());
    }
    if length > end - offset {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!(
                "range {}+{} exceeds the data file ({} bytes)",
                offset, length, end
            ),
        )
        .into());
    }

    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; length as usize];
    reader.read_exact(&mut buf)?;
    trace!("Extracted {} bytes at offset {}", length, offset);
    Ok(buf)
}

/// Opens `path` and extracts one byte range from it.
pub fn read_definition(path: &Path, offset: i64, length: i64) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    extract(&mut file, offset, length)
}

/// Decodes definition bytes with the dictionary's text encoding.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        trace!("Replaced malformed {} sequences in definition", encoding.name());
    }
    text.into_owned()
}
