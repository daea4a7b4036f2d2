//! Core data structures for DICT-format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - Index records
//! - Compression envelope detection
//! - Dictionary construction options

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use super::error::{DictError, Result};

/// A single record from the dictionary index.
///
/// Associates a headword with the byte range of its definition inside the
/// (decompressed) data file. Several entries may share the same word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    /// Byte offset of the definition, from the start of the data file.
    pub offset: i64,
    /// Length of the definition in bytes.
    pub length: i64,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, offset: i64, length: i64) -> Self {
        Self {
            word: word.into(),
            offset,
            length,
        }
    }
}

/// Compression envelope of a data or index file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    None,
    /// gzip framing. dictzip (`.dz`) files are gzip with an extra header field.
    Gzip,
}

impl CompressionType {
    /// Extensions treated as gzip-compressed.
    pub const GZIP_EXTENSIONS: [&'static str; 2] = [".dz", ".gz"];

    pub fn from_path(path: &Path) -> Self {
        let name = path.as_os_str().to_string_lossy();
        if Self::GZIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            CompressionType::Gzip
        } else {
            CompressionType::None
        }
    }
}

/// What [`materialize`](crate::dict::codec::compression::materialize) had to do
/// to produce a seekable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeOutcome {
    /// The source is not compressed and is used as is.
    Passthrough,
    /// A decompressed sibling already existed and was reused.
    CacheHit,
    /// The source was decompressed into a new sibling file.
    Decompressed,
}

/// Options for opening a dictionary.
#[derive(Debug, Clone)]
pub struct DictOptions {
    pub index_path: PathBuf,
    pub data_path: PathBuf,
    /// Optional `encoding_rs` label for definition text. Defaults to UTF-8.
    pub encoding: Option<String>,
}

impl DictOptions {
    pub fn new(index_path: impl Into<PathBuf>, data_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            data_path: data_path.into(),
            encoding: None,
        }
    }

    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Resolves the configured encoding label.
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        match &self.encoding {
            None => Ok(encoding_rs::UTF_8),
            Some(label) => Encoding::for_label(label.trim().as_bytes())
                .ok_or_else(|| DictError::UnsupportedEncoding(label.clone())),
        }
    }
}
