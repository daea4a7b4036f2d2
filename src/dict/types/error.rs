//! Custom error types for the dictd-lookup crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// A word missing from the index is not an error: lookups report it as an
/// empty result.
#[derive(Debug, Error)]
pub enum DictError {
    /// An error originating from I/O on the index, data or cache file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The index bytes do not parse into complete records.
    #[error("Malformed index at byte {position}: {reason}")]
    MalformedIndex { position: usize, reason: String },

    /// The compressed envelope of a data or index file could not be decoded.
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// The caller asked for a text encoding that `encoding_rs` does not know.
    #[error("Unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    /// A mutex lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A mutex lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

/// A convenience `Result` type alias using the crate's `DictError` type.
pub type Result<T> = std::result::Result<T, DictError>;
