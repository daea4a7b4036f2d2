//! # dictd-lookup
//!
//! Headword lookup over DICT-format dictionaries: a binary `.idx` index paired
//! with a `.dict` data file, optionally gzip/dictzip compressed (`.dict.dz`).
//!
//! Compressed data files are inflated once into a `<path>.decompressed`
//! sibling that later runs reuse.
pub mod dict;
pub mod server;

// Re-export the main types for convenience
pub use dict::{
    Dictionary,
    DictError,
    Result,
    codec::compression::materialize,
    format::index::{decode, encode, encode_entry},
    types::models::{
        CompressionType,
        DictOptions,
        MaterializeOutcome,
        WordEntry,
    },
};
