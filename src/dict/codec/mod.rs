//! Codec layer for compressed dictionary files.
//!
//! # Submodules
//!
//! - [`compression`][]: gzip/dictzip decompression into an on-disk cache

pub mod compression;
