//! File format layer for DICT dictionaries.
//!
//! # Module Organization
//!
//! - [`index`]: Decodes the binary `.idx` file into word entries
//! - [`content`]: Extracts definition byte ranges from the data file
//!
//! ```text
//! .idx  ─ index::decode() ─▶ [WordEntry { word, offset, length }, ...]
//!                                          │
//! .dict ◀──────── content::extract() ──────┘
//! ```

pub mod content;
pub mod index;
