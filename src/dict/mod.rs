//! Core DICT lookup engine.
//!
//! - [`format::index`] decodes the binary index once, at open time.
//! - [`codec::compression`] materializes a compressed data file on first use.
//! - [`format::content`] extracts definition byte ranges.
//! - [`Dictionary`] ties them together behind `lookup` and `random_sample`.

pub mod codec;
pub mod format;
pub mod reader;
pub mod types;

pub use reader::Dictionary;
pub use types::error::{DictError, Result};
