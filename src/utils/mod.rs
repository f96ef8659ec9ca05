//! Shared helpers

pub mod encoding;

pub use encoding::{decode_value, encode_value, EMPTY_SENTINEL};
