//! Value encoding at the store boundary.
//!
//! The parameter store refuses empty values, so an intentionally empty value
//! is written as a single space and recovered by trimming on read:
//!
//! - encode: `""` (the JSON empty string) becomes `" "`, then one layer of
//!   surrounding quotes is stripped so JSON strings land unquoted while
//!   numbers, booleans, objects and arrays keep their literal JSON text
//! - decode: surrounding whitespace is trimmed
//!
//! Escape sequences inside JSON strings are stored as written, which keeps the
//! encoding compatible with parameters that already exist in the store.

/// Stored in place of an empty value.
pub const EMPTY_SENTINEL: &str = " ";

/// Encode the raw JSON text of one imported field into a storable value.
pub fn encode_value(raw_json: &str) -> String {
    let raw_json = if raw_json == "\"\"" { "\" \"" } else { raw_json };

    match raw_json.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(unquoted) => unquoted.to_string(),
        None => raw_json.to_string(),
    }
}

/// Decode a stored value into the value seen through the loader.
pub fn decode_value(stored: &str) -> String {
    stored.trim().to_string()
}
