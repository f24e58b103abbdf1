//! Body Codec
//!
//! JSON encoding of cached bodies. Values are stored in the key-value store
//! as JSON text.

use serde::{
    de::{DeserializeOwned, Error as _, IgnoredAny},
    Serialize,
};

use crate::error::Result;

/// Encodes a body to the string written into the store.
pub fn encode<T: Serialize + ?Sized>(body: &T) -> Result<String> {
    Ok(serde_json::to_string(body)?)
}

/// Decodes a string read back from the store.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

/// Checks that a raw HTTP response body is JSON and returns it as text.
///
/// The text is returned as is, so key order and whitespace survive a trip
/// through the store.
pub fn json_text(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes).map_err(serde_json::Error::custom)?;
    serde_json::from_str::<IgnoredAny>(text)?;
    Ok(text)
}
