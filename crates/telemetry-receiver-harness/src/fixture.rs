//! Expected-message literals.
//!
//! Tests usually keep their expected requests as JSON documents in the
//! upstream API's proto3 JSON form: `camelCase` fields, enums by name or
//! number, `int64` values as strings or numbers. Timestamps, intervals and
//! latencies in those documents are ignored.

use serde::de::DeserializeOwned;

use crate::error::HarnessError;

/// Parse a fixture from its JSON form.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, HarnessError> {
    Ok(serde_json::from_str(json)?)
}
