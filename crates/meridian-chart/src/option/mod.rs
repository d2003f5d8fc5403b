//! Option documents: merging, shared defaults and small typed values.
//!
//! Component options are JSON-shaped mappings. Defaults, theme sections and
//! user input are layered with [`merge`], then the effective mapping is
//! validated into a typed model.

pub mod defaults;
mod length;
mod merge;

pub use length::Length;
pub use merge::{as_option_map, merge, merge_into};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A mapping of option names to values.
pub type OptionMap = serde_json::Map<String, Value>;

/// Human-readable kind of a value, used in error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

/// Read a value as an identifier: strings as-is, numbers in decimal form.
pub(crate) fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a value as an ordinal index.
///
/// Integers and whole-number floats count; floats beyond the `i64` range
/// saturate, so they stay out of range. Anything else is no index.
pub(crate) fn ordinal_index(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

/// Deserialize an optional index leniently, as [`ordinal_index`] reads it.
pub(crate) fn deserialize_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(ordinal_index))
}

/// Deserialize an optional identifier given as a string or a number.
pub(crate) fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => identifier(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected a string or number id, found {}", value_kind(&value)))),
    }
}

/// Unwrap a `json!` object literal into a mapping.
pub(crate) fn object(value: Value) -> OptionMap {
    match value {
        Value::Object(map) => map,
        _ => OptionMap::new(),
    }
}
