//! Deep merge of option mappings.

use serde_json::Value;

use super::{OptionMap, value_kind};
use crate::error::MergeError;

/// Merge `overrides` on top of `defaults`, returning a new mapping.
///
/// Nested mappings merge field by field and override values win on
/// collisions. Arrays are replaced wholesale. A `null` override leaves the
/// default untouched. A mapping may only be overridden by a mapping, and a
/// non-null scalar or array only by a non-mapping.
///
/// # Example
///
/// ```
/// use meridian_chart::option::{merge, OptionMap};
/// use serde_json::json;
///
/// let defaults = json!({ "axisLabel": { "show": true, "margin": 8 } });
/// let user = json!({ "axisLabel": { "margin": 12 } });
///
/// let merged = merge(defaults.as_object().unwrap(), user.as_object().unwrap()).unwrap();
/// assert_eq!(merged["axisLabel"], json!({ "show": true, "margin": 12 }));
/// ```
pub fn merge(defaults: &OptionMap, overrides: &OptionMap) -> Result<OptionMap, MergeError> {
    let mut merged = defaults.clone();
    merge_into(&mut merged, overrides)?;
    Ok(merged)
}

/// In-place form of [`merge`]: layers `overrides` onto `base`.
///
/// On error `base` may hold a partially merged result.
pub fn merge_into(base: &mut OptionMap, overrides: &OptionMap) -> Result<(), MergeError> {
    let mut path = Vec::new();
    merge_level(base, overrides, &mut path)
}

/// Borrow `value` as a mapping, rejecting anything else.
///
/// `path` names the value in the resulting error.
pub fn as_option_map<'v>(value: &'v Value, path: &str) -> Result<&'v OptionMap, MergeError> {
    value.as_object().ok_or_else(|| MergeError::NotAMapping {
        path: path.to_string(),
        found: value_kind(value),
    })
}

fn merge_level<'a>(
    base: &mut OptionMap,
    overrides: &'a OptionMap,
    path: &mut Vec<&'a str>,
) -> Result<(), MergeError> {
    for (key, value) in overrides {
        if value.is_null() {
            continue;
        }

        path.push(key);
        let slot = base.entry(key.clone()).or_insert(Value::Null);
        match value {
            Value::Object(source) => {
                if let Value::Object(target) = &mut *slot {
                    merge_level(target, source, path)?;
                } else if slot.is_null() {
                    *slot = value.clone();
                } else {
                    return Err(mismatch(path, value_kind(slot), value));
                }
            }
            _ => {
                if slot.is_object() {
                    return Err(mismatch(path, "a mapping", value));
                }
                *slot = value.clone();
            }
        }
        path.pop();
    }

    Ok(())
}

fn mismatch(path: &[&str], expected: &'static str, found: &Value) -> MergeError {
    MergeError::ShapeMismatch {
        path: path.join("."),
        expected,
        found: value_kind(found),
    }
}
