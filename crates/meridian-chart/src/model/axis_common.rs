//! Shared axis behavior.
//!
//! Every axis model owns an [`AxisCommon`] resolved from its effective
//! options at construction, and implements [`AxisCapability`] by handing it
//! out. All axis helpers are provided methods on the trait.

use serde::Deserialize;
use serde_json::Value;

use meridian_core::alloc::HashMap;

use crate::option::{Length, OptionMap, identifier, value_kind};

/// Axis sub-type: the scale family of one axis instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    /// Continuous numeric axis.
    #[default]
    Value,
    /// Discrete axis over a category list.
    Category,
    /// Continuous axis over timestamps.
    Time,
    /// Logarithmic numeric axis.
    Log,
}

impl AxisType {
    /// Every sub-type, in registration order.
    pub const ALL: [AxisType; 4] = [Self::Value, Self::Category, Self::Time, Self::Log];

    /// Sub-type name as written in options (`"value"`, `"category"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Category => "category",
            Self::Time => "time",
            Self::Log => "log",
        }
    }

    /// Theme section consulted for axes of this sub-type.
    pub fn theme_key(self) -> &'static str {
        match self {
            Self::Value => "valueAxis",
            Self::Category => "categoryAxis",
            Self::Time => "timeAxis",
            Self::Log => "logAxis",
        }
    }

    /// Parse a sub-type name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Pick the sub-type of a new axis from its raw options.
///
/// An explicit `type` wins, then `category` when a `data` array is given,
/// then `value`.
pub fn default_axis_sub_type(raw: &OptionMap) -> Option<String> {
    if let Some(explicit) = raw.get("type").and_then(Value::as_str) {
        return Some(explicit.to_string());
    }
    let sub_type = if raw.get("data").is_some_and(Value::is_array) {
        AxisType::Category
    } else {
        AxisType::Value
    };
    Some(sub_type.as_str().to_string())
}

/// How axis values map onto the axis extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScaleType {
    /// Linear scale (default).
    #[default]
    Linear,
    /// Logarithmic scale.
    Logarithmic {
        /// Log base (typically 10 or e)
        base: f64,
    },
    /// Values are timestamps.
    Time,
    /// Values are category ordinals.
    Ordinal,
}

impl ScaleType {
    /// Create a base-10 logarithmic scale.
    pub fn log10() -> Self {
        Self::Logarithmic { base: 10.0 }
    }
}

/// Blank space kept at both ends of the axis extent.
///
/// `true`/`false` for category axes, a `[min, max]` pair of lengths for
/// numeric ones.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoundaryGap {
    Enabled(bool),
    Range([Length; 2]),
}

/// Explicit `min` / `max` of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum AxisBound {
    /// A fixed value.
    Value(f64),
    /// The smallest value of the data.
    DataMin,
    /// The largest value of the data.
    DataMax,
}

impl TryFrom<Value> for AxisBound {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match &value {
            Value::Number(n) => n.as_f64().map(Self::Value).ok_or_else(|| format!("axis bound {n} is out of range")),
            Value::String(s) if s == "dataMin" => Ok(Self::DataMin),
            Value::String(s) if s == "dataMax" => Ok(Self::DataMax),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Self::Value)
                .map_err(|_| format!("axis bound must be a number, \"dataMin\" or \"dataMax\", found \"{s}\"")),
            other => Err(format!(
                "axis bound must be a number, \"dataMin\" or \"dataMax\", found {}",
                value_kind(other)
            )),
        }
    }
}

/// Category list of a category axis, with lookup from category to ordinal.
#[derive(Debug, Clone, Default)]
pub struct OrdinalMeta {
    categories: Vec<String>,
    lookup: HashMap<String, usize>,
    deduplication: bool,
}

impl OrdinalMeta {
    /// Build from a `data` array.
    ///
    /// Items may be strings, numbers or `{ "value": ... }` mappings. With
    /// deduplication, repeated categories are dropped after their first
    /// occurrence; without it they are kept and look up to the first one.
    pub fn from_data(data: &[Value], deduplication: bool) -> Self {
        let mut meta = Self {
            deduplication,
            ..Default::default()
        };
        for item in data {
            let name = category_name(item);
            if meta.lookup.contains_key(&name) {
                if deduplication {
                    continue;
                }
            } else {
                meta.lookup.insert(name.clone(), meta.categories.len());
            }
            meta.categories.push(name);
        }
        meta
    }

    /// Categories in axis order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Ordinal of a category.
    pub fn ordinal(&self, category: &str) -> Option<usize> {
        self.lookup.get(category).copied()
    }

    /// Category at an ordinal.
    pub fn category(&self, ordinal: usize) -> Option<&str> {
        self.categories.get(ordinal).map(String::as_str)
    }

    pub fn deduplication(&self) -> bool {
        self.deduplication
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl PartialEq for OrdinalMeta {
    fn eq(&self, other: &Self) -> bool {
        self.categories == other.categories && self.deduplication == other.deduplication
    }
}

fn category_name(item: &Value) -> String {
    match item {
        Value::Object(map) => map.get("value").map(category_name).unwrap_or_default(),
        Value::Bool(b) => b.to_string(),
        other => identifier(other).unwrap_or_default(),
    }
}

/// Axis state shared by every axis kind.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisCommon {
    axis_type: AxisType,
    scale: bool,
    log_base: f64,
    inverse: bool,
    min: Option<AxisBound>,
    max: Option<AxisBound>,
    boundary_gap: Option<BoundaryGap>,
    split_number: Option<u32>,
    ordinal_meta: Option<OrdinalMeta>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AxisCommonOption {
    #[serde(rename = "type", default)]
    axis_type: AxisType,
    #[serde(default)]
    scale: bool,
    log_base: Option<f64>,
    #[serde(default)]
    inverse: bool,
    min: Option<AxisBound>,
    max: Option<AxisBound>,
    boundary_gap: Option<BoundaryGap>,
    split_number: Option<u32>,
    data: Option<Vec<Value>>,
    deduplication: Option<bool>,
}

impl AxisCommon {
    /// Resolve from effective axis options.
    pub fn from_value(options: &Value) -> Result<Self, serde_json::Error> {
        let option = AxisCommonOption::deserialize(options)?;

        let ordinal_meta = (option.axis_type == AxisType::Category).then(|| {
            let data = option.data.as_deref().unwrap_or_default();
            OrdinalMeta::from_data(data, option.deduplication.unwrap_or(false))
        });

        Ok(Self {
            axis_type: option.axis_type,
            scale: option.scale,
            log_base: option.log_base.unwrap_or(10.0),
            inverse: option.inverse,
            min: option.min,
            max: option.max,
            boundary_gap: option.boundary_gap,
            split_number: option.split_number,
            ordinal_meta,
        })
    }
}

/// Helpers every axis model supports.
pub trait AxisCapability {
    /// The composed axis state.
    fn axis_common(&self) -> &AxisCommon;

    fn axis_type(&self) -> AxisType {
        self.axis_common().axis_type
    }

    /// Scale family implied by the sub-type.
    fn scale_type(&self) -> ScaleType {
        let common = self.axis_common();
        match common.axis_type {
            AxisType::Value => ScaleType::Linear,
            AxisType::Category => ScaleType::Ordinal,
            AxisType::Time => ScaleType::Time,
            AxisType::Log => ScaleType::Logarithmic { base: common.log_base },
        }
    }

    /// Whether the extent must include zero (`scale: false`).
    fn need_cross_zero(&self) -> bool {
        !self.axis_common().scale
    }

    /// Categories of a category axis; empty for other sub-types.
    fn categories(&self) -> &[String] {
        self.ordinal_meta().map(OrdinalMeta::categories).unwrap_or(&[])
    }

    fn ordinal_meta(&self) -> Option<&OrdinalMeta> {
        self.axis_common().ordinal_meta.as_ref()
    }

    /// Boundary gap, falling back to the sub-type's default.
    fn boundary_gap(&self) -> BoundaryGap {
        let common = self.axis_common();
        common.boundary_gap.unwrap_or(match common.axis_type {
            AxisType::Category => BoundaryGap::Enabled(true),
            _ => BoundaryGap::Range([Length::Absolute(0.0); 2]),
        })
    }

    fn is_inverse(&self) -> bool {
        self.axis_common().inverse
    }

    fn split_number(&self) -> Option<u32> {
        self.axis_common().split_number
    }

    /// Explicit `(min, max)` bounds.
    fn bounds(&self) -> (Option<AxisBound>, Option<AxisBound>) {
        let common = self.axis_common();
        (common.min, common.max)
    }
}

impl AxisCapability for AxisCommon {
    fn axis_common(&self) -> &AxisCommon {
        self
    }
}
