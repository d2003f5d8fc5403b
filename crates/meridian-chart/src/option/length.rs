use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// A length given either in absolute units or as a percentage of a reference size.
///
/// Deserializes from a number (`120`) or a percent string (`"50%"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute length.
    Absolute(f64),
    /// Percentage of the reference size (`50.0` means half).
    Percent(f64),
}

impl Length {
    /// Resolve against a reference size.
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Absolute(value) => value,
            Self::Percent(percent) => reference * percent / 100.0,
        }
    }

    /// Check if this is a percentage.
    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::Absolute(0.0)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LengthVisitor;

        impl Visitor<'_> for LengthVisitor {
            type Value = Length;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a percentage string such as \"50%\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Length, E> {
                Ok(Length::Absolute(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Length, E> {
                Ok(Length::Absolute(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Length, E> {
                Ok(Length::Absolute(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Length, E> {
                let trimmed = v.trim();
                let parsed = match trimmed.strip_suffix('%') {
                    Some(percent) => percent.trim().parse().map(Length::Percent),
                    None => trimmed.parse().map(Length::Absolute),
                };
                parsed.map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(LengthVisitor)
    }
}
