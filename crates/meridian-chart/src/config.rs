//! Per-chart configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::option::OptionMap;

/// Configuration of one chart context.
///
/// Deserializes from JSON with camelCase keys; every field is optional.
///
/// ```
/// use meridian_chart::{ChartConfig, DuplicateIdPolicy};
///
/// let config = ChartConfig::from_json_str(r#"{
///     "duplicateIds": "reject",
///     "theme": { "valueAxis": { "splitNumber": 8 } }
/// }"#).unwrap();
///
/// assert_eq!(config.duplicate_ids, DuplicateIdPolicy::Reject);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// How a host selected by an identifier shared by several instances resolves.
    pub duplicate_ids: DuplicateIdPolicy,
    /// Theme sections keyed by theme key (`valueAxis`, `categoryAxis`,
    /// `timeAxis`, `logAxis`, `polar`).
    pub theme: OptionMap,
    /// `tracing` filter directives used by [`ChartConfig::init_logging`].
    pub log_filter: Option<String>,
}

/// Resolution of identifier selectors that match more than one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateIdPolicy {
    /// Take the first match in creation order.
    #[default]
    FirstMatch,
    /// Treat the host as missing.
    Reject,
}

impl ChartConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Set the duplicate identifier policy.
    pub fn with_duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }

    /// Set the theme sections.
    pub fn with_theme(mut self, theme: OptionMap) -> Self {
        self.theme = theme;
        self
    }

    /// Install the global `tracing` subscriber using [`Self::log_filter`].
    pub fn init_logging(&self) {
        match self.log_filter.as_deref() {
            Some(filter) => meridian_core::logging::init_with_filter(filter),
            None => meridian_core::logging::init(),
        }
    }
}
